use super::Lookup;
use crate::common::Direction;
use crate::roll::{num::Number, tree::RollTree};
use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;

fn get<E: Borrow<RollTree>>(entry: &E) -> &RollTree {
    entry.borrow()
}

fn compare<E: Borrow<RollTree>>(lookup: Lookup, a: &E, b: &E) -> Ordering {
    let a = lookup.of(get(a));
    let b = lookup.of(get(b));
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn clamp_count(count: Number, len: usize) -> usize {
    let count = count.floor().as_int().max(0);
    usize::try_from(count).map_or(len, |count| count.min(len))
}

/// Invalidates the first `n` still-valid entries.
fn mark_dropped<E: BorrowMut<RollTree>>(entries: &mut [E], n: usize) {
    let mut remaining = n;
    for entry in entries.iter_mut() {
        if remaining == 0 {
            break;
        }

        let entry: &mut RollTree = entry.borrow_mut();
        if entry.valid {
            entry.invalidate();
            if let Some(trial) = entry.as_trial_mut() {
                trial.drop = true;
            }
            remaining -= 1;
        }
    }
}

fn restore_order<E: Borrow<RollTree>>(entries: &mut [E]) {
    entries.sort_by_key(|entry| get(entry).order);
}

/// Keeps the `count` highest or lowest valid entries and drops the rest.
pub(crate) fn keep<E: BorrowMut<RollTree>>(
    entries: &mut [E],
    direction: Direction,
    count: Number,
    lookup: Lookup,
) {
    match direction {
        Direction::High => entries.sort_by(|a, b| compare(lookup, a, b)),
        Direction::Low => entries.sort_by(|a, b| compare(lookup, b, a)),
    }
    // Entries dropped by an earlier stage go first so they are not counted twice.
    entries.sort_by_key(|entry| get(entry).valid);

    let valid = entries.iter().filter(|&entry| get(entry).valid).count();
    let to_drop = valid.saturating_sub(clamp_count(count, entries.len()));
    mark_dropped(entries, to_drop);

    restore_order(entries);
}

/// Drops the `count` highest or lowest valid entries.
pub(crate) fn drop<E: BorrowMut<RollTree>>(
    entries: &mut [E],
    direction: Direction,
    count: Number,
    lookup: Lookup,
) {
    match direction {
        Direction::High => entries.sort_by(|a, b| compare(lookup, b, a)),
        Direction::Low => entries.sort_by(|a, b| compare(lookup, a, b)),
    }

    let to_drop = clamp_count(count, entries.len());
    mark_dropped(entries, to_drop);

    restore_order(entries);
}
