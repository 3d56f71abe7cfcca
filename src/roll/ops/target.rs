use super::{Condition, Lookup};
use crate::roll::tree::{Critical, DieKind, RollTree};
use std::borrow::BorrowMut;

/// Counts a success on every valid entry that passes the condition and flags
/// it as successful, which later critical tests respect.
pub(crate) fn success<E: BorrowMut<RollTree>>(entries: &mut [E], condition: Condition, lookup: Lookup) {
    for entry in entries.iter_mut() {
        let entry: &mut RollTree = entry.borrow_mut();
        if entry.valid && condition.passes(lookup.of(entry)) {
            entry.successes += 1;
            entry.success = Some(true);
        }
    }
}

pub(crate) fn failure<E: BorrowMut<RollTree>>(entries: &mut [E], condition: Condition, lookup: Lookup) {
    for entry in entries.iter_mut() {
        let entry: &mut RollTree = entry.borrow_mut();
        if entry.valid && condition.passes(lookup.of(entry)) {
            entry.failures += 1;
        }
    }
}

/// Tags standard trials that pass the condition with `tag`, and clears the
/// tag from those that no longer do. Trials already marked as successes are
/// left alone.
pub(crate) fn critical(entries: &mut [RollTree], tag: Critical, condition: Condition) {
    for entry in entries.iter_mut() {
        if entry.success == Some(true) {
            continue;
        }

        let trial = match entry.as_trial_mut() {
            Some(trial) if matches!(trial.die, DieKind::Standard(_)) => trial,
            _ => continue,
        };
        if condition.passes(trial.roll) {
            trial.critical = Some(tag);
        } else if trial.critical == Some(tag) {
            trial.critical = None;
        }
    }
}

/// Marks each valid entry as a success or not and returns the summed
/// successes and failures.
pub(crate) fn tally<E: BorrowMut<RollTree>>(entries: &mut [E]) -> (usize, usize) {
    let mut successes = 0;
    let mut failures = 0;
    for entry in entries.iter_mut() {
        let entry: &mut RollTree = entry.borrow_mut();
        if entry.valid {
            entry.success = Some(entry.successes > entry.failures);
            successes += entry.successes;
            failures += entry.failures;
        }
    }
    (successes, failures)
}
