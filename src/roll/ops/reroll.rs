use super::{check_degenerate, leading_kind, renumber, Condition};
use crate::common::Comparator;
use crate::error::{RResult, RollError};
use crate::roll::{
    roller::{roll_kind, RandomSource},
    tree::RollTree,
};

/// Draws a replacement for `entry`. Only single trials know how to roll again.
pub(crate) fn reroll_entry<S: RandomSource + ?Sized>(
    source: &mut S,
    entry: &RollTree,
    order: usize,
) -> RResult<RollTree> {
    match entry.as_trial() {
        Some(trial) => Ok(roll_kind(source, trial.die, order)),
        None => Err(RollError::NotRerollable(entry.kind())),
    }
}

/// Replaces entries that pass the condition (by default, the lowest face)
/// with fresh rolls. The replaced entry stays in the sequence, invalidated,
/// with its replacement right after it. With `once`, each original entry is
/// replaced at most one time.
pub(crate) fn reroll<S: RandomSource + ?Sized>(
    source: &mut S,
    entries: &mut Vec<RollTree>,
    once: bool,
    condition: Option<Condition>,
    modifier: &'static str,
) -> RResult<()> {
    let kind = match leading_kind(entries) {
        Some(kind) => kind,
        None if entries.is_empty() => return Ok(()),
        None => return Err(RollError::NotRerollable(entries[0].kind())),
    };
    let condition = condition.unwrap_or_else(|| Condition::new(Comparator::Equal, kind.min()));
    check_degenerate(kind, condition, modifier)?;

    let mut i = 0;
    while i < entries.len() {
        let mut current = i;
        while entries[current].valid && condition.passes(entries[current].face()) {
            let fresh = reroll_entry(source, &entries[current], current + 1)?;

            let entry = &mut entries[current];
            entry.invalidate();
            if let Some(trial) = entry.as_trial_mut() {
                trial.reroll = true;
            }
            entries.insert(current + 1, fresh);
            current += 1;

            if once {
                break;
            }
        }
        i = current + 1;
    }

    renumber(entries);
    Ok(())
}
