//! The modifier pipeline: transforms over an ordered sequence of die entries
//! or group members. Stages mark entries rather than removing them, so every
//! stage sees the full sequence.

mod explode;
mod keep;
mod matching;
mod order;
mod reroll;
mod target;

pub(crate) use explode::explode;
pub(crate) use keep::{drop, keep};
pub(crate) use matching::mark_matches;
pub(crate) use order::sort;
pub(crate) use reroll::reroll;
pub(crate) use target::{critical, failure, success, tally};

use super::{
    num::Number,
    tree::{DieKind, RollTree},
};
use crate::common::*;
use crate::error::{RResult, RollError};

/// Which number of an entry a modifier looks at: the raw face of a die, or the
/// resolved value of a group member.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lookup {
    Face,
    Value,
}

impl Lookup {
    pub fn of(self, entry: &RollTree) -> Number {
        match self {
            Self::Face => entry.face(),
            Self::Value => entry.value,
        }
    }
}

/// A comparator paired with its resolved target value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Condition {
    pub comparator: Comparator,
    pub target: Number,
}

impl Condition {
    pub fn new(comparator: Comparator, target: impl Into<Number>) -> Self {
        Self {
            comparator,
            target: target.into(),
        }
    }

    pub fn passes(self, value: impl Into<Number>) -> bool {
        self.comparator.test(self.target, value.into())
    }
}

/// Rejects a condition that holds for both the lowest and the highest face,
/// since rerolling or exploding on it would never stop.
fn check_degenerate(kind: DieKind, condition: Condition, modifier: &'static str) -> RResult<()> {
    if condition.passes(kind.min()) && condition.passes(kind.max()) {
        tracing::debug!(modifier, ?condition, "rejecting degenerate target");
        Err(RollError::DegenerateTarget { modifier })
    } else {
        Ok(())
    }
}

/// The die kind of the first entry, if the sequence starts with a trial.
fn leading_kind(entries: &[RollTree]) -> Option<DieKind> {
    entries.first().and_then(RollTree::as_trial).map(|t| t.die)
}

fn renumber(entries: &mut [RollTree]) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.order = i;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_targets() {
        let d1 = DieKind::Standard(1);
        let d6 = DieKind::Standard(6);
        assert!(check_degenerate(d1, Condition::new(Comparator::Equal, 1), "explode").is_err());
        assert!(check_degenerate(d6, Condition::new(Comparator::AtLeast, 1), "reroll").is_err());
        assert!(check_degenerate(d6, Condition::new(Comparator::Equal, 6), "explode").is_ok());
        assert!(check_degenerate(DieKind::Fate, Condition::new(Comparator::AtMost, 1), "reroll").is_err());
        assert!(check_degenerate(DieKind::Fate, Condition::new(Comparator::Equal, -1), "reroll").is_ok());
    }
}
