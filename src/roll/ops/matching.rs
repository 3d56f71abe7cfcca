use super::Condition;
use crate::common::Int;
use crate::roll::{num::Number, tree::RollTree};
use std::collections::{BTreeMap, BTreeSet};

/// Marks valid trials whose face shows up at least `min` times, optionally
/// only for faces that pass `filter`. Returns how many distinct faces matched.
pub(crate) fn mark_matches(entries: &mut [RollTree], min: Number, filter: Option<Condition>) -> usize {
    let mut counts: BTreeMap<Int, usize> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.valid) {
        if let Some(trial) = entry.as_trial() {
            *counts.entry(trial.roll).or_default() += 1;
        }
    }

    let matched: BTreeSet<Int> = counts
        .into_iter()
        .filter(|&(_, n)| Number::from(n) >= min)
        .filter(|&(face, _)| filter.map_or(true, |condition| condition.passes(face)))
        .map(|(face, _)| face)
        .collect();

    for entry in entries.iter_mut().filter(|e| e.valid) {
        if let Some(trial) = entry.as_trial_mut() {
            if matched.contains(&trial.roll) {
                trial.matched = true;
            }
        }
    }

    matched.len()
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;
    use crate::common::Comparator;

    fn matched(entries: &[RollTree]) -> Vec<bool> {
        entries
            .iter()
            .map(|e| e.as_trial().map_or(false, |t| t.matched))
            .collect()
    }

    #[test]
    fn test_match_pairs() {
        let mut rolls = trials(6, &[3, 3, 5, 3]);
        let groups = mark_matches(&mut rolls, 2.into(), None);
        assert_eq!(groups, 1);
        assert_eq!(matched(&rolls), vec![true, true, false, true]);
    }

    #[test]
    fn test_match_min_and_filter() {
        let mut rolls = trials(6, &[2, 2, 6, 6, 4]);
        assert_eq!(mark_matches(&mut rolls, 3.into(), None), 0);

        let filter = Condition::new(Comparator::AtLeast, 5);
        let groups = mark_matches(&mut rolls, 2.into(), Some(filter));
        assert_eq!(groups, 1);
        assert_eq!(matched(&rolls), vec![false, false, true, true, false]);
    }
}
