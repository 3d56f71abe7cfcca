use super::{check_degenerate, leading_kind, renumber, Condition};
use crate::common::{Comparator, ExplodeMode, Int};
use crate::error::RResult;
use crate::roll::{
    roller::{roll_kind, RandomSource},
    tree::RollTree,
};

/// Bonus rolls allowed per original entry before exploding silently stops.
pub(crate) const MAX_EXPLOSIONS: usize = 1000;

fn raw_roll(entry: &RollTree) -> Option<Int> {
    entry.as_trial().map(|t| t.roll)
}

/// Rolls bonus dice for entries that pass the condition, which defaults to
/// the highest face of the die.
///
/// `Explode` inserts each bonus die after the one that triggered it,
/// `Penetrate` does the same but takes one off every bonus die, and `Compound`
/// folds the bonus into the original entry.
pub(crate) fn explode<S: RandomSource + ?Sized>(
    source: &mut S,
    entries: &mut Vec<RollTree>,
    mode: ExplodeMode,
    condition: Option<Condition>,
    modifier: &'static str,
) -> RResult<()> {
    let kind = match leading_kind(entries) {
        Some(kind) => kind,
        None => return Ok(()),
    };
    let condition = condition.unwrap_or_else(|| Condition::new(Comparator::Equal, kind.max()));
    check_degenerate(kind, condition, modifier)?;

    let passes = |entry: &RollTree| raw_roll(entry).map_or(false, |roll| condition.passes(roll));

    let mut i = 0;
    while i < entries.len() {
        if !entries[i].valid {
            i += 1;
            continue;
        }

        match mode {
            ExplodeMode::Explode | ExplodeMode::Penetrate => {
                let mut current = i;
                let mut explosions = 0;
                while passes(&entries[current]) {
                    if explosions == MAX_EXPLOSIONS {
                        tracing::debug!(modifier, order = i, "explosion cap reached");
                        break;
                    }
                    explosions += 1;

                    if let Some(trial) = entries[current].as_trial_mut() {
                        trial.explode = true;
                    }
                    let mut bonus = roll_kind(source, kind, current + 1);
                    if mode == ExplodeMode::Penetrate {
                        bonus.value = bonus.value - 1.into();
                    }
                    entries.insert(current + 1, bonus);
                    current += 1;
                }
                i = current + 1;
            }
            ExplodeMode::Compound => {
                let mut latest = raw_roll(&entries[i]);
                let mut explosions = 0;
                while latest.map_or(false, |roll| condition.passes(roll)) {
                    if explosions == MAX_EXPLOSIONS {
                        tracing::debug!(modifier, order = i, "explosion cap reached");
                        break;
                    }
                    explosions += 1;

                    let bonus = roll_kind(source, kind, i);
                    latest = raw_roll(&bonus);
                    let entry = &mut entries[i];
                    entry.value = entry.value + bonus.value;
                    if let (Some(trial), Some(roll)) = (entry.as_trial_mut(), latest) {
                        trial.roll += roll;
                        trial.explode = true;
                    }
                }
                i += 1;
            }
        }
    }

    renumber(entries);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;
    use crate::error::RollError;
    use crate::roll::num::Number;
    use crate::roll::roller::ScriptedSource;

    #[test]
    fn test_explode_inserts_after() {
        let mut rolls = trials(6, &[6, 2]);
        let mut source = ScriptedSource::faces(6, &[6, 3]);
        explode(&mut source, &mut rolls, ExplodeMode::Explode, None, "explode").unwrap();
        assert_eq!(faces(&rolls), vec![6, 6, 3, 2]);
        let orders: Vec<_> = rolls.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
        assert!(rolls[0].as_trial().map_or(false, |t| t.explode));
        assert!(rolls[1].as_trial().map_or(false, |t| t.explode));
        assert!(!rolls[2].as_trial().map_or(true, |t| t.explode));
    }

    #[test]
    fn test_compound_keeps_length() {
        let mut rolls = trials(6, &[6, 2]);
        let mut source = ScriptedSource::faces(6, &[6, 4]);
        explode(&mut source, &mut rolls, ExplodeMode::Compound, None, "compound").unwrap();
        assert_eq!(rolls.len(), 2);
        assert_eq!(rolls[0].value, Number::Int(16));
        assert_eq!(faces(&rolls), vec![16, 2]);
    }

    #[test]
    fn test_penetrate_subtracts_one() {
        let mut rolls = trials(6, &[6]);
        let mut source = ScriptedSource::faces(6, &[6, 1]);
        explode(&mut source, &mut rolls, ExplodeMode::Penetrate, None, "penetrate").unwrap();
        let values: Vec<_> = rolls.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![Number::Int(6), Number::Int(5), Number::Int(0)]);
    }

    #[test]
    fn test_explicit_target() {
        let mut rolls = trials(6, &[5, 4]);
        let mut source = ScriptedSource::faces(6, &[1]);
        let condition = Condition::new(Comparator::AtLeast, 5);
        explode(&mut source, &mut rolls, ExplodeMode::Explode, Some(condition), "explode").unwrap();
        assert_eq!(faces(&rolls), vec![5, 1, 4]);
    }

    #[test]
    fn test_degenerate_d1() {
        let mut rolls = trials(1, &[1, 1]);
        let mut source = ScriptedSource::faces(1, &[1]);
        let err = explode(&mut source, &mut rolls, ExplodeMode::Explode, None, "explode").unwrap_err();
        assert!(matches!(err, RollError::DegenerateTarget { modifier: "explode" }));
    }

    #[test]
    fn test_explosion_cap() {
        let mut rolls = trials(6, &[6]);
        let mut source = ScriptedSource::faces(6, &[6]);
        explode(&mut source, &mut rolls, ExplodeMode::Explode, None, "explode").unwrap();
        assert_eq!(rolls.len(), MAX_EXPLOSIONS + 1);
    }
}
