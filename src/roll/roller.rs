use super::tree::{Critical, DieKind, RollTree, Trial};
use crate::common::{Float, Int};
use rand::Rng;

/// A source of uniformly distributed samples in `[0, 1)`.
pub trait RandomSource {
    fn sample(&mut self) -> Float;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn sample(&mut self) -> Float {
        self.gen::<Float>()
    }
}

/// Adapts a closure returning samples in `[0, 1)` into a [RandomSource].
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> Float> RandomSource for FnSource<F> {
    fn sample(&mut self) -> Float {
        (self.0)()
    }
}

/// Maps a sample onto `1..=faces`. The scaled sample is rounded before
/// flooring so that values like `0.5 * 6` computed as `2.9999999999` still
/// land on the intended face.
fn scale(sample: Float, faces: Int) -> Int {
    let scaled = sample * faces as Float;
    let scaled = (scaled * 1e9).round() / 1e9;
    (scaled.floor() as Int + 1).clamp(1, faces.max(1))
}

pub fn roll_standard<S: RandomSource + ?Sized>(source: &mut S, faces: Int, order: usize) -> RollTree {
    let roll = scale(source.sample(), faces);
    let critical = if roll == faces {
        Some(Critical::Success)
    } else if roll == 1 {
        Some(Critical::Failure)
    } else {
        None
    };

    let mut trial = Trial::new(DieKind::Standard(faces), roll);
    trial.critical = critical;
    RollTree::from_trial(trial, order)
}

pub fn roll_fate<S: RandomSource + ?Sized>(source: &mut S, order: usize) -> RollTree {
    let roll = scale(source.sample(), 3) - 2;
    RollTree::from_trial(Trial::new(DieKind::Fate, roll), order)
}

/// Draws a fresh trial of the same kind as `kind`.
pub fn roll_kind<S: RandomSource + ?Sized>(source: &mut S, kind: DieKind, order: usize) -> RollTree {
    match kind {
        DieKind::Standard(faces) => roll_standard(source, faces, order),
        DieKind::Fate => roll_fate(source, order),
    }
}

#[cfg(test)]
pub(crate) use scripted::{face, ScriptedSource};

#[cfg(test)]
mod scripted {
    use super::*;

    /// Replays a fixed list of samples, wrapping around when exhausted.
    pub(crate) struct ScriptedSource {
        samples: Vec<Float>,
        next: usize,
    }

    impl ScriptedSource {
        pub fn new(samples: Vec<Float>) -> Self {
            Self { samples, next: 0 }
        }

        /// A source that yields the given faces of an `n`-sided die in turn.
        pub fn faces(n: Int, faces: &[Int]) -> Self {
            Self::new(faces.iter().map(|&k| face(k, n)).collect())
        }
    }

    impl RandomSource for ScriptedSource {
        fn sample(&mut self) -> Float {
            let ret = self.samples[self.next % self.samples.len()];
            self.next += 1;
            ret
        }
    }

    /// The sample that lands in the middle of face `k` on an `n`-sided die.
    pub(crate) fn face(k: Int, n: Int) -> Float {
        (k as Float - 0.5) / n as Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::Number;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_scale_bounds() {
        assert_eq!(scale(0.0, 6), 1);
        assert_eq!(scale(0.999_999_999_9, 6), 6);
        assert_eq!(scale(0.5, 6), 4);
        assert_eq!(scale(0.5, 2), 2);
    }

    #[test]
    fn test_standard_criticals() {
        let mut source = ScriptedSource::faces(20, &[20, 1, 10]);
        let max = roll_standard(&mut source, 20, 0);
        let min = roll_standard(&mut source, 20, 1);
        let mid = roll_standard(&mut source, 20, 2);
        assert_eq!(max.as_trial().map(|t| t.critical), Some(Some(Critical::Success)));
        assert_eq!(min.as_trial().map(|t| t.critical), Some(Some(Critical::Failure)));
        assert_eq!(mid.as_trial().map(|t| t.critical), Some(None));
        assert_eq!(mid.order, 2);
    }

    #[test]
    fn test_fate_faces() {
        let mut source = ScriptedSource::faces(3, &[1, 2, 3]);
        let rolls: Vec<_> = (0..3)
            .map(|i| roll_fate(&mut source, i).value)
            .collect();
        assert_eq!(rolls, vec![Number::Int(-1), Number::Int(0), Number::Int(1)]);
    }

    #[test]
    fn test_rng_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..500 {
            let roll = roll_standard(&mut rng, 6, i);
            let face = roll.as_trial().map(|t| t.roll).unwrap();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_fn_source() {
        let mut source = FnSource(|| 0.99);
        let roll = roll_standard(&mut source, 4, 0);
        assert_eq!(roll.as_trial().map(|t| t.roll), Some(4));
    }
}
