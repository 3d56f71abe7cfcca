//! Evaluates dice notation (`4d6kh3`, `{2d20}kh1 + 5`, `8d10>=7f1`) into a
//! result tree holding every die rolled along the way.
//!
//! ```no_run
//! # async fn demo() -> dice_eval::RResult<()> {
//! let mut roller = dice_eval::DiceRoller::new();
//! let tree = roller.roll("4d6kh3 + 2").await?;
//! println!("{}", dice_eval::SimpleStringifier::new().render(&tree));
//! # Ok(())
//! # }
//! ```

pub mod common;
mod error;
pub mod parse;
pub mod roll;

pub use error::{RResult, RollError};
pub use parse::{ast::Node, parse, ParseError};
pub use roll::{
    FnResolver, FnSource, IdentityResolver, MarkdownStringifier, Number, RandomSource,
    ReplacementCache, Resolve, RollContext, RollTree, SimpleStringifier, Stringify,
    DEFAULT_MAX_ROLLS,
};

use rand::rngs::ThreadRng;
use roll::ReplacementNames;
use std::collections::HashMap;
use std::sync::Arc;

/// Rolls dice notation with a configurable random source and replacement
/// resolver.
///
/// Resolved replacements are kept in a [ReplacementCache], which can be
/// shared between rollers with [DiceRoller::with_cache].
pub struct DiceRoller<S = ThreadRng, R = IdentityResolver> {
    source: S,
    max_rolls: usize,
    resolver: R,
    cache: Arc<ReplacementCache>,
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self {
            source: rand::thread_rng(),
            max_rolls: DEFAULT_MAX_ROLLS,
            resolver: IdentityResolver,
            cache: Arc::default(),
        }
    }
}

impl DiceRoller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, R> DiceRoller<S, R> {
    /// Replaces the random source. Any [rand::Rng] works, as does an
    /// [FnSource] wrapping a closure.
    pub fn with_source<T: RandomSource>(self, source: T) -> DiceRoller<T, R> {
        DiceRoller {
            source,
            max_rolls: self.max_rolls,
            resolver: self.resolver,
            cache: self.cache,
        }
    }

    /// Caps how many dice a single die node may roll.
    pub fn with_max_rolls(mut self, max_rolls: usize) -> Self {
        self.max_rolls = max_rolls;
        self
    }

    pub fn with_resolver<T: Resolve>(self, resolver: T) -> DiceRoller<S, T> {
        DiceRoller {
            source: self.source,
            max_rolls: self.max_rolls,
            resolver,
            cache: self.cache,
        }
    }

    pub fn with_cache(mut self, cache: Arc<ReplacementCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<ReplacementCache> {
        &self.cache
    }
}

impl<S: RandomSource, R: Resolve> DiceRoller<S, R> {
    /// Evaluates a syntax tree. Every replacement name in the tree is
    /// resolved before the first die is rolled.
    pub async fn roll_tree(&mut self, node: &Node) -> RResult<RollTree> {
        tracing::debug!(max_rolls = self.max_rolls, "evaluating roll");

        let mut transforms = HashMap::new();
        for name in ReplacementNames::collect(node) {
            let transform = self.cache.get_or_resolve(&name, &self.resolver).await?;
            transforms.insert(name, transform);
        }

        RollContext::new(self.max_rolls, &mut self.source)
            .with_transforms(transforms)
            .eval(node)
    }

    pub async fn roll(&mut self, input: &str) -> RResult<RollTree> {
        let node = parse(input)?;
        self.roll_tree(&node).await
    }

    pub async fn roll_value(&mut self, input: &str) -> RResult<Number> {
        self.roll(input).await.map(|tree| tree.value)
    }

    /// Evaluates a syntax tree given as JSON, such as one emitted by another
    /// parser.
    pub async fn roll_json(&mut self, json: &str) -> RResult<RollTree> {
        let node: Node = serde_json::from_str(json)?;
        self.roll_tree(&node).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::{RollNode, ScriptedSource, Transform};
    use rand::{rngs::StdRng, SeedableRng};

    fn scripted(faces: &[common::Int]) -> DiceRoller<ScriptedSource> {
        DiceRoller::new().with_source(ScriptedSource::faces(6, faces))
    }

    #[tokio::test]
    async fn test_roll_value() {
        let mut roller = DiceRoller::new();
        assert_eq!(roller.roll_value("2 + 3 * 4").await.unwrap(), Number::Int(14));

        let mut roller = scripted(&[3, 6, 1, 4]);
        assert_eq!(roller.roll_value("4d6kh3").await.unwrap(), Number::Int(13));
    }

    #[tokio::test]
    async fn test_default_roller_stays_in_range() {
        let mut roller = DiceRoller::new();
        for _ in 0..50 {
            let value = roller.roll_value("3d6").await.unwrap().as_int();
            assert!((3..=18).contains(&value));
        }
    }

    #[tokio::test]
    async fn test_seeded_rollers_agree() {
        let mut a = DiceRoller::new().with_source(StdRng::seed_from_u64(42));
        let mut b = DiceRoller::new().with_source(StdRng::seed_from_u64(42));
        let input = "4d6!kh3 + 2d8r + 1";
        assert_eq!(a.roll(input).await.unwrap(), b.roll(input).await.unwrap());
    }

    #[tokio::test]
    async fn test_max_rolls() {
        let mut roller = scripted(&[1]).with_max_rolls(5);
        assert!(roller.roll("5d6").await.is_ok());
        let err = roller.roll("6d6").await.unwrap_err();
        assert!(matches!(err, RollError::TooManyRolls { max: 5, .. }));
    }

    #[tokio::test]
    async fn test_parse_errors_surface() {
        let mut roller = DiceRoller::new();
        let err = roller.roll("2d6 +").await.unwrap_err();
        assert!(matches!(err, RollError::Parse(_)));
    }

    #[tokio::test]
    async fn test_replacements_use_resolver() {
        let resolver = FnResolver(|name: String| async move {
            let transform: Transform = match name.as_str() {
                "double" => Arc::new(|x: Number| x * Number::Int(2)),
                _ => Arc::new(|x: Number| x),
            };
            Ok::<_, roll::ResolveError>(transform)
        });
        let mut roller = scripted(&[4]).with_resolver(resolver);

        let tree = roller.roll("@double(1d6) + @other(3)").await.unwrap();
        assert_eq!(tree.value, Number::Int(11));
        assert_eq!(roller.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_roll_json() {
        let mut roller = scripted(&[2, 5]);
        let json = r#"{
            "type": "die",
            "count": {"type": "number", "value": 2},
            "die": {"sides": {"type": "number", "value": 6}},
            "label": "damage"
        }"#;
        let tree = roller.roll_json(json).await.unwrap();
        assert!(matches!(tree.roll, RollNode::Die(_)));
        assert_eq!(tree.value, Number::Int(7));
        assert_eq!(tree.label.as_deref(), Some("damage"));

        let err = roller.roll_json("{\"type\": \"die\"").await.unwrap_err();
        assert!(matches!(err, RollError::Json(_)));
    }
}
