mod ctx;
mod num;
mod ops;
mod resolver;
mod roller;
mod stringify;
mod tree;

pub use ctx::{RollContext, DEFAULT_MAX_ROLLS};
pub use num::Number;
pub use resolver::{
    FnResolver, IdentityResolver, ReplacementCache, Resolve, ResolveError, Transform,
};
pub(crate) use resolver::ReplacementNames;
pub use roller::{roll_fate, roll_standard, FnSource, RandomSource};
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};
pub use tree::{
    Critical, DiceRoll, DieKind, ExpressionRoll, FunctionRoll, GroupRoll, ReplacementRoll,
    RollNode, RollTree, RolledOperation, Trial,
};

#[cfg(test)]
pub(crate) use roller::ScriptedSource;
