use crate::parse::ParseError;
use crate::roll::{Number, ResolveError};

#[derive(thiserror::Error, Debug)]
pub enum RollError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("malformed syntax tree: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported node type")]
    UnsupportedNode,
    #[error("the {modifier} modifier is not supported on a {scope}")]
    UnsupportedModifier {
        modifier: &'static str,
        scope: &'static str,
    },
    #[error("too many dice rolled: {count} requested, at most {max} allowed")]
    TooManyRolls { count: Number, max: usize },
    #[error("the {modifier} target matches every face, so the roll would never end")]
    DegenerateTarget { modifier: &'static str },
    #[error("cannot reroll a {0}")]
    NotRerollable(&'static str),
    #[error("failed to resolve replacement '{name}'")]
    Resolver {
        name: String,
        #[source]
        source: ResolveError,
    },
    #[error("no transform is available for replacement '{0}'")]
    UnresolvedReplacement(String),
    #[error("a die must have at least one face, got {0}")]
    InvalidFaces(Number),
    #[error("cannot divide by zero")]
    ZeroDivision,
    #[error("cannot take modulus by zero")]
    ZeroModulo,
}

pub type RResult<T> = Result<T, RollError>;
