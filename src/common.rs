use crate::roll::Number;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

pub type Int = i64;
pub type Float = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// The three-way test shared by every modifier that compares a rolled value
/// against a target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = "<=")]
    AtMost,
    #[default]
    #[serde(rename = "=")]
    Equal,
}

impl Comparator {
    pub fn test(self, target: Number, value: Number) -> bool {
        match self {
            Self::AtLeast => value >= target,
            Self::AtMost => value <= target,
            Self::Equal => value == target,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
            Self::Equal => "=",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    High,
    Low,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_char('h'),
            Self::Low => f.write_char('l'),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplodeMode {
    #[default]
    Explode,
    Compound,
    Penetrate,
}

/// Operators allowed between the terms of a dice expression.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DiceOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
}

impl fmt::Display for DiceOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_char('+'),
            Self::Sub => f.write_char('-'),
        }
    }
}

impl From<DiceOperator> for MathOperator {
    fn from(op: DiceOperator) -> Self {
        match op {
            DiceOperator::Add => Self::Add,
            DiceOperator::Sub => Self::Sub,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MathOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Rem,
    #[serde(rename = "**")]
    Pow,
}

impl fmt::Display for MathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "**",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathFunction {
    Floor,
    Ceil,
    Round,
    Abs,
}

impl MathFunction {
    pub fn apply(self, x: Number) -> Number {
        match self {
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
            Self::Round => x.round(),
            Self::Abs => x.abs(),
        }
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Abs => "abs",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator() {
        let four = Number::Int(4);
        assert!(Comparator::AtLeast.test(four, Number::Int(4)));
        assert!(Comparator::AtLeast.test(four, Number::Int(6)));
        assert!(!Comparator::AtLeast.test(four, Number::Int(2)));
        assert!(Comparator::AtMost.test(four, Number::Int(2)));
        assert!(!Comparator::AtMost.test(four, Number::Int(5)));
        assert!(Comparator::Equal.test(four, Number::Float(4.0)));
        assert!(!Comparator::Equal.test(four, Number::Int(3)));
    }

    #[test]
    fn test_math_function() {
        assert_eq!(MathFunction::Floor.apply(Number::Float(2.7)), Number::Int(2));
        assert_eq!(MathFunction::Ceil.apply(Number::Float(2.1)), Number::Int(3));
        assert_eq!(MathFunction::Round.apply(Number::Float(2.5)), Number::Int(3));
        assert_eq!(MathFunction::Abs.apply(Number::Int(-7)), Number::Int(7));
    }
}
