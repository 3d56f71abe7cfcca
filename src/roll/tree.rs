//! The result tree produced by evaluating a syntax tree.
//!
//! Every node carries the shared bookkeeping in [RollTree] (value, validity,
//! success tallies, position) and a [RollNode] describing what produced it.
//! Dropped or rerolled entries stay in place with `valid` unset so renderers
//! can still show them.

use super::num::Number;
use crate::common::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollTree {
    #[serde(flatten)]
    pub roll: RollNode,
    pub value: Number,
    pub valid: bool,
    pub successes: usize,
    pub failures: usize,
    pub success: Option<bool>,
    pub order: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RollTree {
    pub fn new(roll: RollNode, value: Number) -> Self {
        Self {
            roll,
            value,
            valid: true,
            successes: 0,
            failures: 0,
            success: None,
            order: 0,
            label: None,
        }
    }

    pub fn number(value: Number) -> Self {
        Self::new(RollNode::Number, value)
    }

    pub fn from_trial(trial: Trial, order: usize) -> Self {
        let value = trial.roll.into();
        let mut ret = Self::new(RollNode::Roll(trial), value);
        ret.order = order;
        ret
    }

    pub fn as_trial(&self) -> Option<&Trial> {
        match &self.roll {
            RollNode::Roll(trial) => Some(trial),
            _ => None,
        }
    }

    pub fn as_trial_mut(&mut self) -> Option<&mut Trial> {
        match &mut self.roll {
            RollNode::Roll(trial) => Some(trial),
            _ => None,
        }
    }

    /// The raw face for a single trial, the resolved value for anything else.
    pub fn face(&self) -> Number {
        match &self.roll {
            RollNode::Roll(trial) => trial.roll.into(),
            _ => self.value,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.roll.name()
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Collects the individual die entries beneath a die or dice expression.
    /// Literal terms are skipped; any other node stands in for itself.
    pub(crate) fn dice_pool_mut(&mut self) -> Vec<&mut RollTree> {
        let mut pool = Vec::new();
        self.collect_pool(&mut pool);
        pool
    }

    fn collect_pool<'a>(&'a mut self, pool: &mut Vec<&'a mut RollTree>) {
        if matches!(
            self.roll,
            RollNode::Die(_) | RollNode::DiceExpression(_) | RollNode::Number
        ) {
            match &mut self.roll {
                RollNode::Die(die) => pool.extend(die.rolls.iter_mut()),
                RollNode::DiceExpression(expr) => {
                    expr.head.collect_pool(pool);
                    for op in &mut expr.ops {
                        op.tail.collect_pool(pool);
                    }
                }
                _ => {}
            }
        } else {
            pool.push(self);
        }
    }

    /// Recomputes the value of a die or dice expression as the sum of the
    /// valid entries in its pool, after a group-level modifier has changed
    /// which entries are valid. Literal terms are not part of the pool and do
    /// not count.
    pub(crate) fn refold(&mut self) {
        match &mut self.roll {
            RollNode::Die(die) => self.value = sum_valid(&die.rolls),
            RollNode::DiceExpression(expr) => {
                let terms = std::iter::once(&mut *expr.head)
                    .chain(expr.ops.iter_mut().map(|op| &mut op.tail));
                let mut value = Number::ZERO;
                for term in terms {
                    value = value + term.pooled_value();
                }
                self.value = value;
            }
            _ => {}
        }
    }

    fn pooled_value(&mut self) -> Number {
        match self.roll {
            RollNode::Die(_) | RollNode::DiceExpression(_) => {
                self.refold();
                self.value
            }
            RollNode::Number => Number::ZERO,
            _ if self.valid => self.value,
            _ => Number::ZERO,
        }
    }
}

pub(crate) fn sum_valid<'a, I>(entries: I) -> Number
where
    I: IntoIterator<Item = &'a RollTree>,
{
    entries
        .into_iter()
        .filter(|entry| entry.valid)
        .map(|entry| entry.value)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RollNode {
    Number,
    Roll(Trial),
    Die(DiceRoll),
    Group(GroupRoll),
    #[serde(rename = "diceexpr")]
    DiceExpression(ExpressionRoll<DiceOperator>),
    Expression(ExpressionRoll<MathOperator>),
    #[serde(rename = "mathfunction")]
    Function(FunctionRoll),
    Replacement(ReplacementRoll),
}

impl RollNode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Roll(_) => "roll",
            Self::Die(_) => "die",
            Self::Group(_) => "group",
            Self::DiceExpression(_) => "dice expression",
            Self::Expression(_) => "expression",
            Self::Function(_) => "math function",
            Self::Replacement(_) => "replacement",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    Standard(Int),
    Fate,
}

impl DieKind {
    pub fn min(self) -> Int {
        match self {
            Self::Standard(_) => 1,
            Self::Fate => -1,
        }
    }

    pub fn max(self) -> Int {
        match self {
            Self::Standard(faces) => faces,
            Self::Fate => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Critical {
    Success,
    Failure,
}

/// A single rolled die.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Trial {
    pub die: DieKind,
    pub roll: Int,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<Critical>,
    pub matched: bool,
    pub drop: bool,
    pub reroll: bool,
    pub explode: bool,
}

impl Trial {
    pub fn new(die: DieKind, roll: Int) -> Self {
        Self {
            die,
            roll,
            critical: None,
            matched: false,
            drop: false,
            reroll: false,
            explode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiceRoll {
    pub count: Box<RollTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faces: Option<Box<RollTree>>,
    pub rolls: Vec<RollTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRoll {
    pub rolls: Vec<RollTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionRoll<O> {
    pub head: Box<RollTree>,
    pub ops: Vec<RolledOperation<O>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolledOperation<O> {
    pub op: O,
    pub tail: RollTree,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionRoll {
    #[serde(rename = "op")]
    pub function: MathFunction,
    pub expr: Box<RollTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplacementRoll {
    pub name: String,
    pub expr: Box<RollTree>,
}
