//! The syntax tree consumed by the evaluator.
//!
//! Trees are normally produced by [crate::parse], but they can also be built
//! by hand or deserialized from JSON emitted by another parser. Every node and
//! modifier carries a `type` discriminator; discriminators this crate does not
//! know deserialize to an `Unsupported` variant, which the evaluator rejects.

use crate::common::*;
use crate::roll::Number;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Number {
        value: Number,
    },
    Die(Die),
    #[serde(rename = "diceexpr")]
    DiceExpression(Expression<DiceOperator>),
    Expression(Expression<MathOperator>),
    Group(Group),
    #[serde(rename = "mathfunction")]
    Function(Function),
    Replacement(Replacement),
    Inline {
        expr: Box<Node>,
    },
    #[serde(other)]
    Unsupported,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, label: None }
    }

    pub fn number(value: impl Into<Number>) -> Self {
        Self::new(NodeKind::Number {
            value: value.into(),
        })
    }

    pub fn die(die: Die) -> Self {
        Self::new(NodeKind::Die(die))
    }

    pub fn dice_expression(head: Node, ops: Vec<Operation<DiceOperator>>) -> Self {
        Self::new(NodeKind::DiceExpression(Expression::new(head, ops)))
    }

    pub fn expression(head: Node, ops: Vec<Operation<MathOperator>>) -> Self {
        Self::new(NodeKind::Expression(Expression::new(head, ops)))
    }

    pub fn group(rolls: NonEmpty<Node>, mods: Vec<Modifier>) -> Self {
        Self::new(NodeKind::Group(Group { rolls, mods }))
    }

    pub fn function(function: MathFunction, expr: Node) -> Self {
        Self::new(NodeKind::Function(Function {
            function,
            expr: Box::new(expr),
        }))
    }

    pub fn replacement(name: impl Into<String>, expr: Node) -> Self {
        Self::new(NodeKind::Replacement(Replacement {
            name: name.into(),
            expr: Box::new(expr),
        }))
    }

    pub fn inline(expr: Node) -> Self {
        Self::new(NodeKind::Inline {
            expr: Box::new(expr),
        })
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether the node rolls dice at its top level, which decides if a
    /// `+`/`-` chain is a dice expression or plain arithmetic.
    pub(crate) fn is_dice_bearing(&self) -> bool {
        match &self.kind {
            NodeKind::Die(_) | NodeKind::Group(_) | NodeKind::DiceExpression(_) => true,
            NodeKind::Inline { expr } => expr.is_dice_bearing(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Die {
    pub count: Box<Node>,
    pub die: Faces,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Modifier>,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub matching: Option<Match>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl Die {
    pub fn new(count: Node, die: Faces) -> Self {
        Self {
            count: Box::new(count),
            die,
            mods: Vec::new(),
            targets: Vec::new(),
            matching: None,
            sort: None,
        }
    }

    pub fn standard(count: Int, faces: Int) -> Self {
        Self::new(Node::number(count), Faces::Sides(Box::new(Node::number(faces))))
    }

    pub fn fate(count: Int) -> Self {
        Self::new(Node::number(count), Faces::Fate)
    }

    pub fn with_mod(mut self, modifier: Modifier) -> Self {
        self.mods.push(modifier);
        self
    }

    pub fn with_target(mut self, target: Modifier) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_match(mut self, matching: Match) -> Self {
        self.matching = Some(matching);
        self
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faces {
    Fate,
    Sides(Box<Node>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression<O> {
    pub head: Box<Node>,
    #[serde(default = "Vec::new")]
    pub ops: Vec<Operation<O>>,
}

impl<O> Expression<O> {
    pub fn new(head: Node, ops: Vec<Operation<O>>) -> Self {
        Self {
            head: Box::new(head),
            ops,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation<O> {
    pub op: O,
    pub tail: Node,
}

impl<O> Operation<O> {
    pub fn new(op: O, tail: Node) -> Self {
        Self { op, tail }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub rolls: NonEmpty<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(rename = "op")]
    pub function: MathFunction,
    pub expr: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    pub name: String,
    pub expr: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Modifier {
    Keep(KeepDrop),
    Drop(KeepDrop),
    Success(Target),
    Failure(Target),
    #[serde(rename = "crit")]
    Critical(Target),
    #[serde(rename = "critfail")]
    CriticalFailure(Target),
    Explode(Explode),
    Reroll(Reroll),
    #[serde(other)]
    Unsupported,
}

impl Modifier {
    pub fn keep(direction: Direction, count: Node) -> Self {
        Self::Keep(KeepDrop::new(direction, count))
    }

    pub fn drop(direction: Direction, count: Node) -> Self {
        Self::Drop(KeepDrop::new(direction, count))
    }

    pub fn success(comparator: Comparator, value: Node) -> Self {
        Self::Success(Target::new(comparator, value))
    }

    pub fn failure(comparator: Comparator, value: Node) -> Self {
        Self::Failure(Target::new(comparator, value))
    }

    pub fn critical(comparator: Comparator, value: Node) -> Self {
        Self::Critical(Target::new(comparator, value))
    }

    pub fn critical_failure(comparator: Comparator, value: Node) -> Self {
        Self::CriticalFailure(Target::new(comparator, value))
    }

    pub fn explode(mode: ExplodeMode, target: Option<Target>) -> Self {
        Self::Explode(Explode { mode, target })
    }

    pub fn reroll(once: bool, target: Option<Target>) -> Self {
        Self::Reroll(Reroll { once, target })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Keep(_) => "keep",
            Self::Drop(_) => "drop",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
            Self::Critical(_) => "critical",
            Self::CriticalFailure(_) => "critical failure",
            Self::Explode(e) => match e.mode {
                ExplodeMode::Explode => "explode",
                ExplodeMode::Compound => "compound",
                ExplodeMode::Penetrate => "penetrate",
            },
            Self::Reroll(r) if r.once => "reroll once",
            Self::Reroll(_) => "reroll",
            Self::Unsupported => "unsupported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepDrop {
    #[serde(rename = "highlow")]
    pub direction: Direction,
    pub expr: Box<Node>,
}

impl KeepDrop {
    pub fn new(direction: Direction, count: Node) -> Self {
        Self {
            direction,
            expr: Box::new(count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(rename = "mod", default)]
    pub comparator: Comparator,
    pub expr: Box<Node>,
}

impl Target {
    pub fn new(comparator: Comparator, value: Node) -> Self {
        Self {
            comparator,
            expr: Box::new(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explode {
    #[serde(default)]
    pub mode: ExplodeMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reroll {
    #[serde(default)]
    pub once: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub min: Box<Node>,
    #[serde(default)]
    pub count: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

impl Match {
    pub fn new(min: Node) -> Self {
        Self {
            min: Box::new(min),
            count: false,
            target: None,
        }
    }

    pub fn counted(mut self) -> Self {
        self.count = true;
        self
    }

    pub fn filtered(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }
}
