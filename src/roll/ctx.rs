use super::{
    num::Number,
    ops::{self, Condition, Lookup},
    resolver::Transform,
    roller::{self, RandomSource},
    tree::*,
};
use crate::common::*;
use crate::error::{RResult, RollError};
use crate::parse::{
    ast::{self, Node},
    visit::AstVisitor,
};
use std::borrow::BorrowMut;
use std::collections::HashMap;

pub const DEFAULT_MAX_ROLLS: usize = 1000;

/// Evaluates syntax trees against a random source.
///
/// Evaluation is depth-first and left to right, so a deterministic source
/// always produces the same result tree for the same syntax tree.
pub struct RollContext<'a, S: ?Sized> {
    max_rolls: usize,
    source: &'a mut S,
    transforms: HashMap<String, Transform>,
}

impl<'a, S: RandomSource + ?Sized> RollContext<'a, S> {
    pub fn new(max_rolls: usize, source: &'a mut S) -> Self {
        Self {
            max_rolls,
            source,
            transforms: HashMap::new(),
        }
    }

    /// Supplies the transforms used by replacement nodes. Replacements with
    /// no transform here fail to evaluate.
    pub fn with_transforms(mut self, transforms: HashMap<String, Transform>) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn eval(&mut self, node: &Node) -> RResult<RollTree> {
        let mut ret = self.visit(node)?;
        if let Some(label) = &node.label {
            ret.label = Some(label.clone());
        }
        Ok(ret)
    }

    fn eval_value(&mut self, node: &Node) -> RResult<Number> {
        self.eval(node).map(|tree| tree.value)
    }

    fn condition(&mut self, target: &ast::Target) -> RResult<Condition> {
        let value = self.eval_value(&target.expr)?;
        Ok(Condition::new(target.comparator, value))
    }

    fn optional_condition(&mut self, target: Option<&ast::Target>) -> RResult<Option<Condition>> {
        target.map(|t| self.condition(t)).transpose()
    }

    fn apply_die_modifier(&mut self, rolls: &mut Vec<RollTree>, modifier: &ast::Modifier) -> RResult<()> {
        match modifier {
            ast::Modifier::Keep(kd) => {
                let count = self.eval_value(&kd.expr)?;
                ops::keep(rolls, kd.direction, count, Lookup::Face);
            }
            ast::Modifier::Drop(kd) => {
                let count = self.eval_value(&kd.expr)?;
                ops::drop(rolls, kd.direction, count, Lookup::Face);
            }
            ast::Modifier::Success(target) => {
                let condition = self.condition(target)?;
                ops::success(rolls, condition, Lookup::Face);
            }
            ast::Modifier::Failure(target) => {
                let condition = self.condition(target)?;
                ops::failure(rolls, condition, Lookup::Face);
            }
            ast::Modifier::Critical(target) => {
                let condition = self.condition(target)?;
                ops::critical(rolls, Critical::Success, condition);
            }
            ast::Modifier::CriticalFailure(target) => {
                let condition = self.condition(target)?;
                ops::critical(rolls, Critical::Failure, condition);
            }
            ast::Modifier::Explode(explode) => {
                let condition = self.optional_condition(explode.target.as_ref())?;
                ops::explode(&mut *self.source, rolls, explode.mode, condition, modifier.name())?;
            }
            ast::Modifier::Reroll(reroll) => {
                let condition = self.optional_condition(reroll.target.as_ref())?;
                ops::reroll(&mut *self.source, rolls, reroll.once, condition, modifier.name())?;
            }
            ast::Modifier::Unsupported => {
                return Err(RollError::UnsupportedModifier {
                    modifier: modifier.name(),
                    scope: "die",
                })
            }
        }
        Ok(())
    }

    fn apply_group_modifier<E: BorrowMut<RollTree>>(
        &mut self,
        entries: &mut [E],
        modifier: &ast::Modifier,
    ) -> RResult<()> {
        match modifier {
            ast::Modifier::Keep(kd) => {
                let count = self.eval_value(&kd.expr)?;
                ops::keep(entries, kd.direction, count, Lookup::Value);
            }
            ast::Modifier::Drop(kd) => {
                let count = self.eval_value(&kd.expr)?;
                ops::drop(entries, kd.direction, count, Lookup::Value);
            }
            ast::Modifier::Success(target) => {
                let condition = self.condition(target)?;
                ops::success(entries, condition, Lookup::Value);
            }
            ast::Modifier::Failure(target) => {
                let condition = self.condition(target)?;
                ops::failure(entries, condition, Lookup::Value);
            }
            _ => {
                return Err(RollError::UnsupportedModifier {
                    modifier: modifier.name(),
                    scope: "group",
                })
            }
        }
        Ok(())
    }
}

fn apply_math(op: MathOperator, lhs: Number, rhs: Number) -> RResult<Number> {
    Ok(match op {
        MathOperator::Add => lhs + rhs,
        MathOperator::Sub => lhs - rhs,
        MathOperator::Mul => lhs * rhs,
        MathOperator::Div if rhs.is_zero() => return Err(RollError::ZeroDivision),
        MathOperator::Div => lhs / rhs,
        MathOperator::Rem if rhs.is_zero() => return Err(RollError::ZeroModulo),
        MathOperator::Rem => lhs % rhs,
        MathOperator::Pow => lhs.pow(rhs),
    })
}

impl<S: RandomSource + ?Sized> AstVisitor for RollContext<'_, S> {
    type Output = RResult<RollTree>;

    fn visit_number(&mut self, value: Number) -> Self::Output {
        Ok(RollTree::number(value))
    }

    fn visit_die(&mut self, die: &ast::Die) -> Self::Output {
        let count = self.eval(&die.count)?;
        if count.value > Number::from(self.max_rolls) {
            return Err(RollError::TooManyRolls {
                count: count.value,
                max: self.max_rolls,
            });
        }
        let n = usize::try_from(count.value.floor().as_int()).unwrap_or(0);

        let (faces, kind) = match &die.die {
            ast::Faces::Fate => (None, DieKind::Fate),
            ast::Faces::Sides(node) => {
                let faces = self.eval(node)?;
                let sides = faces.value.floor();
                if sides < Number::Int(1) {
                    return Err(RollError::InvalidFaces(faces.value));
                }
                (Some(Box::new(faces)), DieKind::Standard(sides.as_int()))
            }
        };

        tracing::trace!(count = n, ?kind, "rolling dice");
        let mut rolls: Vec<RollTree> = (0..n)
            .map(|i| roller::roll_kind(&mut *self.source, kind, i))
            .collect();

        for modifier in &die.mods {
            self.apply_die_modifier(&mut rolls, modifier)?;
        }

        let has_targets = !die.targets.is_empty();
        let mut successes = 0;
        let mut failures = 0;
        if has_targets {
            for target in &die.targets {
                self.apply_die_modifier(&mut rolls, target)?;
            }
            for entry in &mut rolls {
                entry.value = Number::from(entry.successes) - Number::from(entry.failures);
                entry.success = Some(entry.value > Number::ZERO);
                if entry.valid {
                    successes += entry.successes;
                    failures += entry.failures;
                }
            }
        }

        let mut groups = None;
        if let Some(matching) = &die.matching {
            let min = self.eval_value(&matching.min)?;
            let filter = self.optional_condition(matching.target.as_ref())?;
            let matched = ops::mark_matches(&mut rolls, min, filter);
            if matching.count {
                groups = Some(matched);
            }
        }

        if let Some(order) = die.sort {
            ops::sort(&mut rolls, order);
        }

        let value = match groups {
            Some(groups) => Number::from(groups),
            None if has_targets => Number::from(successes) - Number::from(failures),
            None => sum_valid(&rolls),
        };

        let mut ret = RollTree::new(
            RollNode::Die(DiceRoll {
                count: Box::new(count),
                faces,
                rolls,
            }),
            value,
        );
        ret.successes = successes;
        ret.failures = failures;
        if has_targets {
            ret.success = Some(value > Number::ZERO);
        }
        Ok(ret)
    }

    fn visit_dice_expression(&mut self, expr: &ast::Expression<DiceOperator>) -> Self::Output {
        let head = self.eval(&expr.head)?;
        let mut value = head.value;

        let mut ops = Vec::with_capacity(expr.ops.len());
        for (i, op) in expr.ops.iter().enumerate() {
            let mut tail = self.eval(&op.tail)?;
            tail.order = i + 1;
            value = match op.op {
                DiceOperator::Add => value + tail.value,
                DiceOperator::Sub => value - tail.value,
            };
            ops.push(RolledOperation { op: op.op, tail });
        }

        Ok(RollTree::new(
            RollNode::DiceExpression(ExpressionRoll {
                head: Box::new(head),
                ops,
            }),
            value,
        ))
    }

    fn visit_expression(&mut self, expr: &ast::Expression<MathOperator>) -> Self::Output {
        let head = self.eval(&expr.head)?;
        let mut value = head.value;

        let mut ops = Vec::with_capacity(expr.ops.len());
        for (i, op) in expr.ops.iter().enumerate() {
            let mut tail = self.eval(&op.tail)?;
            tail.order = i + 1;
            value = apply_math(op.op, value, tail.value)?;
            ops.push(RolledOperation { op: op.op, tail });
        }

        Ok(RollTree::new(
            RollNode::Expression(ExpressionRoll {
                head: Box::new(head),
                ops,
            }),
            value,
        ))
    }

    fn visit_group(&mut self, group: &ast::Group) -> Self::Output {
        let mut members = Vec::with_capacity(group.rolls.len());
        for (i, node) in group.rolls.iter().enumerate() {
            let mut member = self.eval(node)?;
            member.order = i;
            members.push(member);
        }

        let has_target = group
            .mods
            .iter()
            .any(|m| matches!(m, ast::Modifier::Success(_) | ast::Modifier::Failure(_)));
        let mut successes = 0;
        let mut failures = 0;

        let flatten = members.len() == 1
            && matches!(
                members[0].roll,
                RollNode::Die(_) | RollNode::DiceExpression(_)
            );
        if flatten && !group.mods.is_empty() {
            let member = &mut members[0];
            let mut pool = member.dice_pool_mut();
            for modifier in &group.mods {
                self.apply_group_modifier(&mut pool, modifier)?;
            }
            if has_target {
                (successes, failures) = ops::tally(&mut pool);
            }
            member.refold();
        } else {
            for modifier in &group.mods {
                self.apply_group_modifier(&mut members, modifier)?;
            }
            if has_target {
                (successes, failures) = ops::tally(&mut members);
            }
        }

        let value = if has_target {
            Number::from(successes) - Number::from(failures)
        } else {
            sum_valid(&members)
        };

        let mut ret = RollTree::new(RollNode::Group(GroupRoll { rolls: members }), value);
        ret.successes = successes;
        ret.failures = failures;
        if has_target {
            ret.success = Some(value > Number::ZERO);
        }
        Ok(ret)
    }

    fn visit_function(&mut self, function: &ast::Function) -> Self::Output {
        let expr = self.eval(&function.expr)?;
        let value = function.function.apply(expr.value);
        Ok(RollTree::new(
            RollNode::Function(FunctionRoll {
                function: function.function,
                expr: Box::new(expr),
            }),
            value,
        ))
    }

    fn visit_replacement(&mut self, replacement: &ast::Replacement) -> Self::Output {
        let expr = self.eval(&replacement.expr)?;
        let transform = self
            .transforms
            .get(&replacement.name)
            .ok_or_else(|| RollError::UnresolvedReplacement(replacement.name.clone()))?;
        let value = transform(expr.value);
        Ok(RollTree::new(
            RollNode::Replacement(ReplacementRoll {
                name: replacement.name.clone(),
                expr: Box::new(expr),
            }),
            value,
        ))
    }

    fn visit_inline(&mut self, expr: &Node) -> Self::Output {
        self.eval(expr)
    }

    fn visit_unsupported(&mut self) -> Self::Output {
        Err(RollError::UnsupportedNode)
    }
}
