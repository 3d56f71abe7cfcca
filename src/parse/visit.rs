use crate::common::*;
use crate::parse::ast::{self, NodeKind};
use crate::roll::Number;

pub trait AstVisitor {
    type Output;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Self::Output
    where
        T: Accept<Self>,
    {
        node.accept(self)
    }

    fn visit_number(&mut self, value: Number) -> Self::Output;

    fn visit_die(&mut self, die: &ast::Die) -> Self::Output;

    fn visit_dice_expression(&mut self, expr: &ast::Expression<DiceOperator>) -> Self::Output;

    fn visit_expression(&mut self, expr: &ast::Expression<MathOperator>) -> Self::Output;

    fn visit_group(&mut self, group: &ast::Group) -> Self::Output;

    fn visit_function(&mut self, function: &ast::Function) -> Self::Output;

    fn visit_replacement(&mut self, replacement: &ast::Replacement) -> Self::Output;

    fn visit_inline(&mut self, expr: &ast::Node) -> Self::Output;

    fn visit_unsupported(&mut self) -> Self::Output;
}

pub trait Accept<V: AstVisitor + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<V: AstVisitor + ?Sized> Accept<V> for ast::Node {
    fn accept(&self, v: &mut V) -> V::Output {
        v.visit(&self.kind)
    }
}

impl<V: AstVisitor + ?Sized> Accept<V> for NodeKind {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Number { value } => v.visit_number(*value),
            Self::Die(x) => v.visit_die(x),
            Self::DiceExpression(x) => v.visit_dice_expression(x),
            Self::Expression(x) => v.visit_expression(x),
            Self::Group(x) => v.visit_group(x),
            Self::Function(x) => v.visit_function(x),
            Self::Replacement(x) => v.visit_replacement(x),
            Self::Inline { expr } => v.visit_inline(expr),
            Self::Unsupported => v.visit_unsupported(),
        }
    }
}
