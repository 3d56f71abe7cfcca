use super::num::Number;
use super::tree::*;
use std::fmt::Display;

/// Renders a result tree as text. Every method has a plain default; renderers
/// override the pieces they decorate.
pub trait Stringify {
    fn stringify(&mut self, tree: &RollTree) -> String {
        self.str_roll_tree(tree)
    }

    fn str_result(&mut self, tree: &RollTree) -> String {
        let rendered = self.stringify(tree);
        format!("{} = {}", rendered, tree.value)
    }

    fn str_roll_tree(&mut self, tree: &RollTree) -> String {
        let roll = self.str_node(tree);
        match &tree.label {
            Some(label) => format!("{} [{}]", roll, label),
            None => roll,
        }
    }

    fn str_node(&mut self, tree: &RollTree) -> String {
        match &tree.roll {
            RollNode::Number => self.str_number(tree.value),
            RollNode::Roll(trial) => self.str_trial(tree, trial),
            RollNode::Die(die) => self.str_dice(die),
            RollNode::Group(group) => self.str_group(group),
            RollNode::DiceExpression(expr) => self.str_expression(expr),
            RollNode::Expression(expr) => self.str_expression(expr),
            RollNode::Function(function) => self.str_function(function),
            RollNode::Replacement(replacement) => self.str_replacement(replacement),
        }
    }

    fn str_number(&mut self, value: Number) -> String {
        value.to_string()
    }

    fn str_trial(&mut self, tree: &RollTree, trial: &Trial) -> String {
        let mut ret = tree.value.to_string();
        if trial.explode {
            ret.push('!');
        }
        ret
    }

    fn str_dice(&mut self, die: &DiceRoll) -> String {
        let faces = match &die.faces {
            Some(faces) => faces.value.to_string(),
            None => String::from("F"),
        };
        let rolls = die
            .rolls
            .iter()
            .map(|roll| self.stringify(roll))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}d{} ({})", die.count.value, faces, rolls)
    }

    fn str_group(&mut self, group: &GroupRoll) -> String {
        let members = group
            .rolls
            .iter()
            .map(|member| self.stringify(member))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", members)
    }

    fn str_expression<O: Display>(&mut self, expr: &ExpressionRoll<O>) -> String {
        let mut ret = self.stringify(&expr.head);
        for op in &expr.ops {
            let tail = self.stringify(&op.tail);
            ret = format!("{} {} {}", ret, op.op, tail);
        }
        ret
    }

    fn str_function(&mut self, function: &FunctionRoll) -> String {
        let inner = self.stringify(&function.expr);
        format!("{}({})", function.function, inner)
    }

    fn str_replacement(&mut self, replacement: &ReplacementRoll) -> String {
        let inner = self.stringify(&replacement.expr);
        format!("@{}({})", replacement.name, inner)
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the whole roll followed by its value.
    pub fn render(&mut self, tree: &RollTree) -> String {
        self.str_result(tree)
    }
}

impl Stringify for SimpleStringifier {}

/// Renders Markdown: discarded entries are struck through, criticals are
/// bold and matched dice are underlined.
#[derive(Default)]
pub struct MarkdownStringifier {
    in_dropped: bool,
}

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, tree: &RollTree) -> String {
        self.in_dropped = false;
        self.str_result(tree)
    }
}

impl Stringify for MarkdownStringifier {
    fn stringify(&mut self, tree: &RollTree) -> String {
        if !tree.valid && !self.in_dropped {
            self.in_dropped = true;
            let inside = self.str_roll_tree(tree);
            self.in_dropped = false;
            format!("~~{}~~", inside)
        } else {
            self.str_roll_tree(tree)
        }
    }

    fn str_result(&mut self, tree: &RollTree) -> String {
        let rendered = self.stringify(tree);
        format!("{} = `{}`", rendered, tree.value)
    }

    fn str_trial(&mut self, tree: &RollTree, trial: &Trial) -> String {
        let mut ret = tree.value.to_string();
        if trial.explode {
            ret.push('!');
        }
        if trial.critical.is_some() {
            ret = format!("**{}**", ret);
        }
        if trial.matched {
            ret = format!("__{}__", ret);
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Int;
    use crate::roll::{
        ctx::{RollContext, DEFAULT_MAX_ROLLS},
        roller::ScriptedSource,
    };

    fn roll(input: &str, faces: &[Int]) -> RollTree {
        let node = crate::parse::parse(input).unwrap();
        let mut source = ScriptedSource::faces(6, faces);
        RollContext::new(DEFAULT_MAX_ROLLS, &mut source)
            .eval(&node)
            .unwrap()
    }

    macro_rules! check {
        ($cls:ident, $input:expr, $faces:expr, $expected:expr) => {
            let tree = roll($input, $faces);
            let actual = $cls::new().render(&tree);
            assert_eq!(&actual, $expected);
        };
    }

    #[test]
    fn test_simple_stringify() {
        check!(SimpleStringifier, "2 + 3", &[1], "2 + 3 = 5");
        check!(SimpleStringifier, "2d6", &[3, 5], "2d6 (3, 5) = 8");
        check!(SimpleStringifier, "4d6kh3", &[3, 6, 1, 4], "4d6 (3, 6, 1, 4) = 13");
        check!(SimpleStringifier, "3d6!", &[6, 3, 2, 5], "3d6 (6!, 5, 3, 2) = 16");
        check!(SimpleStringifier, "1d6 [fire] + 2", &[4], "1d6 (4) [fire] + 2 = 6");
        check!(SimpleStringifier, "floor(7 / 2)", &[1], "floor(7 / 2) = 3");
        check!(SimpleStringifier, "4dF", &[1, 3, 5, 6], "4dF (-1, 0, 1, 1) = 1");
    }

    #[test]
    fn test_markdown_stringify() {
        check!(MarkdownStringifier, "2 + 3", &[1], "2 + 3 = `5`");
        check!(MarkdownStringifier, "2d6", &[3, 5], "2d6 (3, 5) = `8`");
        check!(MarkdownStringifier, "4d6kh3", &[3, 6, 1, 4], "4d6 (3, **6**, ~~**1**~~, 4) = `13`");
        check!(MarkdownStringifier, "3d6!", &[6, 3, 2, 5], "3d6 (**6!**, 5, 3, 2) = `16`");
        check!(MarkdownStringifier, "{1d6, 1d6}kh1", &[2, 5], "{~~1d6 (2)~~, 1d6 (5)} = `5`");
        check!(MarkdownStringifier, "4d6m", &[3, 3, 5, 3], "4d6 (__3__, __3__, 5, __3__) = `14`");
    }
}
