use super::{ast::*, lexer::*};
use crate::common::*;
use logos_iter::LogosIter;
use std::fmt;
use std::ops::Range;

type PResult<T = Node> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<TokenKind>,
    },
    UnexpectedString {
        expected: Vec<TokenKind>,
    },
    TrailingInput(TokenKind),
    InvalidNumber,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                found: Some(found),
                expected,
            } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedToken {
                found: None,
                expected,
            } => {
                write!(f, "unexpected end of input, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::TrailingInput(found) => write!(f, "unexpected {} after the end of the roll", found),
            Self::InvalidNumber => write!(f, "number is out of range"),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        Ok(())
    } else if len == 1 {
        f.write_str(expected[0].as_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0].as_str(), expected[1].as_str())
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp.as_str())?;
        }
        write!(f, "or {}", expected[len - 1].as_str())
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    const ATOMS: &'static [TokenKind] = &[
        TokenKind::Integer,
        TokenKind::Decimal,
        TokenKind::Dice,
        TokenKind::LeftParen,
        TokenKind::LeftBrace,
        TokenKind::InlineOpen,
    ];

    const LITERALS: &'static [TokenKind] = &[TokenKind::Integer, TokenKind::Decimal];

    /// Tokens that may begin a modifier value without a leading comparator.
    const UNSIGNED_VALUES: &'static [TokenKind] =
        &[TokenKind::Integer, TokenKind::Decimal, TokenKind::LeftParen];

    pub fn new(s: &'a str) -> Self {
        Self { lexer: lexer(s) }
    }

    pub fn parse(mut self) -> PResult {
        let node = self.parse_node()?;
        match self.advance() {
            None => Ok(node),
            Some(found) => self.error(ParseErrorKind::TrailingInput(found)),
        }
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn peek(&mut self) -> Option<TokenKind> {
        self.lexer.peek().copied()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.peek().map_or(false, |peeked| options.contains(&peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        match self.advance() {
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnexpectedString { expected }),
            found => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn parse_node(&mut self) -> PResult {
        self.parse_addition()
    }

    fn parse_addition(&mut self) -> PResult {
        let head = self.parse_multiplication()?;

        let mut ops = Vec::new();
        while self.matches_any(TokenKind::ADDITION_OPS) {
            let op = match self.advance() {
                Some(TokenKind::Minus) => DiceOperator::Sub,
                _ => DiceOperator::Add,
            };
            let tail = self.parse_multiplication()?;
            ops.push(Operation::new(op, tail));
        }

        Ok(if ops.is_empty() {
            head
        } else if head.is_dice_bearing() || ops.iter().any(|op| op.tail.is_dice_bearing()) {
            Node::dice_expression(head, ops)
        } else {
            let ops = ops
                .into_iter()
                .map(|op| Operation::new(op.op.into(), op.tail))
                .collect();
            Node::expression(head, ops)
        })
    }

    fn parse_multiplication(&mut self) -> PResult {
        let head = self.parse_unary_prefix()?;

        let mut ops = Vec::new();
        while self.matches_any(TokenKind::MULTIPLICATION_OPS) {
            let op = match self.advance() {
                Some(TokenKind::Star) => MathOperator::Mul,
                Some(TokenKind::Slash) => MathOperator::Div,
                _ => MathOperator::Rem,
            };
            let tail = self.parse_unary_prefix()?;
            ops.push(Operation::new(op, tail));
        }

        Ok(if ops.is_empty() {
            head
        } else {
            Node::expression(head, ops)
        })
    }

    /// `**` is right-associative and binds tighter than a leading minus, so
    /// `-2 ** 2` is `-(2 ** 2)`.
    fn parse_power(&mut self) -> PResult {
        let base = self.parse_term()?;

        if self.matches(TokenKind::StarStar) {
            self.advance();
            let exponent = self.parse_unary_prefix()?;
            Ok(Node::expression(
                base,
                vec![Operation::new(MathOperator::Pow, exponent)],
            ))
        } else {
            Ok(base)
        }
    }

    fn parse_unary_prefix(&mut self) -> PResult {
        if self.matches(TokenKind::Minus) {
            self.advance();
            let operand = self.parse_unary_prefix()?;
            Ok(match operand.kind {
                NodeKind::Number { value } if operand.label.is_none() => Node::number(-value),
                _ => Node::expression(
                    Node::number(-1),
                    vec![Operation::new(MathOperator::Mul, operand)],
                ),
            })
        } else if self.matches(TokenKind::Plus) {
            self.advance();
            self.parse_unary_prefix()
        } else {
            self.parse_power()
        }
    }

    fn parse_term(&mut self) -> PResult {
        let mut node = self.parse_atom()?;

        while self.matches(TokenKind::Label) {
            let label = self.parse_label()?;
            node.label = Some(match node.label.take() {
                Some(existing) => format!("{} {}", existing, label),
                None => label,
            });
        }

        Ok(node)
    }

    fn parse_label(&mut self) -> PResult<String> {
        self.consume(TokenKind::Label)?;
        let slice = self.lexer.slice();
        Ok(slice[1..slice.len() - 1].trim().to_string())
    }

    fn parse_atom(&mut self) -> PResult {
        match self.peek() {
            Some(TokenKind::Integer | TokenKind::Decimal) => {
                let count = self.parse_literal()?;
                self.parse_dice_or(count)
            }
            Some(TokenKind::Dice) => self.parse_dice(Node::number(1)),
            Some(TokenKind::LeftParen) => {
                let inner = self.parse_parenthetical()?;
                self.parse_dice_or(inner)
            }
            Some(TokenKind::LeftBrace) => self.parse_group(),
            Some(TokenKind::InlineOpen) => self.parse_inline(),
            Some(TokenKind::Replacement) => self.parse_replacement(),
            Some(kind) if TokenKind::FUNCTIONS.contains(&kind) => self.parse_function(),
            _ => self.unexpected_token(Self::ATOMS.to_vec()),
        }
    }

    fn parse_literal(&mut self) -> PResult {
        if !self.matches_any(Self::LITERALS) {
            return self.unexpected_token(Self::LITERALS.to_vec());
        }

        let kind = self.advance();
        let slice = self.lexer.slice();
        let value = match kind {
            Some(TokenKind::Integer) => slice.parse::<Int>().map(Node::number).ok(),
            _ => slice.parse::<Float>().map(Node::number).ok(),
        };
        match value {
            Some(node) => Ok(node),
            None => self.error(ParseErrorKind::InvalidNumber),
        }
    }

    fn parse_parenthetical(&mut self) -> PResult {
        self.consume(TokenKind::LeftParen)?;
        let inner = self.parse_node()?;
        self.consume(TokenKind::RightParen)?;
        Ok(inner)
    }

    fn parse_dice_or(&mut self, count: Node) -> PResult {
        if self.matches(TokenKind::Dice) {
            self.parse_dice(count)
        } else {
            Ok(count)
        }
    }

    fn parse_dice(&mut self, count: Node) -> PResult {
        self.consume(TokenKind::Dice)?;

        let faces = match self.peek() {
            Some(TokenKind::Integer | TokenKind::Decimal) => {
                Faces::Sides(Box::new(self.parse_literal()?))
            }
            Some(TokenKind::Percent) => {
                self.advance();
                Faces::Sides(Box::new(Node::number(100)))
            }
            Some(TokenKind::Fate) => {
                self.advance();
                Faces::Fate
            }
            Some(TokenKind::LeftParen) => Faces::Sides(Box::new(self.parse_parenthetical()?)),
            _ => {
                return self.unexpected_token(vec![
                    TokenKind::Integer,
                    TokenKind::Percent,
                    TokenKind::Fate,
                    TokenKind::LeftParen,
                ])
            }
        };

        let mut die = Die::new(count, faces);
        self.parse_dice_ops(&mut die)?;
        Ok(Node::die(die))
    }

    fn parse_dice_ops(&mut self, die: &mut Die) -> PResult<()> {
        while let Some(kind) = self.peek() {
            match kind {
                k if TokenKind::KEEP_DROP.contains(&k) => die.mods.push(self.parse_keep_drop()?),
                k if TokenKind::COMPARATORS.contains(&k) => {
                    die.targets.push(self.parse_success()?)
                }
                TokenKind::Explode | TokenKind::Compound | TokenKind::Penetrate => {
                    die.mods.push(self.parse_explode()?)
                }
                TokenKind::Reroll | TokenKind::RerollOnce => die.mods.push(self.parse_reroll()?),
                TokenKind::CritSuccess | TokenKind::CritFailure => {
                    die.mods.push(self.parse_critical()?)
                }
                TokenKind::Failure => die.targets.push(self.parse_failure()?),
                TokenKind::Sort | TokenKind::SortAscending | TokenKind::SortDescending => {
                    die.sort = Some(self.parse_sort())
                }
                TokenKind::Match | TokenKind::MatchCount => {
                    die.matching = Some(self.parse_match()?)
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn parse_group(&mut self) -> PResult {
        self.consume(TokenKind::LeftBrace)?;

        let mut rolls = NonEmpty::new(self.parse_node()?);
        while self.matches(TokenKind::Comma) {
            self.advance();
            rolls.push(self.parse_node()?);
        }
        self.consume(TokenKind::RightBrace)?;

        let mut mods = Vec::new();
        while let Some(kind) = self.peek() {
            match kind {
                k if TokenKind::KEEP_DROP.contains(&k) => mods.push(self.parse_keep_drop()?),
                k if TokenKind::COMPARATORS.contains(&k) => mods.push(self.parse_success()?),
                TokenKind::Failure => mods.push(self.parse_failure()?),
                _ => break,
            }
        }

        Ok(Node::group(rolls, mods))
    }

    fn parse_inline(&mut self) -> PResult {
        self.consume(TokenKind::InlineOpen)?;
        let inner = self.parse_node()?;
        self.consume(TokenKind::InlineClose)?;
        Ok(Node::inline(inner))
    }

    fn parse_function(&mut self) -> PResult {
        let function = match self.advance() {
            Some(TokenKind::Floor) => MathFunction::Floor,
            Some(TokenKind::Ceil) => MathFunction::Ceil,
            Some(TokenKind::Round) => MathFunction::Round,
            _ => MathFunction::Abs,
        };
        let inner = self.parse_parenthetical()?;
        Ok(Node::function(function, inner))
    }

    fn parse_replacement(&mut self) -> PResult {
        self.consume(TokenKind::Replacement)?;
        let name = self.lexer.slice()[1..].to_string();
        let inner = self.parse_parenthetical()?;
        Ok(Node::replacement(name, inner))
    }

    fn parse_keep_drop(&mut self) -> PResult<Modifier> {
        let kind = self.advance();
        let count = self
            .parse_unsigned_value()?
            .unwrap_or_else(|| Node::number(1));

        Ok(match kind {
            Some(TokenKind::Keep | TokenKind::KeepHighest) => Modifier::keep(Direction::High, count),
            Some(TokenKind::KeepLowest) => Modifier::keep(Direction::Low, count),
            Some(TokenKind::DropHighest) => Modifier::drop(Direction::High, count),
            _ => Modifier::drop(Direction::Low, count),
        })
    }

    fn parse_explode(&mut self) -> PResult<Modifier> {
        let mode = match self.advance() {
            Some(TokenKind::Compound) => ExplodeMode::Compound,
            Some(TokenKind::Penetrate) => ExplodeMode::Penetrate,
            _ => ExplodeMode::Explode,
        };
        let target = self.parse_optional_target()?;
        Ok(Modifier::explode(mode, target))
    }

    fn parse_reroll(&mut self) -> PResult<Modifier> {
        let once = self.advance() == Some(TokenKind::RerollOnce);
        let target = self.parse_optional_target()?;
        Ok(Modifier::reroll(once, target))
    }

    fn parse_critical(&mut self) -> PResult<Modifier> {
        let kind = self.advance();
        let target = self.parse_target()?;
        Ok(match kind {
            Some(TokenKind::CritSuccess) => Modifier::Critical(target),
            _ => Modifier::CriticalFailure(target),
        })
    }

    fn parse_success(&mut self) -> PResult<Modifier> {
        let target = self.parse_target()?;
        Ok(Modifier::Success(target))
    }

    fn parse_failure(&mut self) -> PResult<Modifier> {
        self.consume(TokenKind::Failure)?;
        let target = self.parse_target()?;
        Ok(Modifier::Failure(target))
    }

    fn parse_sort(&mut self) -> SortOrder {
        match self.advance() {
            Some(TokenKind::SortDescending) => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }

    fn parse_match(&mut self) -> PResult<Match> {
        let counted = self.advance() == Some(TokenKind::MatchCount);
        let min = self
            .parse_unsigned_value()?
            .unwrap_or_else(|| Node::number(2));

        let mut matching = Match::new(min);
        if counted {
            matching = matching.counted();
        }
        if self.matches_any(TokenKind::COMPARATORS) {
            matching = matching.filtered(self.parse_target()?);
        }
        Ok(matching)
    }

    /// A comparator (defaulting to `=`) followed by a value.
    fn parse_target(&mut self) -> PResult<Target> {
        let comparator = self.parse_comparator().unwrap_or_default();
        let value = self.parse_value()?;
        Ok(Target::new(comparator, value))
    }

    fn parse_optional_target(&mut self) -> PResult<Option<Target>> {
        if self.matches_any(TokenKind::COMPARATORS) || self.matches_any(Self::UNSIGNED_VALUES) {
            self.parse_target().map(Some)
        } else {
            Ok(None)
        }
    }

    fn parse_comparator(&mut self) -> Option<Comparator> {
        if !self.matches_any(TokenKind::COMPARATORS) {
            return None;
        }

        match self.advance() {
            Some(TokenKind::GreaterThan | TokenKind::GreaterEqual) => Some(Comparator::AtLeast),
            Some(TokenKind::LessThan | TokenKind::LessEqual) => Some(Comparator::AtMost),
            _ => Some(Comparator::Equal),
        }
    }

    fn parse_value(&mut self) -> PResult {
        if self.matches(TokenKind::Minus) {
            self.advance();
            let value = self.parse_value()?;
            return Ok(match value.kind {
                NodeKind::Number { value } => Node::number(-value),
                _ => Node::expression(
                    Node::number(-1),
                    vec![Operation::new(MathOperator::Mul, value)],
                ),
            });
        }

        match self.parse_unsigned_value()? {
            Some(value) => Ok(value),
            None => self.unexpected_token(vec![
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::LeftParen,
                TokenKind::Minus,
            ]),
        }
    }

    fn parse_unsigned_value(&mut self) -> PResult<Option<Node>> {
        match self.peek() {
            Some(TokenKind::Integer | TokenKind::Decimal) => self.parse_literal().map(Some),
            Some(TokenKind::LeftParen) => self.parse_parenthetical().map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> PResult {
        Parser::new(s).parse()
    }

    fn check(s: &str, expected: Node) {
        let parsed = parse(s).unwrap();
        assert_eq!(parsed, expected);
    }

    fn check_err(s: &str, expected: ParseErrorKind) {
        let err = parse(s).unwrap_err();
        assert_eq!(err.kind, expected);
    }

    fn dice(count: Int, faces: Int) -> Die {
        Die::standard(count, faces)
    }

    #[test]
    fn test_parse_nums() {
        check("32", Node::number(32));
        check("3.25", Node::number(3.25));
        check(".5", Node::number(0.5));
        check("-4", Node::number(-4));
    }

    #[test]
    fn test_parse_dice() {
        check("1d20", Node::die(dice(1, 20)));
        check("d4", Node::die(dice(1, 4)));
        check("2d%", Node::die(dice(2, 100)));
        check("4dF", Node::die(Die::fate(4)));
        check(
            "(1+1)d(2*3)",
            Node::die(Die::new(
                Node::expression(
                    Node::number(1),
                    vec![Operation::new(MathOperator::Add, Node::number(1))],
                ),
                Faces::Sides(Box::new(Node::expression(
                    Node::number(2),
                    vec![Operation::new(MathOperator::Mul, Node::number(3))],
                ))),
            )),
        );
    }

    #[test]
    fn test_parse_keep_drop() {
        check(
            "4d6kh3",
            Node::die(dice(4, 6).with_mod(Modifier::keep(Direction::High, Node::number(3)))),
        );
        check(
            "2d20kl",
            Node::die(dice(2, 20).with_mod(Modifier::keep(Direction::Low, Node::number(1)))),
        );
        check(
            "4d6d1",
            Node::die(dice(4, 6).with_mod(Modifier::drop(Direction::Low, Node::number(1)))),
        );
        check(
            "5d8dh2",
            Node::die(dice(5, 8).with_mod(Modifier::drop(Direction::High, Node::number(2)))),
        );
    }

    #[test]
    fn test_parse_explode_and_reroll() {
        check(
            "3d6!",
            Node::die(dice(3, 6).with_mod(Modifier::explode(ExplodeMode::Explode, None))),
        );
        check(
            "3d6!!>5",
            Node::die(dice(3, 6).with_mod(Modifier::explode(
                ExplodeMode::Compound,
                Some(Target::new(Comparator::AtLeast, Node::number(5))),
            ))),
        );
        check(
            "3d6!p",
            Node::die(dice(3, 6).with_mod(Modifier::explode(ExplodeMode::Penetrate, None))),
        );
        check(
            "2d8r<2",
            Node::die(dice(2, 8).with_mod(Modifier::reroll(
                false,
                Some(Target::new(Comparator::AtMost, Node::number(2))),
            ))),
        );
        check(
            "2d8ro1",
            Node::die(dice(2, 8).with_mod(Modifier::reroll(
                true,
                Some(Target::new(Comparator::Equal, Node::number(1))),
            ))),
        );
    }

    #[test]
    fn test_parse_targets() {
        check(
            "10d10>=8f1",
            Node::die(
                dice(10, 10)
                    .with_target(Modifier::success(Comparator::AtLeast, Node::number(8)))
                    .with_target(Modifier::failure(Comparator::Equal, Node::number(1))),
            ),
        );
        check(
            "1d20cs>19cf<2",
            Node::die(
                dice(1, 20)
                    .with_mod(Modifier::critical(Comparator::AtLeast, Node::number(19)))
                    .with_mod(Modifier::critical_failure(Comparator::AtMost, Node::number(2))),
            ),
        );
        check(
            "4dF=-1",
            Node::die(
                Die::fate(4).with_target(Modifier::success(Comparator::Equal, Node::number(-1))),
            ),
        );
    }

    #[test]
    fn test_parse_sort_and_match() {
        check("4d6sd", Node::die(dice(4, 6).with_sort(SortOrder::Descending)));
        check("4d6s", Node::die(dice(4, 6).with_sort(SortOrder::Ascending)));
        check("6d6m", Node::die(dice(6, 6).with_match(Match::new(Node::number(2)))));
        check(
            "6d6mt3>4",
            Node::die(dice(6, 6).with_match(
                Match::new(Node::number(3))
                    .counted()
                    .filtered(Target::new(Comparator::AtLeast, Node::number(4))),
            )),
        );
    }

    #[test]
    fn test_parse_group() {
        check(
            "{4d6kh3, 2d8}kh1",
            Node::group(
                NonEmpty::try_from_vec(vec![
                    Node::die(dice(4, 6).with_mod(Modifier::keep(Direction::High, Node::number(3)))),
                    Node::die(dice(2, 8)),
                ])
                .unwrap(),
                vec![Modifier::keep(Direction::High, Node::number(1))],
            ),
        );
        check(
            "{3d6}>4f1",
            Node::group(
                NonEmpty::new(Node::die(dice(3, 6))),
                vec![
                    Modifier::success(Comparator::AtLeast, Node::number(4)),
                    Modifier::failure(Comparator::Equal, Node::number(1)),
                ],
            ),
        );
    }

    #[test]
    fn test_parse_arithmetic() {
        check(
            "2d20 + 5",
            Node::dice_expression(
                Node::die(dice(2, 20)),
                vec![Operation::new(DiceOperator::Add, Node::number(5))],
            ),
        );
        check(
            "1 + 2 * 3",
            Node::expression(
                Node::number(1),
                vec![Operation::new(
                    MathOperator::Add,
                    Node::expression(
                        Node::number(2),
                        vec![Operation::new(MathOperator::Mul, Node::number(3))],
                    ),
                )],
            ),
        );
        check(
            "2 ** 3 ** 2",
            Node::expression(
                Node::number(2),
                vec![Operation::new(
                    MathOperator::Pow,
                    Node::expression(
                        Node::number(3),
                        vec![Operation::new(MathOperator::Pow, Node::number(2))],
                    ),
                )],
            ),
        );
        check(
            "-2 ** 2",
            Node::expression(
                Node::number(-1),
                vec![Operation::new(
                    MathOperator::Mul,
                    Node::expression(
                        Node::number(2),
                        vec![Operation::new(MathOperator::Pow, Node::number(2))],
                    ),
                )],
            ),
        );
        check(
            "2 ** -1",
            Node::expression(
                Node::number(2),
                vec![Operation::new(MathOperator::Pow, Node::number(-1))],
            ),
        );
        check(
            "-3 * 2",
            Node::expression(
                Node::number(-3),
                vec![Operation::new(MathOperator::Mul, Node::number(2))],
            ),
        );
        check(
            "floor(7 / 2)",
            Node::function(
                MathFunction::Floor,
                Node::expression(
                    Node::number(7),
                    vec![Operation::new(MathOperator::Div, Node::number(2))],
                ),
            ),
        );
    }

    #[test]
    fn test_parse_labels_inline_replacement() {
        check("1d20 [to hit]", Node::die(dice(1, 20)).labeled("to hit"));
        check("[[1d6]]", Node::inline(Node::die(dice(1, 6))));
        check("@double(3)", Node::replacement("double", Node::number(3)));
    }

    #[test]
    fn test_parse_errors() {
        check_err(
            "2 +",
            ParseErrorKind::UnexpectedToken {
                found: None,
                expected: Parser::ATOMS.to_vec(),
            },
        );
        check_err(
            "2 $ 3",
            ParseErrorKind::TrailingInput(TokenKind::Error),
        );
        check_err(
            "(1d6",
            ParseErrorKind::UnexpectedToken {
                found: None,
                expected: vec![TokenKind::RightParen],
            },
        );
        check_err(
            "99999999999999999999",
            ParseErrorKind::InvalidNumber,
        );
    }
}
