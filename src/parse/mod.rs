pub mod ast;
mod lexer;
mod parser;
pub mod visit;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind};

/// Parses dice notation such as `4d6kh3 + 2` into a syntax tree.
pub fn parse(s: &str) -> Result<ast::Node, ParseError> {
    parser::Parser::new(s).parse()
}
