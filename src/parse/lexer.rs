use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"([0-9]+\.[0-9]+)|(\.[0-9]+)")]
    Decimal,

    /// `d` both introduces the faces of a die and, after a die or group, drops.
    #[token("d")]
    Dice,
    #[token("F")]
    Fate,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token("[[")]
    InlineOpen,
    #[token("]]")]
    InlineClose,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("=")]
    Equal,
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessEqual,

    #[token("k")]
    Keep,
    #[token("kh")]
    KeepHighest,
    #[token("kl")]
    KeepLowest,
    #[token("dh")]
    DropHighest,
    #[token("dl")]
    DropLowest,
    #[token("!")]
    Explode,
    #[token("!!")]
    Compound,
    #[token("!p")]
    Penetrate,
    #[token("r")]
    Reroll,
    #[token("ro")]
    RerollOnce,
    #[token("f")]
    Failure,
    #[token("cs")]
    CritSuccess,
    #[token("cf")]
    CritFailure,
    #[token("s")]
    Sort,
    #[token("sa")]
    SortAscending,
    #[token("sd")]
    SortDescending,
    #[token("m")]
    Match,
    #[token("mt")]
    MatchCount,

    #[token("floor")]
    Floor,
    #[token("ceil")]
    Ceil,
    #[token("round")]
    Round,
    #[token("abs")]
    Abs,
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    Replacement,

    #[regex(r"\[[^\[\]]*\]")]
    Label,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub const COMPARATORS: &'static [Self] = &[
        Self::Equal,
        Self::GreaterThan,
        Self::GreaterEqual,
        Self::LessThan,
        Self::LessEqual,
    ];

    pub const ADDITION_OPS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub const MULTIPLICATION_OPS: &'static [Self] = &[Self::Star, Self::Slash, Self::Percent];

    pub const FUNCTIONS: &'static [Self] = &[Self::Floor, Self::Ceil, Self::Round, Self::Abs];

    pub const KEEP_DROP: &'static [Self] = &[
        Self::Keep,
        Self::KeepHighest,
        Self::KeepLowest,
        Self::Dice,
        Self::DropHighest,
        Self::DropLowest,
    ];

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Decimal => "<decimal>",
            Dice => "'d'",
            Fate => "'F'",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Comma => "','",
            InlineOpen => "'[['",
            InlineClose => "']]'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            StarStar => "'**'",
            Slash => "'/'",
            Percent => "'%'",
            Equal => "'='",
            GreaterThan => "'>'",
            GreaterEqual => "'>='",
            LessThan => "'<'",
            LessEqual => "'<='",
            Keep => "'k'",
            KeepHighest => "'kh'",
            KeepLowest => "'kl'",
            DropHighest => "'dh'",
            DropLowest => "'dl'",
            Explode => "'!'",
            Compound => "'!!'",
            Penetrate => "'!p'",
            Reroll => "'r'",
            RerollOnce => "'ro'",
            Failure => "'f'",
            CritSuccess => "'cs'",
            CritFailure => "'cf'",
            Sort => "'s'",
            SortAscending => "'sa'",
            SortDescending => "'sd'",
            Match => "'m'",
            MatchCount => "'mt'",
            Floor => "'floor'",
            Ceil => "'ceil'",
            Round => "'round'",
            Abs => "'abs'",
            Replacement => "<replacement>",
            Label => "<label>",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
