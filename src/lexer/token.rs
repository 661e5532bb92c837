//! Token model for the lexer.

use std::fmt;

use crate::lexer::span::Span;

/// Punctuation and operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `=`
    Equal,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `!=` or `<>`
    NotEqual,
}

impl OperatorKind {
    /// Canonical spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Equal => "=",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Greater => ">",
            Self::Less => "<",
            Self::NotEqual => "!=",
        }
    }
}

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    While,
    Switch,
    Case,
    Default,
    For,
    Input,
    Output,
}

impl Keyword {
    /// Maps an identifier-shaped lexeme to a keyword.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "if" => Some(Self::If),
            "while" => Some(Self::While),
            "switch" => Some(Self::Switch),
            "case" => Some(Self::Case),
            "default" => Some(Self::Default),
            "for" => Some(Self::For),
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            _ => None,
        }
    }

    /// Source spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::While => "while",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::For => "for",
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

/// Token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Variable name.
    Identifier,
    /// Unsigned integer literal.
    Number,
    /// Punctuation or operator.
    Operator(OperatorKind),
    /// Reserved word.
    Keyword(Keyword),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => f.write_str("identifier"),
            Self::Number => f.write_str("number"),
            Self::Operator(kind) => write!(f, "'{}'", kind.as_str()),
            Self::Keyword(keyword) => write!(f, "'{}'", keyword.as_str()),
        }
    }
}

/// A lexical token with raw text and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Token text preserved as scanned.
    pub lexeme: String,
    /// Source span.
    pub span: Span,
}

impl Token {
    /// Creates a token value.
    pub fn new(kind: TokenKind, lexeme: String, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Returns `true` when this token is the given operator.
    pub fn is_operator(&self, operator: OperatorKind) -> bool {
        self.kind == TokenKind::Operator(operator)
    }

    /// Returns `true` when this token is the given keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// One step produced by [`crate::lexer::Lexer::next_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexStep {
    /// A concrete token was produced.
    Token(Token),
    /// End of input was reached.
    EndOfInput,
}
