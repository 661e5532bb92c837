//! Parser error contracts.

use std::fmt;

use crate::ir::{IrError, IrErrorKind};
use crate::lexer::{FatalLexError, Span, Token};

/// Stable parser error categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A concrete token did not match grammar expectations.
    UnexpectedToken,
    /// Input ended before required grammar elements were found.
    UnexpectedEndOfInput,
    /// Parser requested lookahead beyond the configured bound.
    LookaheadExceeded,
    /// Lexer-level fatal error surfaced through the token stream.
    LexerError,
    /// A statement referenced a name missing from the declaration section.
    UnknownVariable,
    /// Bodies are nested deeper than [`crate::parser::ParseOptions::max_nesting`].
    NestingTooDeep,
    /// Storage or node capacity ran out.
    LimitExceeded,
    /// IR construction hit an internal inconsistency.
    InvariantViolation,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedToken => "unexpected token",
            Self::UnexpectedEndOfInput => "unexpected end of input",
            Self::LookaheadExceeded => "lookahead exceeded",
            Self::LexerError => "lexical error",
            Self::UnknownVariable => "unknown variable",
            Self::NestingTooDeep => "nesting too deep",
            Self::LimitExceeded => "limit exceeded",
            Self::InvariantViolation => "internal error",
        };
        f.write_str(text)
    }
}

/// Parser error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// Optional source span near the failure.
    pub span: Option<Span>,
    /// Expected token labels.
    pub expected: Vec<String>,
    /// Found token or offending detail.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a parser error.
    pub fn new(
        kind: ParseErrorKind,
        span: Option<Span>,
        expected: Vec<String>,
        found: Option<String>,
    ) -> Self {
        Self {
            kind,
            span,
            expected,
            found,
        }
    }

    /// Creates an `UnexpectedToken` error.
    pub fn unexpected_token(
        token: &Token,
        expected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            Some(token.span),
            expected.into_iter().map(Into::into).collect(),
            Some(token.lexeme.clone()),
        )
    }

    /// Creates an `UnexpectedEndOfInput` error.
    pub fn unexpected_end_of_input(expected: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEndOfInput,
            None,
            expected.into_iter().map(Into::into).collect(),
            Some("EOF".to_string()),
        )
    }

    /// Creates a `LookaheadExceeded` error.
    pub fn lookahead_exceeded(requested: usize, max: usize) -> Self {
        Self::new(
            ParseErrorKind::LookaheadExceeded,
            None,
            vec![format!("lookahead <= {max}")],
            Some(format!("lookahead {requested}")),
        )
    }

    /// Creates a lexer-wrapper parse error.
    pub fn lexer_error(error: &FatalLexError) -> Self {
        let diagnostic = error.diagnostic();
        Self::new(
            ParseErrorKind::LexerError,
            Some(diagnostic.span),
            Vec::new(),
            Some(diagnostic.message.clone()),
        )
    }

    /// Creates an `UnknownVariable` error for an undeclared name.
    pub fn unknown_variable(token: &Token) -> Self {
        Self::new(
            ParseErrorKind::UnknownVariable,
            Some(token.span),
            vec!["declared variable".to_string()],
            Some(token.lexeme.clone()),
        )
    }

    /// Creates an `InvariantViolation` error for a number token that the
    /// lexer let through but that does not fit a cell.
    pub fn unconverted_literal(token: &Token) -> Self {
        Self::new(
            ParseErrorKind::InvariantViolation,
            Some(token.span),
            vec!["64-bit signed integer".to_string()],
            Some(token.lexeme.clone()),
        )
    }

    /// Creates a `NestingTooDeep` error.
    pub fn nesting_too_deep(span: Option<Span>, limit: usize) -> Self {
        Self::new(
            ParseErrorKind::NestingTooDeep,
            span,
            vec![format!("nesting <= {limit}")],
            Some(format!("nesting {}", limit.saturating_add(1))),
        )
    }

    /// Wraps an IR construction failure at the given source position.
    pub fn from_ir_error(error: IrError, span: Option<Span>) -> Self {
        let kind = match error.kind {
            IrErrorKind::LimitExceeded => ParseErrorKind::LimitExceeded,
            _ => ParseErrorKind::InvariantViolation,
        };
        Self::new(kind, span, Vec::new(), Some(error.to_string()))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(found) = &self.found {
            write!(f, ": found '{found}'")?;
        }
        if !self.expected.is_empty() {
            write!(f, ", expected {}", self.expected.join(" or "))?;
        }
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
