//! Diagnostic and error contracts for the lexer.

use std::fmt;

use crate::lexer::span::Span;

/// Stable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// A byte that cannot start any token.
    UnexpectedCharacter,
    /// An integer literal that does not fit a storage cell.
    InvalidNumber,
}

/// User-facing diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexDiagnostic {
    /// Machine-readable diagnostic code.
    pub code: DiagnosticCode,
    /// Human-readable message text.
    pub message: String,
    /// Source span associated with this diagnostic.
    pub span: Span,
}

impl LexDiagnostic {
    /// Creates a diagnostic value.
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }
}

/// Fatal lexical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalLexError {
    /// Input contained a byte outside the token alphabet.
    UnexpectedCharacter(LexDiagnostic),
    /// Integer literal overflowed the cell type.
    InvalidNumber(LexDiagnostic),
}

impl FatalLexError {
    /// Returns the wrapped diagnostic.
    pub fn diagnostic(&self) -> &LexDiagnostic {
        match self {
            Self::UnexpectedCharacter(diagnostic) | Self::InvalidNumber(diagnostic) => diagnostic,
        }
    }
}

impl fmt::Display for FatalLexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostic = self.diagnostic();
        write!(f, "{} at {}", diagnostic.message, diagnostic.span)
    }
}

impl std::error::Error for FatalLexError {}
