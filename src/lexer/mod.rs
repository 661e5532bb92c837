//! Lexer for the flowc source language.
//!
//! Tokens are identifiers, unsigned integer literals, reserved words and
//! single- or double-byte operators. Whitespace separates tokens and `//`
//! starts a comment that runs to the end of the line.

pub mod diagnostics;
pub mod span;
pub mod token;

mod cursor;
mod operator;

use crate::lexer::cursor::Cursor;

pub use diagnostics::{DiagnosticCode, FatalLexError, LexDiagnostic};
pub use span::{ByteOffset, Span};
pub use token::{Keyword, LexStep, OperatorKind, Token, TokenKind};

/// Pull-based lexer over one program text.
pub struct Lexer<'a> {
    input: &'a str,
    cursor: Cursor,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::new(),
        }
    }

    /// Returns the current byte offset.
    pub fn offset(&self) -> ByteOffset {
        self.cursor.offset()
    }

    /// Scans and returns the next lexical step.
    ///
    /// Once [`LexStep::EndOfInput`] is returned every further call returns it
    /// again.
    pub fn next_token(&mut self) -> Result<LexStep, FatalLexError> {
        self.skip_trivia();

        let Some(byte) = self.cursor.peek_byte(self.input) else {
            return Ok(LexStep::EndOfInput);
        };

        let start = self.cursor.offset();
        let line = self.cursor.line();

        if byte.is_ascii_alphabetic() || byte == b'_' {
            self.cursor
                .advance_while(self.input, |b| b.is_ascii_alphanumeric() || b == b'_');
            let lexeme = self.slice_from(start);
            let kind = match Keyword::from_lexeme(lexeme) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Identifier,
            };
            return Ok(LexStep::Token(self.token(kind, start, line)));
        }

        if byte.is_ascii_digit() {
            self.cursor.advance_while(self.input, |b| b.is_ascii_digit());
            let token = self.token(TokenKind::Number, start, line);
            if token.lexeme.parse::<i64>().is_err() {
                return Err(FatalLexError::InvalidNumber(LexDiagnostic::new(
                    DiagnosticCode::InvalidNumber,
                    format!("integer literal '{}' is out of range", token.lexeme),
                    token.span,
                )));
            }
            return Ok(LexStep::Token(token));
        }

        if let Some((kind, lexeme)) = operator::scan_operator(&mut self.cursor, self.input) {
            let span = Span::new(start, self.cursor.offset(), line);
            return Ok(LexStep::Token(Token::new(
                TokenKind::Operator(kind),
                lexeme.to_string(),
                span,
            )));
        }

        // Consume the whole UTF-8 scalar so the diagnostic shows it intact.
        let ch = self.input[start.as_usize()..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        for _ in 0..ch.len_utf8() {
            let _ = self.cursor.advance_byte(self.input);
        }
        let span = Span::new(start, self.cursor.offset(), line);
        Err(FatalLexError::UnexpectedCharacter(LexDiagnostic::new(
            DiagnosticCode::UnexpectedCharacter,
            format!("unexpected character '{}'", ch.escape_debug()),
            span,
        )))
    }

    /// Tokenizes the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, FatalLexError> {
        let mut tokens = Vec::new();
        while let LexStep::Token(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn skip_trivia(&mut self) {
        loop {
            self.cursor
                .advance_while(self.input, |b| b.is_ascii_whitespace());

            let is_comment = self.cursor.peek_byte(self.input) == Some(b'/')
                && self.cursor.peek_next_byte(self.input) == Some(b'/');
            if !is_comment {
                return;
            }
            self.cursor.advance_while(self.input, |b| b != b'\n');
        }
    }

    fn slice_from(&self, start: ByteOffset) -> &'a str {
        &self.input[start.as_usize()..self.cursor.offset().as_usize()]
    }

    fn token(&self, kind: TokenKind, start: ByteOffset, line: u32) -> Token {
        Token::new(
            kind,
            self.slice_from(start).to_string(),
            Span::new(start, self.cursor.offset(), line),
        )
    }
}
