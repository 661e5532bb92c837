//! Byte cursor with line tracking.

use crate::lexer::span::ByteOffset;

/// Byte-position cursor over input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    offset: ByteOffset,
    line: u32,
}

impl Cursor {
    /// Creates a cursor at byte offset `0`, line `1`.
    pub(crate) fn new() -> Self {
        Self {
            offset: ByteOffset::new(0),
            line: 1,
        }
    }

    /// Returns the current byte offset.
    pub(crate) fn offset(&self) -> ByteOffset {
        self.offset
    }

    /// Returns the current 1-based line.
    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current byte at cursor position.
    pub(crate) fn peek_byte(&self, input: &str) -> Option<u8> {
        input.as_bytes().get(self.offset.as_usize()).copied()
    }

    /// Returns the byte after the current one.
    pub(crate) fn peek_next_byte(&self, input: &str) -> Option<u8> {
        input
            .as_bytes()
            .get(self.offset.as_usize().saturating_add(1))
            .copied()
    }

    /// Consumes one byte, counting newlines. Returns the consumed byte.
    pub(crate) fn advance_byte(&mut self, input: &str) -> Option<u8> {
        let byte = self.peek_byte(input)?;
        if byte == b'\n' {
            self.line = self.line.saturating_add(1);
        }
        self.offset = ByteOffset::from_usize(self.offset.as_usize() + 1);
        Some(byte)
    }

    /// Consumes bytes while `predicate` holds.
    pub(crate) fn advance_while<P>(&mut self, input: &str, predicate: P)
    where
        P: Fn(u8) -> bool,
    {
        while let Some(byte) = self.peek_byte(input) {
            if !predicate(byte) {
                break;
            }
            let _ = self.advance_byte(input);
        }
    }
}
