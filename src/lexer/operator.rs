//! Operator scanning helpers for longest-match tokenization.

use crate::lexer::cursor::Cursor;
use crate::lexer::token::OperatorKind;

/// Scans an operator at cursor position using longest-match rules.
///
/// Returns the operator kind and the exact source lexeme.
pub(crate) fn scan_operator(
    cursor: &mut Cursor,
    input: &str,
) -> Option<(OperatorKind, &'static str)> {
    let (kind, lexeme) = match_operator_at(cursor, input)?;
    for _ in 0..lexeme.len() {
        let _ = cursor.advance_byte(input);
    }
    Some((kind, lexeme))
}

fn match_operator_at(cursor: &Cursor, input: &str) -> Option<(OperatorKind, &'static str)> {
    let first = cursor.peek_byte(input)?;
    let second = cursor.peek_next_byte(input);

    match (first, second) {
        (b'!', Some(b'=')) => return Some((OperatorKind::NotEqual, "!=")),
        (b'<', Some(b'>')) => return Some((OperatorKind::NotEqual, "<>")),
        _ => {}
    }

    match first {
        b',' => Some((OperatorKind::Comma, ",")),
        b';' => Some((OperatorKind::Semicolon, ";")),
        b':' => Some((OperatorKind::Colon, ":")),
        b'=' => Some((OperatorKind::Equal, "=")),
        b'{' => Some((OperatorKind::LeftBrace, "{")),
        b'}' => Some((OperatorKind::RightBrace, "}")),
        b'(' => Some((OperatorKind::LeftParen, "(")),
        b')' => Some((OperatorKind::RightParen, ")")),
        b'+' => Some((OperatorKind::Plus, "+")),
        b'-' => Some((OperatorKind::Minus, "-")),
        b'*' => Some((OperatorKind::Star, "*")),
        b'/' => Some((OperatorKind::Slash, "/")),
        b'>' => Some((OperatorKind::Greater, ">")),
        b'<' => Some((OperatorKind::Less, "<")),
        _ => None,
    }
}
