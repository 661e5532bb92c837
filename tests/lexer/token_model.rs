//! Token classification, lexemes and spans.

use flowc::lexer::{Keyword, LexStep, Lexer, OperatorKind, Token, TokenKind};

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .tokenize()
        .expect("input should tokenize")
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokens(input).into_iter().map(|token| token.kind).collect()
}

#[test]
fn reserved_words_lex_as_keywords() {
    assert_eq!(
        kinds("if while switch case default for input output"),
        vec![
            TokenKind::Keyword(Keyword::If),
            TokenKind::Keyword(Keyword::While),
            TokenKind::Keyword(Keyword::Switch),
            TokenKind::Keyword(Keyword::Case),
            TokenKind::Keyword(Keyword::Default),
            TokenKind::Keyword(Keyword::For),
            TokenKind::Keyword(Keyword::Input),
            TokenKind::Keyword(Keyword::Output),
        ]
    );
}

#[test]
fn keyword_prefixes_are_identifiers() {
    let scanned = tokens("iffy outputs _for");
    assert!(scanned.iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(scanned[0].lexeme, "iffy");
    assert_eq!(scanned[1].lexeme, "outputs");
    assert_eq!(scanned[2].lexeme, "_for");
}

#[test]
fn identifiers_and_numbers_keep_their_lexemes() {
    let scanned = tokens("a1 42 b_2 007");
    let summary: Vec<_> = scanned
        .iter()
        .map(|token| (token.kind, token.lexeme.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Identifier, "a1"),
            (TokenKind::Number, "42"),
            (TokenKind::Identifier, "b_2"),
            (TokenKind::Number, "007"),
        ]
    );
}

#[test]
fn operators_use_longest_match() {
    let expected = [
        OperatorKind::NotEqual,
        OperatorKind::NotEqual,
        OperatorKind::Less,
        OperatorKind::Greater,
        OperatorKind::Equal,
        OperatorKind::Comma,
        OperatorKind::Semicolon,
        OperatorKind::Colon,
        OperatorKind::LeftBrace,
        OperatorKind::RightBrace,
        OperatorKind::LeftParen,
        OperatorKind::RightParen,
        OperatorKind::Plus,
        OperatorKind::Minus,
        OperatorKind::Star,
        OperatorKind::Slash,
    ];
    assert_eq!(
        kinds("!= <> < > = , ; : { } ( ) + - * /"),
        expected.map(TokenKind::Operator).to_vec()
    );
}

#[test]
fn tokens_need_no_whitespace_between_them() {
    let scanned = tokens("x=y<>1;");
    let lexemes: Vec<_> = scanned.iter().map(|token| token.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["x", "=", "y", "<>", "1", ";"]);
}

#[test]
fn line_comments_are_skipped() {
    let scanned = tokens("a // ignored { } #\n/ b // trailing");
    let summary: Vec<_> = scanned
        .iter()
        .map(|token| (token.kind, token.lexeme.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Operator(OperatorKind::Slash), "/"),
            (TokenKind::Identifier, "b"),
        ]
    );
}

#[test]
fn spans_track_offsets_and_lines() {
    let scanned = tokens("a\n\n  bc !=");
    assert_eq!(scanned[0].span.line, 1);
    assert_eq!(scanned[1].span.line, 3);
    assert_eq!(scanned[1].span.start.value(), 5);
    assert_eq!(scanned[1].span.end.value(), 7);
    assert_eq!(scanned[2].span.len(), 2);
}

#[test]
fn end_of_input_is_idempotent() {
    let mut lexer = Lexer::new("a  ");
    assert!(matches!(lexer.next_token(), Ok(LexStep::Token(_))));
    assert_eq!(lexer.offset().value(), 1);
    assert_eq!(lexer.next_token(), Ok(LexStep::EndOfInput));
    assert_eq!(lexer.next_token(), Ok(LexStep::EndOfInput));
}

#[test]
fn empty_and_blank_inputs_have_no_tokens() {
    assert!(tokens("").is_empty());
    assert!(tokens(" \t\n // only a comment").is_empty());
}
