//! Fatal lexer errors and their diagnostics.

use flowc::lexer::{DiagnosticCode, FatalLexError, Lexer};

fn first_error(input: &str) -> FatalLexError {
    Lexer::new(input)
        .tokenize()
        .expect_err("input should be rejected")
}

#[test]
fn stray_character_is_fatal() {
    let error = first_error("a # b");
    let FatalLexError::UnexpectedCharacter(diagnostic) = &error else {
        panic!("expected UnexpectedCharacter, got {error:?}");
    };
    assert_eq!(diagnostic.code, DiagnosticCode::UnexpectedCharacter);
    assert_eq!(diagnostic.span.start.value(), 2);
    assert_eq!(diagnostic.span.end.value(), 3);
    assert!(diagnostic.message.contains('#'));
}

#[test]
fn lone_bang_is_not_an_operator() {
    let error = first_error("a ! b");
    assert!(matches!(error, FatalLexError::UnexpectedCharacter(_)));
}

#[test]
fn non_ascii_character_is_reported_whole() {
    let error = first_error("é");
    assert_eq!(error.diagnostic().span.len(), 2);
}

#[test]
fn oversized_number_is_fatal() {
    let error = first_error("x 99999999999999999999");
    let FatalLexError::InvalidNumber(diagnostic) = &error else {
        panic!("expected InvalidNumber, got {error:?}");
    };
    assert_eq!(diagnostic.code, DiagnosticCode::InvalidNumber);
    assert_eq!(diagnostic.span.start.value(), 2);
}

#[test]
fn largest_cell_value_is_accepted() {
    let tokens = Lexer::new("9223372036854775807")
        .tokenize()
        .expect("i64::MAX should lex");
    assert_eq!(tokens[0].lexeme, "9223372036854775807");
}

#[test]
fn display_names_the_line() {
    let error = first_error("a;\n{ $ }");
    let rendered = error.to_string();
    assert!(rendered.contains("line 2"), "unexpected message: {rendered}");
    assert_eq!(error.diagnostic().span.line, 2);
}
