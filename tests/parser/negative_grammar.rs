//! Rejected programs and the errors they produce.

use flowc::parser::{ParseError, ParseErrorKind, ParseOptions, parse_source};

fn parse_err(source: &str) -> ParseError {
    parse_err_with(source, ParseOptions::default())
}

fn parse_err_with(source: &str, options: ParseOptions) -> ParseError {
    parse_source(source, options).expect_err("program should be rejected")
}

fn assert_unexpected(error: &ParseError, found: &str) {
    assert_eq!(error.kind, ParseErrorKind::UnexpectedToken, "{error}");
    assert_eq!(error.found.as_deref(), Some(found), "{error}");
    assert!(error.span.is_some());
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn missing_declaration_separator() {
    let error = parse_err("a b; { output a; }");
    assert_unexpected(&error, "b");
    assert_eq!(error.expected, vec!["',' or ';'".to_string()]);
}

#[test]
fn keyword_cannot_be_declared() {
    let error = parse_err("if; { }");
    assert_unexpected(&error, "if");
    assert_eq!(error.expected, vec!["identifier".to_string()]);
}

#[test]
fn empty_body_is_rejected() {
    let error = parse_err("a; { }");
    assert_unexpected(&error, "}");
    assert!(error.expected.contains(&"identifier".to_string()));
    assert!(error.expected.contains(&"'while'".to_string()));
}

#[test]
fn missing_body_hits_end_of_input() {
    let error = parse_err("a;");
    assert_eq!(error.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(error.found.as_deref(), Some("EOF"));
    assert_eq!(error.span, None);
}

#[test]
fn unterminated_body_hits_end_of_input() {
    let error = parse_err("a; { output a;");
    assert_eq!(error.kind, ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(error.expected, vec!["'}'".to_string()]);
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[test]
fn undeclared_variable_is_rejected() {
    let error = parse_err("a; { b = 1; }");
    assert_eq!(error.kind, ParseErrorKind::UnknownVariable);
    assert_eq!(error.found.as_deref(), Some("b"));
}

#[test]
fn undeclared_variable_in_condition_is_rejected() {
    let error = parse_err("a; { while a < limit { a = a + 1; } }");
    assert_eq!(error.kind, ParseErrorKind::UnknownVariable);
    assert_eq!(error.found.as_deref(), Some("limit"));
}

#[test]
fn missing_arithmetic_operator() {
    let error = parse_err("a; { a = 1 2; }");
    assert_unexpected(&error, "2");
    assert_eq!(error.expected.len(), 4);
}

#[test]
fn chained_arithmetic_is_rejected() {
    let error = parse_err("a; { a = 1 + 2 + 3; }");
    assert_unexpected(&error, "+");
    assert_eq!(error.expected, vec!["';'".to_string()]);
}

#[test]
fn negative_literal_is_not_a_primary() {
    let error = parse_err("a; { a = -1; }");
    assert_unexpected(&error, "-");
}

#[test]
fn condition_needs_a_relation() {
    let error = parse_err("a; { if a { output a; } }");
    assert_unexpected(&error, "{");
    assert_eq!(error.expected.len(), 3);
}

#[test]
fn equality_is_not_a_relation() {
    let error = parse_err("a; { if a = 1 { output a; } }");
    assert_unexpected(&error, "=");
}

#[test]
fn unbalanced_condition_paren() {
    let error = parse_err("a; { if (a > 1 { output a; } }");
    assert_unexpected(&error, "{");
    assert_eq!(error.expected, vec!["')'".to_string()]);
}

#[test]
fn case_label_must_be_a_number() {
    let error = parse_err("a, b; { switch a { case b: output a; } }");
    assert_unexpected(&error, "b");
    assert_eq!(error.expected, vec!["number".to_string()]);
}

#[test]
fn default_must_come_last() {
    let error = parse_err("a; { switch a { default: output a; case 1: output a; } }");
    assert_unexpected(&error, "case");
}

#[test]
fn for_requires_parentheses() {
    let error = parse_err("i; { for i = 0; i < 3; i = i + 1 { output i; } }");
    assert_unexpected(&error, "i");
    assert_eq!(error.expected, vec!["'('".to_string()]);
}

#[test]
fn lexical_error_aborts_the_parse() {
    let error = parse_err("a; { a = 1 # }");
    assert_eq!(error.kind, ParseErrorKind::LexerError);
    assert!(error.found.as_deref().is_some_and(|found| found.contains('#')));
}

#[test]
fn oversized_literal_is_a_lexical_error() {
    let error = parse_err("a; { a = 99999999999999999999; }");
    assert_eq!(error.kind, ParseErrorKind::LexerError);
    assert!(error.found.as_deref().is_some_and(|found| found.contains("out of range")));
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

#[test]
fn nesting_limit_is_enforced() {
    let source = "a; { if a > 0 { if a > 0 { if a > 0 { output a; } } } }";
    let tight = ParseOptions {
        max_nesting: 3,
        ..ParseOptions::default()
    };
    let error = parse_err_with(source, tight);
    assert_eq!(error.kind, ParseErrorKind::NestingTooDeep);

    let enough = ParseOptions {
        max_nesting: 4,
        ..ParseOptions::default()
    };
    assert!(parse_source(source, enough).is_ok());
}

#[test]
fn storage_capacity_covers_variables() {
    let options = ParseOptions {
        storage_capacity: 2,
        ..ParseOptions::default()
    };
    let error = parse_err_with("a, b, c; { output a; }", options);
    assert_eq!(error.kind, ParseErrorKind::LimitExceeded);
    assert!(error.span.is_some());
}

#[test]
fn storage_capacity_covers_constants() {
    let options = ParseOptions {
        storage_capacity: 2,
        ..ParseOptions::default()
    };
    let error = parse_err_with("a; { a = 1; a = 2; }", options);
    assert_eq!(error.kind, ParseErrorKind::LimitExceeded);
}

#[test]
fn node_limit_is_enforced() {
    let options = ParseOptions {
        max_nodes: 2,
        ..ParseOptions::default()
    };
    let error = parse_err_with("a; { output a; output a; output a; }", options);
    assert_eq!(error.kind, ParseErrorKind::LimitExceeded);
}

#[test]
fn error_display_names_kind_and_position() {
    let error = parse_err("a;\n{\n  b = 1;\n}");
    let rendered = error.to_string();
    assert!(rendered.starts_with("unknown variable: found 'b'"), "{rendered}");
    assert!(rendered.contains("line 3"), "{rendered}");
}
