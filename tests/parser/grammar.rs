//! Positive grammar coverage: every statement form and its accepted spellings.

use flowc::ir::{ArithmeticOp, Expr, Instruction, Location, Program, render_program};
use flowc::lexer::Lexer;
use flowc::parser::{ParseOptions, Parser, TokenStream, parse_source};
use flowc::vm::execute;

// ===========================================================================
// Helpers
// ===========================================================================

fn parse(source: &str) -> Program {
    parse_source(source, ParseOptions::default()).expect("program should parse")
}

fn run(source: &str) -> Vec<i64> {
    execute(&parse(source)).expect("program should run")
}

fn instruction_at(program: &Program, index: u32) -> Instruction {
    *program
        .graph
        .instruction(flowc::ir::NodeId::new(index))
        .expect("node should exist")
}

// ===========================================================================
// Declarations and simple statements
// ===========================================================================

#[test]
fn declarations_bind_cells_in_source_order() {
    let program = parse("a, b, c; { output a; }");
    assert_eq!(program.symbols.resolve("a"), Some(Location::new(0)));
    assert_eq!(program.symbols.resolve("b"), Some(Location::new(1)));
    assert_eq!(program.symbols.resolve("c"), Some(Location::new(2)));
    assert_eq!(program.initial_memory(), &[0, 0, 0]);
}

#[test]
fn assignment_chooses_primary_or_binary_form() {
    let program = parse("a, b; { a = b; b = a + 1; }");

    assert_eq!(
        instruction_at(&program, 0),
        Instruction::Assign {
            dest: Location::new(0),
            source: Expr::Primary(Location::new(1)),
        }
    );
    assert_eq!(
        instruction_at(&program, 1),
        Instruction::Assign {
            dest: Location::new(1),
            source: Expr::Binary {
                op: ArithmeticOp::Add,
                left: Location::new(0),
                right: Location::new(2),
            },
        }
    );
    assert_eq!(program.storage.get(Location::new(2)), Some(1));
}

#[test]
fn every_arithmetic_operator_parses() {
    let outputs = run(
        "a, b; {
            a = 7;
            b = a - 2; output b;
            b = a * 3; output b;
            b = a / 2; output b;
            b = a + 0; output b;
        }",
    );
    assert_eq!(outputs, vec![5, 21, 3, 7]);
}

#[test]
fn input_and_output_statements_lower_to_single_nodes() {
    let program = parse("a; { input a; output a; } 3");
    assert_eq!(program.graph.len(), 2);
    assert_eq!(
        instruction_at(&program, 0),
        Instruction::Input {
            dest: Location::new(0)
        }
    );
    assert_eq!(
        instruction_at(&program, 1),
        Instruction::Output {
            src: Location::new(0)
        }
    );
}

// ===========================================================================
// Accepted spellings
// ===========================================================================

#[test]
fn parenthesized_and_bare_conditions_are_equivalent() {
    let bare = parse("a; { if a > 1 { output a; } while a < 1 { a = 1; } }");
    let wrapped = parse("a; { if (a > 1) { output a; } while (a < 1) { a = 1; } }");
    assert_eq!(render_program(&bare), render_program(&wrapped));
}

#[test]
fn both_not_equal_spellings_are_equivalent() {
    let bang = parse("a; { if a != 2 { output a; } }");
    let angle = parse("a; { if a <> 2 { output a; } }");
    assert_eq!(render_program(&bang), render_program(&angle));
}

#[test]
fn switch_subject_may_be_parenthesized() {
    let bare = parse("x; { switch x { case 1: output x; } }");
    let wrapped = parse("x; { switch (x) { case 1: output x; } }");
    assert_eq!(render_program(&bare), render_program(&wrapped));
}

#[test]
fn case_bodies_accept_braces_or_statement_lists() {
    let source = "x, r; {
        input x;
        switch x {
            case 1: { r = 10; }
            case 2: r = 20; output x;
            default: { r = 30; }
        }
        output r;
    }";
    let program = parse(source);
    let mut with_input = program.clone();
    with_input.inputs = [2].into();
    assert_eq!(execute(&with_input).expect("should run"), vec![2, 20]);

    with_input.inputs = [1].into();
    assert_eq!(execute(&with_input).expect("should run"), vec![10]);
}

#[test]
fn for_update_terminator_is_optional() {
    let with_semicolon = parse("i; { for (i = 0; i < 3; i = i + 1;) { output i; } }");
    let without = parse("i; { for (i = 0; i < 3; i = i + 1) { output i; } }");
    assert_eq!(render_program(&with_semicolon), render_program(&without));
}

#[test]
fn for_update_may_be_a_bare_primary() {
    let outputs = run("i, j; { j = 5; for (i = 0; i < 5; i = j) { output i; } }");
    assert_eq!(outputs, vec![0]);
}

#[test]
fn comments_are_ignored_everywhere() {
    let outputs = run(
        "a; // declarations
        {
            // body
            a = 4; // assign
            output a;
        } // inputs follow",
    );
    assert_eq!(outputs, vec![4]);
}

// ===========================================================================
// Nesting
// ===========================================================================

#[test]
fn nested_control_flow_runs() {
    let outputs = run(
        "i, j, n; {
            n = 3;
            for (i = 0; i < n; i = i + 1) {
                j = 0;
                while j < i {
                    if j != 1 { output j; }
                    j = j + 1;
                }
            }
        }",
    );
    // i = 1 prints 0, i = 2 prints 0 and skips 1.
    assert_eq!(outputs, vec![0, 0]);
}

#[test]
fn parse_is_deterministic() {
    let source = "a, b; { input a; switch a { case 1: b = 2; default: b = 3; } output b; } 1";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn parser_accepts_an_explicit_token_stream() {
    let options = ParseOptions {
        strict_trailing_input: true,
        ..ParseOptions::default()
    };
    let parser = Parser::new(options, TokenStream::new(Lexer::new("a; { output a; } 1")));
    assert_eq!(parser.options(), options);

    let program = parser.parse_program().expect("program should parse");
    assert_eq!(program.input_values(), vec![1]);
}
