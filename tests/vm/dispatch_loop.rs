//! End-to-end execution through the dispatch loop.

use flowc::ir::Program;
use flowc::parser::{ParseOptions, parse_source};
use flowc::vm::{VmMachine, execute};

fn parse(source: &str) -> Program {
    parse_source(source, ParseOptions::default()).expect("program should parse")
}

fn run(source: &str) -> Vec<i64> {
    execute(&parse(source)).expect("program should run")
}

#[test]
fn outputs_are_collected_in_order() {
    assert_eq!(run("a, b; { a = 1; b = 2; output b; output a; }"), vec![2, 1]);
}

#[test]
fn inputs_are_consumed_front_first() {
    assert_eq!(
        run("a, b; { input a; input b; output b; output a; } 5 6"),
        vec![6, 5]
    );
}

#[test]
fn unused_inputs_remain_queued() {
    let program = parse("a; { input a; } 1 2 3");
    let mut vm = VmMachine::new(&program);
    vm.run().expect("runs");
    assert_eq!(vm.remaining_inputs().iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(vm.memory()[0], 1);
}

#[test]
fn running_leaves_the_program_untouched() {
    let program = parse("a; { input a; a = a * 2; output a; } 21");
    let before = program.clone();
    assert_eq!(execute(&program).expect("runs"), vec![42]);
    assert_eq!(execute(&program).expect("runs again"), vec![42]);
    assert_eq!(program, before);
    assert_eq!(program.initial_memory(), &[0, 2]);
}

#[test]
fn subtraction_reaches_negative_values() {
    assert_eq!(run("a, b; { a = 0 - 7; b = a / 2; output a; output b; }"), vec![-7, -3]);
}

#[test]
fn sums_a_countdown() {
    let source = "n, s; { input n; s = 0; while n > 0 { s = s + n; n = n - 1; } output s; } 4";
    assert_eq!(run(source), vec![10]);
}

#[test]
fn counts_odd_numbers() {
    let source = "n, count, r; {
        input n;
        count = 0;
        while n > 0 {
            r = n / 2;
            r = r * 2;
            if r != n { count = count + 1; }
            n = n - 1;
        }
        output count;
    } 7";
    assert_eq!(run(source), vec![4]);
}

#[test]
fn switch_selects_by_value() {
    let source = "x, r; {
        input x;
        switch x { case 1: r = 10; case 2: r = 20; default: r = 30; }
        output r;
    }";
    let mut program = parse(source);
    for (input, expected) in [(1, 10), (2, 20), (7, 30)] {
        program.inputs = [input].into();
        assert_eq!(execute(&program).expect("runs"), vec![expected]);
    }
}

#[test]
fn step_counter_matches_executed_nodes() {
    let program = parse("a; { a = 1; output a; }");
    let mut vm = VmMachine::new(&program);
    vm.run().expect("runs");
    assert_eq!(vm.steps(), 2);
    assert_eq!(vm.outputs(), &[1]);
}
