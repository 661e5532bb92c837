use std::env;
use std::io::Read;
use std::process::ExitCode;

use flowc::ir::{Program, render_program, verify_program, verify_program_debug};
use flowc::parser::{ParseOptions, parse_source};
use flowc::vm::VmMachine;
use log::{LevelFilter, warn};
use simple_logger::SimpleLogger;

fn main() -> ExitCode {
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("failed to initialize logging: {e}");
    }

    match run(env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    if args.is_empty() {
        return Err(usage());
    }
    match args[0].as_str() {
        "run" => cmd_run(&args[1..]),
        "dump" => cmd_dump(&args[1..]),
        "check" => cmd_check(&args[1..]),
        "help" | "--help" | "-h" => {
            println!("{}", usage());
            Ok(())
        }
        other => Err(format!("unknown command '{}'\n\n{}", other, usage())),
    }
}

fn cmd_run(args: &[String]) -> Result<(), String> {
    let (input, options) = parse_args(args, "usage: flowc run [--strict] <program|->")?;
    let program = load_program(&input, options)?;
    let mut vm = VmMachine::new(&program);
    vm.run().map_err(|e| format!("runtime error: {e}"))?;

    let rendered = vm
        .outputs()
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>();
    if !rendered.is_empty() {
        println!("{}", rendered.join(" "));
    }
    Ok(())
}

fn cmd_dump(args: &[String]) -> Result<(), String> {
    let (input, options) = parse_args(args, "usage: flowc dump [--strict] <program|->")?;
    let program = load_program(&input, options)?;
    print!("{}", render_program(&program));
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let (input, options) = parse_args(args, "usage: flowc check [--strict] <program|->")?;
    let program = load_program(&input, options)?;
    println!(
        "ok: {} node(s), {} cell(s), {} input(s)",
        program.graph.len(),
        program.storage.len(),
        program.inputs.len()
    );
    Ok(())
}

fn parse_args(args: &[String], usage: &str) -> Result<(String, ParseOptions), String> {
    let mut options = ParseOptions::default();
    let mut input: Option<&str> = None;
    for arg in args {
        match arg.as_str() {
            "--strict" => options.strict_trailing_input = true,
            other if input.is_none() => input = Some(other),
            other => return Err(format!("unexpected argument '{}'\n{}", other, usage)),
        }
    }
    let input = input.ok_or_else(|| usage.to_string())?;
    Ok((input.to_string(), options))
}

fn load_program(input: &str, options: ParseOptions) -> Result<Program, String> {
    let src = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(input).map_err(|e| format!("failed to read '{}': {}", input, e))?
    };

    let program = parse_source(&src, options).map_err(|e| format!("{}: {}", input, e))?;
    verify_program(&program).map_err(|e| format!("{}: invalid program: {}", input, e))?;
    for warning in verify_program_debug(&program) {
        warn!("{}", warning.message);
    }
    Ok(program)
}

fn usage() -> String {
    [
        "flowc v0",
        "  flowc run [--strict] <program|->",
        "  flowc dump [--strict] <program|->",
        "  flowc check [--strict] <program|->",
    ]
    .join("\n")
}
