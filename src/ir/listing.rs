//! Deterministic text rendering of a [`Program`].

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::ir::ids::Location;
use crate::ir::program::Program;

/// Renders variables, constants, queued inputs and every node in arena order.
///
/// ```text
/// var a @0 = 0
/// const @2 = 1
/// inputs [5, 7]
/// entry #3
/// #0: output @0 -> #1
/// ```
pub fn render_program(program: &Program) -> String {
    let mut out = String::new();

    let mut names: HashMap<Location, &str> = HashMap::new();
    for (name, location) in program.symbols.declarations() {
        names.entry(*location).or_insert(name.as_str());
    }

    for (index, value) in program.storage.cells().iter().enumerate() {
        let location = Location::new(index as u32);
        match names.get(&location) {
            Some(name) => {
                let _ = writeln!(out, "var {name} @{location} = {value}");
            }
            None => {
                let _ = writeln!(out, "const @{location} = {value}");
            }
        }
    }

    let inputs = program
        .inputs
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>();
    let _ = writeln!(out, "inputs [{}]", inputs.join(", "));
    let _ = writeln!(out, "entry #{}", program.entry);

    for (id, node) in program.graph.iter() {
        let _ = write!(out, "#{id}: {}", node.instruction);
        if let Some(next) = node.next {
            let _ = write!(out, " -> #{next}");
        }
        out.push('\n');
    }

    out
}
