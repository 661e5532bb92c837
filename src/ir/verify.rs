//! IR verification pass: structural validation of a built [`Program`].
//!
//! Catches lowering bugs (dangling edges, operands that were never
//! allocated) before the executor walks the graph.

use std::collections::BTreeSet;

use crate::ir::error::IrError;
use crate::ir::graph::InstructionGraph;
use crate::ir::ids::NodeId;
use crate::ir::program::Program;

// ===========================================================================
// Public API
// ===========================================================================

/// Verifies structural invariants of a program.
///
/// Returns the first error found, or `Ok(())` when the program is well-formed.
pub fn verify_program(program: &Program) -> Result<(), IrError> {
    ProgramVerifier::new(program).verify()
}

/// Diagnostic warning emitted by the debug verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyWarning {
    /// Warning category.
    pub kind: VerifyWarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Warning categories for the debug verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerifyWarningKind {
    /// A node that no path from the entry reaches.
    UnreachableNode,
}

/// Runs extended diagnostics on a verified program, returning non-fatal warnings.
///
/// The program should pass [`verify_program`] first.
pub fn verify_program_debug(program: &Program) -> Vec<VerifyWarning> {
    let reachable = reachable_nodes(&program.graph, program.entry);
    program
        .graph
        .iter()
        .filter(|(id, _)| !reachable.contains(id))
        .map(|(id, node)| VerifyWarning {
            kind: VerifyWarningKind::UnreachableNode,
            message: format!("node #{id} ({}) is unreachable from the entry", node.instruction),
        })
        .collect()
}

/// Collects every node reachable from `entry` through `next` and `target` edges.
///
/// Edges that leave the arena are ignored.
pub fn reachable_nodes(graph: &InstructionGraph, entry: NodeId) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::new();
    let mut pending = vec![entry];

    while let Some(id) = pending.pop() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        pending.extend(node.next);
        pending.extend(node.instruction.target());
    }

    seen
}

// ===========================================================================
// ProgramVerifier
// ===========================================================================

struct ProgramVerifier<'a> {
    program: &'a Program,
    node_count: usize,
}

impl<'a> ProgramVerifier<'a> {
    fn new(program: &'a Program) -> Self {
        Self {
            program,
            node_count: program.graph.len(),
        }
    }

    fn verify(&self) -> Result<(), IrError> {
        self.check_node(self.program.entry, "entry")?;

        for (id, node) in self.program.graph.iter() {
            if let Some(next) = node.next {
                self.check_node(next, &format!("next edge of #{id}"))?;
            }
            if let Some(target) = node.instruction.target() {
                self.check_node(target, &format!("target edge of #{id}"))?;
            }
            for location in node.instruction.locations() {
                if !self.program.storage.contains(location) {
                    return Err(IrError::invalid_location(
                        "operand refers to unallocated cell",
                        format!(
                            "node #{id} uses @{location}, storage holds {} cell(s)",
                            self.program.storage.len()
                        ),
                    ));
                }
            }
        }

        for (name, location) in self.program.symbols.declarations() {
            if !self.program.storage.contains(*location) {
                return Err(IrError::invalid_location(
                    "variable bound to unallocated cell",
                    format!("'{name}' -> @{location}"),
                ));
            }
        }

        Ok(())
    }

    fn check_node(&self, id: NodeId, what: &str) -> Result<(), IrError> {
        if id.index() < self.node_count {
            return Ok(());
        }
        Err(IrError::invalid_edge(
            format!("{what} is out of bounds"),
            format!("#{id}, graph holds {} node(s)", self.node_count),
        ))
    }
}
