//! Straight-line statement lowering and statement-list splicing.

use crate::ir::error::IrError;
use crate::ir::graph::{Expr, Instruction, InstructionGraph};
use crate::ir::ids::{Location, NodeId};

/// Lowers `dest = source;` to one `Assign` node.
pub fn lower_assign(
    graph: &mut InstructionGraph,
    dest: Location,
    source: Expr,
) -> Result<NodeId, IrError> {
    graph.push(Instruction::Assign { dest, source })
}

/// Lowers `input dest;` to one `Input` node.
pub fn lower_input(graph: &mut InstructionGraph, dest: Location) -> Result<NodeId, IrError> {
    graph.push(Instruction::Input { dest })
}

/// Lowers `output src;` to one `Output` node.
pub fn lower_output(graph: &mut InstructionGraph, src: Location) -> Result<NodeId, IrError> {
    graph.push(Instruction::Output { src })
}

/// Concatenates statement subgraphs in source order and returns the list entry.
///
/// Returns `None` for an empty slice.
pub fn splice(graph: &mut InstructionGraph, entries: &[NodeId]) -> Result<Option<NodeId>, IrError> {
    let Some((&first, rest)) = entries.split_first() else {
        return Ok(None);
    };

    let mut previous = first;
    for &entry in rest {
        graph.tail_link(previous, entry)?;
        previous = entry;
    }

    Ok(Some(first))
}
