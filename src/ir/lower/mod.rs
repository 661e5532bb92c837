//! Lowering of parsed statements into instruction subgraphs.
//!
//! Each function builds one subgraph and returns its entry node. A subgraph
//! ends in exactly one node with an empty `next` edge, so the grammar walker
//! can splice subgraphs together with [`InstructionGraph::tail_link`].
//! Target edges are absolute node ids and survive later splicing unchanged.
//!
//! [`InstructionGraph::tail_link`]: crate::ir::InstructionGraph::tail_link

pub mod control_flow;
pub mod statement;

use crate::ir::graph::RelationalOp;
use crate::ir::ids::{Location, NodeId};

pub use control_flow::{lower_for, lower_if, lower_switch, lower_while};
pub use statement::{lower_assign, lower_input, lower_output, splice};

/// Relational test shared by `if`, `while` and `for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Relation to evaluate.
    pub relation: RelationalOp,
    /// Left operand cell.
    pub left: Location,
    /// Right operand cell.
    pub right: Location,
}

impl Condition {
    /// Creates a condition value.
    pub const fn new(relation: RelationalOp, left: Location, right: Location) -> Self {
        Self {
            relation,
            left,
            right,
        }
    }
}

/// One parsed `case` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwitchCase {
    /// Constant cell holding the case label.
    pub value: Location,
    /// Entry of the clause body.
    pub body: NodeId,
}
