//! Executor-facing program container.

use std::collections::VecDeque;

use crate::ir::graph::InstructionGraph;
use crate::ir::ids::NodeId;
use crate::ir::storage::Storage;
use crate::parser::symbols::SymbolTable;

/// Result of one successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Every node built during the parse.
    pub graph: InstructionGraph,
    /// First node to execute.
    pub entry: NodeId,
    /// Initial variable and constant values.
    pub storage: Storage,
    /// Declared variables.
    pub symbols: SymbolTable,
    /// Trailing input values, front first.
    pub inputs: VecDeque<i64>,
}

impl Program {
    /// Returns the location-ordered initial cell values.
    pub fn initial_memory(&self) -> &[i64] {
        self.storage.cells()
    }

    /// Returns the queued inputs as a contiguous vector.
    pub fn input_values(&self) -> Vec<i64> {
        self.inputs.iter().copied().collect()
    }
}
