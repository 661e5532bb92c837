//! Intermediate representation handed from the parser to the executor.
//!
//! A program is a graph of instruction nodes stored in an index-based arena,
//! plus the storage arena with every variable and constant cell.

pub mod error;
pub mod graph;
pub mod ids;
pub mod listing;
pub mod lower;
pub mod program;
pub mod storage;
pub mod verify;

pub use error::{IrError, IrErrorKind};
pub use graph::{
    ArithmeticOp, DEFAULT_MAX_NODES, Expr, Instruction, InstructionGraph, Node, RelationalOp,
};
pub use ids::{Location, NodeId};
pub use listing::render_program;
pub use lower::{Condition, SwitchCase};
pub use program::Program;
pub use storage::{DEFAULT_STORAGE_CAPACITY, Storage};
pub use verify::{
    VerifyWarning, VerifyWarningKind, reachable_nodes, verify_program, verify_program_debug,
};
