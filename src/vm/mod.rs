//! Executor that walks the instruction graph.
//!
//! A `CondJump` whose relation holds continues on `next`, otherwise on
//! `target`; a `Jump` always continues on `target`. Execution ends after a
//! node with no successor.

pub mod error;
pub mod machine;

pub use error::{VmError, VmErrorKind};
pub use machine::{DEFAULT_MAX_STEPS, VmMachine, execute};
