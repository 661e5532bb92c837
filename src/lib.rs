//! Library entrypoint for `flowc`.
//!
//! The crate exposes the lexer, the parser that lowers source programs into
//! an instruction graph, the IR itself, and an executor for that graph.

pub mod ir;
pub mod lexer;
pub mod parser;
pub mod vm;
