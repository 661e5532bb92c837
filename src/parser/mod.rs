//! Parser for the flowc source language.
//!
//! The parser walks the grammar once, allocating storage cells and building
//! the instruction graph as it goes; there is no intermediate syntax tree.

pub mod error;
pub mod parser;
pub mod symbols;
pub mod token_stream;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{ParseOptions, Parser, parse_source};
pub use symbols::SymbolTable;
pub use token_stream::{MAX_LOOKAHEAD, TokenStream};
