//! Flat variable namespace.

use std::collections::HashMap;

use crate::ir::error::IrError;
use crate::ir::ids::Location;
use crate::ir::storage::Storage;

/// Variable name to storage location mapping.
///
/// Populated by the declaration section and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    by_name: HashMap<String, Location>,
    declarations: Vec<(String, Location)>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a zero-initialized cell for `name` and records the binding.
    ///
    /// A repeated name still consumes a fresh cell, but the earlier binding
    /// stays in effect for every later lookup.
    pub fn declare(&mut self, name: &str, storage: &mut Storage) -> Result<Location, IrError> {
        let location = storage.allocate(0)?;
        self.by_name.entry(name.to_string()).or_insert(location);
        self.declarations.push((name.to_string(), location));
        Ok(location)
    }

    /// Looks up the cell bound to `name`.
    pub fn resolve(&self, name: &str) -> Option<Location> {
        self.by_name.get(name).copied()
    }

    /// Returns the declared name of a variable cell.
    pub fn name_of(&self, location: Location) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(_, declared)| *declared == location)
            .map(|(name, _)| name.as_str())
    }

    /// Declarations in source order, duplicates included.
    pub fn declarations(&self) -> &[(String, Location)] {
        &self.declarations
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` when nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
