//! Flat storage arena for variable and constant cells.
//!
//! Every declared variable and every literal occurrence gets its own cell.
//! Cells are handed out in increasing order and never reused, so a
//! [`Location`] stays valid for the lifetime of the program.

use crate::ir::error::IrError;
use crate::ir::ids::Location;

/// Default number of cells available to one program.
pub const DEFAULT_STORAGE_CAPACITY: usize = 1000;

/// Fixed-capacity cell arena with a monotonic allocation cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    cells: Vec<i64>,
    capacity: usize,
}

impl Storage {
    /// Creates an empty arena that can hold `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: Vec::new(),
            capacity,
        }
    }

    /// Appends `value` at the next free location.
    pub fn allocate(&mut self, value: i64) -> Result<Location, IrError> {
        let index = self.cells.len();
        if index >= self.capacity {
            return Err(IrError::limit_exceeded(
                "storage arena exhausted",
                format!("capacity {}, attempted cell {}", self.capacity, index + 1),
            ));
        }

        let location = Location::from_index(index).ok_or_else(|| {
            IrError::limit_exceeded("storage arena exhausted", format!("cell index {index}"))
        })?;
        self.cells.push(value);
        Ok(location)
    }

    /// Reads one cell.
    pub fn get(&self, location: Location) -> Option<i64> {
        self.cells.get(location.index()).copied()
    }

    /// Overwrites one allocated cell. Returns `false` if it was never allocated.
    pub fn set(&mut self, location: Location, value: i64) -> bool {
        match self.cells.get_mut(location.index()) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Returns `true` when `location` has been allocated.
    pub fn contains(&self, location: Location) -> bool {
        location.index() < self.cells.len()
    }

    /// Allocated cells in location order.
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Number of allocated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Configured capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cells still available.
    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.cells.len())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_CAPACITY)
    }
}
