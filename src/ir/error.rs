//! IR error contracts.

use std::fmt;

/// Stable IR error categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrErrorKind {
    /// A configured resource limit was exceeded.
    LimitExceeded,
    /// A required IR invariant was violated.
    InvariantViolation,
    /// A `next` or `target` edge points outside the node arena.
    InvalidEdge,
    /// An operand refers to a storage cell that was never allocated.
    InvalidLocation,
}

/// IR error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrError {
    /// Error category.
    pub kind: IrErrorKind,
    /// Human-readable error summary.
    pub message: String,
    /// Optional additional detail.
    pub detail: Option<String>,
}

impl IrError {
    /// Creates an IR error.
    pub fn new(kind: IrErrorKind, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail,
        }
    }

    /// Creates a `LimitExceeded` error.
    pub fn limit_exceeded(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(IrErrorKind::LimitExceeded, message, Some(detail.into()))
    }

    /// Creates an `InvariantViolation` error.
    pub fn invariant_violation(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(IrErrorKind::InvariantViolation, message, Some(detail.into()))
    }

    /// Creates an `InvalidEdge` error.
    pub fn invalid_edge(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(IrErrorKind::InvalidEdge, message, Some(detail.into()))
    }

    /// Creates an `InvalidLocation` error.
    pub fn invalid_location(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(IrErrorKind::InvalidLocation, message, Some(detail.into()))
    }
}

impl fmt::Display for IrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for IrError {}
