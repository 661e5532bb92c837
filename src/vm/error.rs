//! VM error contracts.

use std::fmt;

/// Stable VM error categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmErrorKind {
    /// An `Input` node ran with an empty input queue.
    InputExhausted,
    /// Integer division by zero.
    DivisionByZero,
    /// Arithmetic overflow.
    InvalidArithmetic,
    /// An edge points outside the node arena.
    InvalidNode,
    /// An operand points outside the storage arena.
    InvalidLocation,
    /// The configured step budget ran out.
    StepLimitExceeded,
}

impl fmt::Display for VmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputExhausted => write!(f, "input exhausted"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::InvalidArithmetic => write!(f, "invalid arithmetic"),
            Self::InvalidNode => write!(f, "invalid node"),
            Self::InvalidLocation => write!(f, "invalid location"),
            Self::StepLimitExceeded => write!(f, "step limit exceeded"),
        }
    }
}

/// VM error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmError {
    /// Error category.
    pub kind: VmErrorKind,
    /// Human-readable error message.
    pub message: String,
}

impl VmError {
    /// Creates a VM error.
    pub fn new(kind: VmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an `InputExhausted` error.
    pub fn input_exhausted(node: u32) -> Self {
        Self::new(
            VmErrorKind::InputExhausted,
            format!("input at node #{node} found an empty input queue"),
        )
    }

    /// Creates a `DivisionByZero` error.
    pub fn division_by_zero(node: u32) -> Self {
        Self::new(
            VmErrorKind::DivisionByZero,
            format!("division by zero at node #{node}"),
        )
    }

    /// Creates an `InvalidArithmetic` error.
    pub fn invalid_arithmetic(node: u32, left: i64, op: &str, right: i64) -> Self {
        Self::new(
            VmErrorKind::InvalidArithmetic,
            format!("arithmetic overflow at node #{node}: {left} {op} {right}"),
        )
    }

    /// Creates an `InvalidNode` error.
    pub fn invalid_node(node: u32, limit: usize) -> Self {
        Self::new(
            VmErrorKind::InvalidNode,
            format!("node #{node} out of bounds (graph holds {limit})"),
        )
    }

    /// Creates an `InvalidLocation` error.
    pub fn invalid_location(location: u32, limit: usize) -> Self {
        Self::new(
            VmErrorKind::InvalidLocation,
            format!("cell @{location} out of bounds (storage holds {limit})"),
        )
    }

    /// Creates a `StepLimitExceeded` error.
    pub fn step_limit_exceeded(limit: u64) -> Self {
        Self::new(
            VmErrorKind::StepLimitExceeded,
            format!("execution exceeded {limit} steps"),
        )
    }
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for VmError {}
