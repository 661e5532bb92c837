//! Instruction graph: index-based node arena with fall-through and target edges.
//!
//! Every node owns one optional `next` edge. Jump-kind instructions carry an
//! additional `target` edge that may point anywhere, including backwards to a
//! loop header or forwards to a join node that is also reached via `next`.

use std::fmt;

use crate::ir::error::IrError;
use crate::ir::ids::{Location, NodeId};

/// Default upper bound on nodes in one graph.
pub const DEFAULT_MAX_NODES: usize = 100_000;

/// Binary arithmetic operator of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    /// Applies the operator with overflow and division checks.
    ///
    /// Returns `None` on overflow or division by zero.
    pub fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            Self::Add => left.checked_add(right),
            Self::Subtract => left.checked_sub(right),
            Self::Multiply => left.checked_mul(right),
            Self::Divide => left.checked_div(right),
        }
    }

    /// Source spelling.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// Relation tested by a conditional jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationalOp {
    Greater,
    Less,
    NotEqual,
}

impl RelationalOp {
    /// Evaluates `left <self> right`.
    pub fn holds(self, left: i64, right: i64) -> bool {
        match self {
            Self::Greater => left > right,
            Self::Less => left < right,
            Self::NotEqual => left != right,
        }
    }

    /// Source spelling.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::Less => "<",
            Self::NotEqual => "!=",
        }
    }
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Direct copy of one cell.
    Primary(Location),
    /// `left op right`.
    Binary {
        op: ArithmeticOp,
        left: Location,
        right: Location,
    },
}

impl Expr {
    /// Cells read by this expression.
    pub fn operands(self) -> impl Iterator<Item = Location> {
        let (first, second) = match self {
            Self::Primary(location) => (location, None),
            Self::Binary { left, right, .. } => (left, Some(right)),
        };
        std::iter::once(first).chain(second)
    }
}

/// One IR instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `dest = source`.
    Assign { dest: Location, source: Expr },
    /// Pops the next queued input into `dest`.
    Input { dest: Location },
    /// Emits the value of `src`.
    Output { src: Location },
    /// True falls through to `next`; false transfers to `target`.
    CondJump {
        relation: RelationalOp,
        left: Location,
        right: Location,
        target: NodeId,
    },
    /// Unconditional transfer to `target`.
    Jump { target: NodeId },
    /// Join point with no effect.
    NoOp,
}

impl Instruction {
    /// Target edge of jump-kind instructions.
    pub fn target(&self) -> Option<NodeId> {
        match *self {
            Self::CondJump { target, .. } | Self::Jump { target } => Some(target),
            _ => None,
        }
    }

    /// Storage cells this instruction reads or writes.
    pub fn locations(&self) -> Vec<Location> {
        match *self {
            Self::Assign { dest, source } => {
                std::iter::once(dest).chain(source.operands()).collect()
            }
            Self::Input { dest } => vec![dest],
            Self::Output { src } => vec![src],
            Self::CondJump { left, right, .. } => vec![left, right],
            Self::Jump { .. } | Self::NoOp => Vec::new(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign {
                dest,
                source: Expr::Primary(src),
            } => write!(f, "assign @{dest} = @{src}"),
            Self::Assign {
                dest,
                source: Expr::Binary { op, left, right },
            } => write!(f, "assign @{dest} = @{left} {} @{right}", op.symbol()),
            Self::Input { dest } => write!(f, "input @{dest}"),
            Self::Output { src } => write!(f, "output @{src}"),
            Self::CondJump {
                relation,
                left,
                right,
                target,
            } => write!(
                f,
                "cjmp @{left} {} @{right} else #{target}",
                relation.symbol()
            ),
            Self::Jump { target } => write!(f, "jmp #{target}"),
            Self::NoOp => f.write_str("noop"),
        }
    }
}

/// One node of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    /// Operation performed by this node.
    pub instruction: Instruction,
    /// Sequential successor, `None` at the end of a chain.
    pub next: Option<NodeId>,
}

/// Node arena. Edges are [`NodeId`]s into this arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionGraph {
    nodes: Vec<Node>,
    max_nodes: usize,
}

impl InstructionGraph {
    /// Creates an empty graph that accepts at most `max_nodes` nodes.
    pub fn new(max_nodes: usize) -> Self {
        Self {
            nodes: Vec::new(),
            max_nodes,
        }
    }

    /// Allocates a node with an empty `next` edge.
    pub fn push(&mut self, instruction: Instruction) -> Result<NodeId, IrError> {
        self.push_with_next(instruction, None)
    }

    /// Allocates a node with the given `next` edge.
    pub fn push_with_next(
        &mut self,
        instruction: Instruction,
        next: Option<NodeId>,
    ) -> Result<NodeId, IrError> {
        let index = self.nodes.len();
        if index >= self.max_nodes {
            return Err(IrError::limit_exceeded(
                "instruction node limit exceeded",
                format!("limit {}, attempted node {}", self.max_nodes, index + 1),
            ));
        }

        let id = NodeId::from_index(index).ok_or_else(|| {
            IrError::limit_exceeded("instruction node limit exceeded", format!("node {index}"))
        })?;
        self.nodes.push(Node { instruction, next });
        Ok(id)
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the instruction of the given node.
    pub fn instruction(&self, id: NodeId) -> Option<&Instruction> {
        self.node(id).map(|node| &node.instruction)
    }

    /// Returns the `next` edge of the given node.
    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.next)
    }

    /// Returns the `target` edge of the given node.
    pub fn target_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.instruction.target())
    }

    /// Sets the `next` edge of `id`.
    pub fn set_next(&mut self, id: NodeId, next: NodeId) -> Result<(), IrError> {
        let len = self.nodes.len();
        let node = self.nodes.get_mut(id.index()).ok_or_else(|| {
            IrError::invalid_edge("cannot link unknown node", format!("#{id} of {len}"))
        })?;
        node.next = Some(next);
        Ok(())
    }

    /// Follows `next` edges from `entry` and returns the node whose `next` is empty.
    ///
    /// Target edges are never followed.
    pub fn tail_of(&self, entry: NodeId) -> Result<NodeId, IrError> {
        let mut current = entry;
        for _ in 0..=self.nodes.len() {
            let node = self.node(current).ok_or_else(|| {
                IrError::invalid_edge(
                    "fall-through chain leaves the graph",
                    format!("#{current} of {}", self.nodes.len()),
                )
            })?;
            match node.next {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }

        Err(IrError::invariant_violation(
            "fall-through chain does not terminate",
            format!("cycle on next edges reachable from #{entry}"),
        ))
    }

    /// Attaches `node` after the last node of the chain starting at `entry`.
    pub fn tail_link(&mut self, entry: NodeId, node: NodeId) -> Result<(), IrError> {
        let tail = self.tail_of(entry)?;
        self.set_next(tail, node)
    }

    /// Nodes in allocation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterates `(id, node)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index as u32), node))
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no nodes were allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Configured node limit.
    pub const fn max_nodes(&self) -> usize {
        self.max_nodes
    }
}

impl Default for InstructionGraph {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NODES)
    }
}
