//! Graph-walking executor.

use std::collections::VecDeque;

use log::debug;

use crate::ir::graph::{ArithmeticOp, Expr, Instruction};
use crate::ir::ids::{Location, NodeId};
use crate::ir::program::Program;
use crate::vm::error::VmError;

/// Default maximum number of executed nodes.
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Executes a [`Program`] against a private copy of its storage and inputs.
pub struct VmMachine<'p> {
    program: &'p Program,
    memory: Vec<i64>,
    inputs: VecDeque<i64>,
    outputs: Vec<i64>,
    max_steps: u64,
    steps: u64,
}

impl<'p> VmMachine<'p> {
    /// Creates a VM with the default step limit.
    pub fn new(program: &'p Program) -> Self {
        Self::with_step_limit(program, DEFAULT_MAX_STEPS)
    }

    /// Creates a VM with a custom step limit.
    pub fn with_step_limit(program: &'p Program, limit: u64) -> Self {
        Self {
            program,
            memory: program.storage.cells().to_vec(),
            inputs: program.inputs.clone(),
            outputs: Vec::new(),
            max_steps: limit,
            steps: 0,
        }
    }

    /// Values produced by `Output` nodes, in execution order.
    pub fn outputs(&self) -> &[i64] {
        &self.outputs
    }

    /// Current cell values.
    pub fn memory(&self) -> &[i64] {
        &self.memory
    }

    /// Inputs not yet consumed.
    pub fn remaining_inputs(&self) -> &VecDeque<i64> {
        &self.inputs
    }

    /// Nodes executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Runs from the program entry until a node without a successor finishes.
    pub fn run(&mut self) -> Result<(), VmError> {
        let mut pc = Some(self.program.entry);

        while let Some(id) = pc {
            if self.steps >= self.max_steps {
                return Err(VmError::step_limit_exceeded(self.max_steps));
            }
            self.steps += 1;
            pc = self.step(id)?;
        }

        debug!(
            "vm finished: {} step(s), {} output(s), {} input(s) left",
            self.steps,
            self.outputs.len(),
            self.inputs.len()
        );
        Ok(())
    }

    /// Executes one node and returns the node to run next.
    fn step(&mut self, id: NodeId) -> Result<Option<NodeId>, VmError> {
        let graph = &self.program.graph;
        let node = *graph
            .node(id)
            .ok_or_else(|| VmError::invalid_node(id.value(), graph.len()))?;

        match node.instruction {
            Instruction::Assign { dest, source } => {
                let value = self.evaluate(id, source)?;
                self.store(dest, value)?;
                Ok(node.next)
            }

            Instruction::Input { dest } => {
                let value = self
                    .inputs
                    .pop_front()
                    .ok_or_else(|| VmError::input_exhausted(id.value()))?;
                self.store(dest, value)?;
                Ok(node.next)
            }

            Instruction::Output { src } => {
                let value = self.load(src)?;
                self.outputs.push(value);
                Ok(node.next)
            }

            Instruction::CondJump {
                relation,
                left,
                right,
                target,
            } => {
                if relation.holds(self.load(left)?, self.load(right)?) {
                    Ok(node.next)
                } else {
                    Ok(Some(target))
                }
            }

            Instruction::Jump { target } => Ok(Some(target)),

            Instruction::NoOp => Ok(node.next),
        }
    }

    fn evaluate(&self, id: NodeId, source: Expr) -> Result<i64, VmError> {
        match source {
            Expr::Primary(location) => self.load(location),
            Expr::Binary { op, left, right } => {
                let left = self.load(left)?;
                let right = self.load(right)?;
                if op == ArithmeticOp::Divide && right == 0 {
                    return Err(VmError::division_by_zero(id.value()));
                }
                op.apply(left, right).ok_or_else(|| {
                    VmError::invalid_arithmetic(id.value(), left, op.symbol(), right)
                })
            }
        }
    }

    fn load(&self, location: Location) -> Result<i64, VmError> {
        self.memory
            .get(location.index())
            .copied()
            .ok_or_else(|| VmError::invalid_location(location.value(), self.memory.len()))
    }

    fn store(&mut self, location: Location, value: i64) -> Result<(), VmError> {
        let limit = self.memory.len();
        let cell = self
            .memory
            .get_mut(location.index())
            .ok_or_else(|| VmError::invalid_location(location.value(), limit))?;
        *cell = value;
        Ok(())
    }
}

/// Runs `program` with the default step limit and returns its outputs.
pub fn execute(program: &Program) -> Result<Vec<i64>, VmError> {
    let mut vm = VmMachine::new(program);
    vm.run()?;
    Ok(vm.outputs)
}
