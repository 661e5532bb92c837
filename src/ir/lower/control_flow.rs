//! Control-flow lowering: `if`, `while`, `switch` and `for` to jump graphs.
//!
//! All shapes rely on one contract: a `CondJump` whose relation holds falls
//! through to `next`, otherwise it transfers to `target`.

use log::debug;

use crate::ir::error::IrError;
use crate::ir::graph::{Instruction, InstructionGraph, RelationalOp};
use crate::ir::ids::{Location, NodeId};

use super::{Condition, SwitchCase};

fn cond_jump(
    graph: &mut InstructionGraph,
    condition: Condition,
    target: NodeId,
    next: NodeId,
) -> Result<NodeId, IrError> {
    graph.push_with_next(
        Instruction::CondJump {
            relation: condition.relation,
            left: condition.left,
            right: condition.right,
            target,
        },
        Some(next),
    )
}

/// Lowers `if cond body`.
///
/// ```text
/// cjmp --true--> body ... --> noop
///   \--false------------------^
/// ```
pub fn lower_if(
    graph: &mut InstructionGraph,
    condition: Condition,
    body: NodeId,
) -> Result<NodeId, IrError> {
    let join = graph.push(Instruction::NoOp)?;
    let head = cond_jump(graph, condition, join, body)?;
    graph.tail_link(body, join)?;

    debug!("lowered if: head #{head}, body #{body}, join #{join}");
    Ok(head)
}

/// Lowers `while cond body`.
///
/// The body's tail gets a back-edge `Jump` to the header; the header's false
/// edge and the `Jump`'s fall-through both reach the exit `NoOp`.
pub fn lower_while(
    graph: &mut InstructionGraph,
    condition: Condition,
    body: NodeId,
) -> Result<NodeId, IrError> {
    let exit = graph.push(Instruction::NoOp)?;
    let head = cond_jump(graph, condition, exit, body)?;
    let back = graph.push_with_next(Instruction::Jump { target: head }, Some(exit))?;
    graph.tail_link(body, back)?;

    debug!("lowered while: head #{head}, body #{body}, back #{back}, exit #{exit}");
    Ok(head)
}

/// Lowers `switch subject { case ...: body ... default: body }`.
///
/// Tests are chained in declaration order with `!=`: a true test falls through
/// to the next test, a false test (equality) jumps into the case body. Every
/// case body ends with a `Jump` to the shared exit, so bodies never fall
/// through into each other.
pub fn lower_switch(
    graph: &mut InstructionGraph,
    subject: Location,
    cases: &[SwitchCase],
    default: Option<NodeId>,
) -> Result<NodeId, IrError> {
    let exit = graph.push(Instruction::NoOp)?;

    let mut chain = match default {
        Some(body) => {
            graph.tail_link(body, exit)?;
            body
        }
        None => exit,
    };

    for case in cases.iter().rev() {
        let leave = graph.push(Instruction::Jump { target: exit })?;
        graph.tail_link(case.body, leave)?;

        let test = Condition::new(RelationalOp::NotEqual, subject, case.value);
        chain = cond_jump(graph, test, case.body, chain)?;
    }

    debug!(
        "lowered switch on @{subject}: {} case(s), default {}, entry #{chain}, exit #{exit}",
        cases.len(),
        default.is_some()
    );
    Ok(chain)
}

/// Lowers `for (init; cond; update) body` as `init; while (cond) { body; update; }`.
///
/// Returns `init` as the entry node.
pub fn lower_for(
    graph: &mut InstructionGraph,
    init: NodeId,
    condition: Condition,
    update: NodeId,
    body: NodeId,
) -> Result<NodeId, IrError> {
    let exit = graph.push(Instruction::NoOp)?;
    let head = cond_jump(graph, condition, exit, body)?;
    let back = graph.push_with_next(Instruction::Jump { target: head }, Some(exit))?;

    graph.set_next(init, head)?;
    graph.tail_link(body, update)?;
    graph.set_next(update, back)?;

    debug!("lowered for: init #{init}, head #{head}, update #{update}, exit #{exit}");
    Ok(init)
}
