//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **Forwarding:** Replaces stale register-file operands with in-flight results.
//! 2. **Arithmetic:** Computes ALU results and effective addresses.
//! 3. **Branch Resolution:** Evaluates `BEQ` and `JUMP` and reports the redirect target.

use tracing::debug;

use crate::common::error::EngineError;
use crate::common::reg::Word;
use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, ForwardSource};
use crate::core::pipeline::latches::{ExMemEntry, Latch, PipelineLatches};
use crate::core::pipeline::signals::AluOp;
use crate::core::pipeline::trace::StageState;
use crate::core::units::{Alu, Bru};
use crate::isa::instruction::Instruction;

/// Executes the execute stage.
///
/// Returns the stage state and, if a branch or jump was taken, the redirect
/// target that the hazard unit turns into a flush.
///
/// # Errors
///
/// Returns [`EngineError::UnresolvedHazard`] if an operand depends on a load
/// whose value is not yet available, or [`EngineError::Overflow`] if the
/// EX/MEM latch was already filled this cycle.
pub fn execute_stage(
    cpu: &mut Cpu,
    prev: &PipelineLatches,
    ex_mem: &mut Latch<ExMemEntry>,
) -> Result<(StageState, Option<usize>), EngineError> {
    let entry = match &prev.id_ex {
        Latch::Empty => return Ok((StageState::Idle, None)),
        Latch::Bubble => {
            ex_mem.bubble();
            return Ok((StageState::Bubble, None));
        }
        Latch::Occupied(entry) => entry,
    };

    let ops = hazards::forward_operands(entry, &prev.ex_mem, &prev.mem_wb)?;
    for (reg, src) in [(entry.rs1, ops.a_src), (entry.rs2, ops.b_src)] {
        match src {
            ForwardSource::ExMem => cpu.stats.forwards_ex_mem += 1,
            ForwardSource::MemWb => cpu.stats.forwards_mem_wb += 1,
            ForwardSource::RegisterFile => continue,
        }
        debug!(pc = entry.pc, reg = ?reg, source = ?src, "forward");
    }

    let (alu, store_data) = match entry.inst {
        Instruction::Load { offset, .. } => {
            (Alu::execute(AluOp::Add, ops.a, Word::from(offset)), 0)
        }
        Instruction::Store { addr, .. } => (Word::from(addr), ops.a),
        _ => (Alu::execute(entry.ctrl.alu, ops.a, ops.b), 0),
    };

    let redirect = if entry.ctrl.branch || entry.ctrl.jump {
        Bru::resolve(&entry.inst, entry.pc, ops.a, ops.b)
    } else {
        None
    };
    if let Some(target) = redirect {
        cpu.stats.branches_taken += 1;
        debug!(pc = entry.pc, to = target, "branch taken");
    }

    ex_mem.put(
        ExMemEntry {
            pc: entry.pc,
            inst: entry.inst,
            rd: entry.rd,
            alu,
            store_data,
            ctrl: entry.ctrl,
        },
        "EX/MEM",
    )?;

    Ok((
        StageState::Active {
            pc: entry.pc,
            inst: entry.inst,
        },
        redirect,
    ))
}
