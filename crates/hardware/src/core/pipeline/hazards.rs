//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! and control dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Identifies load-use hazards that require a one-cycle stall.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by bypassing the register file.
//! 3. **Control Resolution:** Turns a taken branch or jump into a flush of the younger stages.
//!
//! Every function here is pure over a read-only view of the previous cycle's
//! latches. A producer three instructions ahead needs no forwarding: WB commits
//! before ID reads the register file within the same cycle.

use serde::Serialize;

use crate::common::error::EngineError;
use crate::common::reg::Word;
use crate::core::pipeline::latches::{
    ExMemEntry, IdExEntry, IfIdEntry, Latch, MemWbEntry, PipelineLatches,
};
use crate::isa::instruction::Reg;

/// Where an EX operand value came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ForwardSource {
    /// The value read from the register file in ID.
    #[default]
    RegisterFile,
    /// The ALU result of the instruction one ahead (EX/MEM latch).
    ExMem,
    /// The result of the instruction two ahead (MEM/WB latch).
    MemWb,
}

/// Operand values supplied to EX after forwarding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardedOperands {
    /// First operand value.
    pub a: Word,
    /// Second operand value.
    pub b: Word,
    /// Source of the first operand.
    pub a_src: ForwardSource,
    /// Source of the second operand.
    pub b_src: ForwardSource,
}

/// Decision taken by the hazard unit for the instructions in IF and ID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum HazardAction {
    /// Every stage advances normally.
    #[default]
    Proceed,
    /// ID and IF hold their instructions; a bubble enters EX.
    Stall,
    /// IF and ID are discarded and fetch restarts at `target`.
    Flush {
        /// Redirected program counter.
        target: usize,
    },
}

/// Read-only view of the previous cycle's latches handed to the hazard unit.
#[derive(Clone, Copy, Debug)]
pub struct PipelineView<'a> {
    /// Instruction in ID.
    pub if_id: &'a Latch<IfIdEntry>,
    /// Instruction in EX.
    pub id_ex: &'a Latch<IdExEntry>,
    /// Instruction in MEM.
    pub ex_mem: &'a Latch<ExMemEntry>,
    /// Instruction in WB.
    pub mem_wb: &'a Latch<MemWbEntry>,
}

impl<'a> PipelineView<'a> {
    /// Builds a view over a latch snapshot.
    pub const fn of(latches: &'a PipelineLatches) -> Self {
        Self {
            if_id: &latches.if_id,
            id_ex: &latches.id_ex,
            ex_mem: &latches.ex_mem,
            mem_wb: &latches.mem_wb,
        }
    }
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in the Decode (ID) stage reads
/// a register that the `LOAD` currently in the Execute (EX) stage will write.
/// The loaded value exists only after MEM, one cycle too late for forwarding.
///
/// # Examples
///
/// ```text
/// EX: LOAD R8, [100]    <- loads into R8
/// ID: ADD  R9, R8, R10  <- reads R8
/// ```
///
/// This pair requires a one-cycle stall, after which R8 is forwarded from MEM/WB.
pub fn need_stall_load_use(id_ex: &Latch<IdExEntry>, if_id: &Latch<IfIdEntry>) -> bool {
    let (Some(ex_inst), Some(id_inst)) = (id_ex.entry(), if_id.entry()) else {
        return false;
    };
    if !ex_inst.ctrl.mem_read {
        return false;
    }
    ex_inst.rd.is_some_and(|rd| id_inst.inst.reads(rd))
}

fn forward_one(
    reg: Option<Reg>,
    reg_file_val: Word,
    pc: usize,
    ex_mem: &Latch<ExMemEntry>,
    mem_wb: &Latch<MemWbEntry>,
) -> Result<(Word, ForwardSource), EngineError> {
    let Some(reg) = reg else {
        return Ok((reg_file_val, ForwardSource::RegisterFile));
    };

    if let Some(mem_entry) = ex_mem.entry().filter(|e| e.rd == Some(reg)) {
        if mem_entry.ctrl.mem_read {
            return Err(EngineError::UnresolvedHazard { pc, reg });
        }
        return Ok((mem_entry.alu, ForwardSource::ExMem));
    }

    if let Some(wb_entry) = mem_wb.entry().filter(|e| e.rd == Some(reg)) {
        return Ok((wb_entry.result(), ForwardSource::MemWb));
    }

    Ok((reg_file_val, ForwardSource::RegisterFile))
}

/// Forwards register values from later pipeline stages to resolve data hazards.
///
/// For each source operand of the instruction entering EX, the nearest producer
/// wins: EX/MEM (ALU results only), then MEM/WB (ALU result or loaded value),
/// else the value read from the register file in ID.
///
/// # Errors
///
/// Returns [`EngineError::UnresolvedHazard`] if the nearest producer is a `LOAD`
/// still in EX/MEM, which means a required load-use stall was missed.
pub fn forward_operands(
    id_entry: &IdExEntry,
    ex_mem: &Latch<ExMemEntry>,
    mem_wb: &Latch<MemWbEntry>,
) -> Result<ForwardedOperands, EngineError> {
    let (a, a_src) = forward_one(id_entry.rs1, id_entry.rv1, id_entry.pc, ex_mem, mem_wb)?;
    let (b, b_src) = forward_one(id_entry.rs2, id_entry.rv2, id_entry.pc, ex_mem, mem_wb)?;
    Ok(ForwardedOperands {
        a,
        b,
        a_src,
        b_src,
    })
}

/// Decides the action for the younger stages this cycle.
///
/// `redirect` is the target of a branch or jump taken in EX this cycle. A flush
/// takes precedence over a stall: the stalled instruction is discarded anyway.
pub fn decide(view: &PipelineView<'_>, redirect: Option<usize>) -> HazardAction {
    if let Some(target) = redirect {
        HazardAction::Flush { target }
    } else if need_stall_load_use(view.id_ex, view.if_id) {
        HazardAction::Stall
    } else {
        HazardAction::Proceed
    }
}
