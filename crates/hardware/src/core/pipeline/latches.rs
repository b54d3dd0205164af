//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Slots:** Every latch is a [`Latch`] that is empty, holds a bubble, or holds one entry.
//! 2. **Instruction Flow:** One entry type per boundary carrying exactly what the next stage needs.
//! 3. **Double Buffering:** [`PipelineLatches`] is cloned as the previous-cycle snapshot
//!    while a fresh set is filled, so no stage observes a same-cycle update.

use crate::common::error::EngineError;
use crate::common::reg::Word;
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::{Instruction, Reg};

/// A single pipeline slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Latch<T> {
    /// Nothing has entered this slot (start-up or drain).
    #[default]
    Empty,
    /// A no-op injected by a stall or flush.
    Bubble,
    /// A real in-flight instruction.
    Occupied(T),
}

impl<T> Latch<T> {
    /// Places an entry in the slot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overflow`] if the slot already holds an entry this
    /// cycle. A bubble may be overwritten.
    pub fn put(&mut self, entry: T, stage: &'static str) -> Result<(), EngineError> {
        if self.is_occupied() {
            return Err(EngineError::Overflow { stage });
        }
        *self = Self::Occupied(entry);
        Ok(())
    }

    /// Injects a bubble unless a real entry already occupies the slot.
    pub fn bubble(&mut self) {
        if !self.is_occupied() {
            *self = Self::Bubble;
        }
    }

    /// The entry, if a real instruction occupies the slot.
    pub const fn entry(&self) -> Option<&T> {
        match self {
            Self::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// True if a real instruction occupies the slot.
    pub const fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// True if the slot holds a bubble.
    pub const fn is_bubble(&self) -> bool {
        matches!(self, Self::Bubble)
    }
}

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Instruction index.
    pub pc: usize,
    /// Fetched instruction.
    pub inst: Instruction,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Carries the register-file values read in ID; EX replaces them with
/// forwarded values when a newer producer is still in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Instruction index.
    pub pc: usize,
    /// Decoded instruction.
    pub inst: Instruction,
    /// First source register, if read.
    pub rs1: Option<Reg>,
    /// Second source register, if read.
    pub rs2: Option<Reg>,
    /// Destination register, if written (never `R0`).
    pub rd: Option<Reg>,
    /// Value read from `rs1` in ID.
    pub rv1: Word,
    /// Value read from `rs2` in ID.
    pub rv2: Word,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Instruction index.
    pub pc: usize,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Destination register, if written.
    pub rd: Option<Reg>,
    /// ALU result, or effective address for memory operations.
    pub alu: Word,
    /// Data to be stored (for `STORE`).
    pub store_data: Word,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Instruction index.
    pub pc: usize,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Destination register, if written.
    pub rd: Option<Reg>,
    /// ALU result (for non-load instructions).
    pub alu: Word,
    /// Data loaded from memory (for `LOAD`).
    pub load_data: Word,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
}

impl MemWbEntry {
    /// Value committed to `rd` in WB.
    pub const fn result(&self) -> Word {
        if self.ctrl.mem_read {
            self.load_data
        } else {
            self.alu
        }
    }
}

/// The four inter-stage latches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineLatches {
    /// IF/ID latch.
    pub if_id: Latch<IfIdEntry>,
    /// ID/EX latch.
    pub id_ex: Latch<IdExEntry>,
    /// EX/MEM latch.
    pub ex_mem: Latch<ExMemEntry>,
    /// MEM/WB latch.
    pub mem_wb: Latch<MemWbEntry>,
}

impl PipelineLatches {
    /// True if no latch holds a real instruction.
    pub const fn is_drained(&self) -> bool {
        !(self.if_id.is_occupied()
            || self.id_ex.is_occupied()
            || self.ex_mem.is_occupied()
            || self.mem_wb.is_occupied())
    }
}
