//! Per-cycle pipeline occupancy traces.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{PIPELINE_DEPTH, STAGE_NAMES};
use crate::core::pipeline::hazards::HazardAction;
use crate::isa::instruction::Instruction;

/// Index of each stage within [`CycleTrace::stages`].
pub mod stage {
    /// Instruction fetch.
    pub const IF: usize = 0;
    /// Instruction decode and register read.
    pub const ID: usize = 1;
    /// Execute.
    pub const EX: usize = 2;
    /// Memory access.
    pub const MEM: usize = 3;
    /// Writeback.
    pub const WB: usize = 4;
}

/// What a stage did during one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StageState {
    /// No instruction and no bubble.
    #[default]
    Idle,
    /// A bubble passed through.
    Bubble,
    /// A real instruction was processed.
    Active {
        /// Instruction index.
        pc: usize,
        /// The instruction.
        inst: Instruction,
    },
    /// The instruction was held in place by a load-use stall.
    Stalled {
        /// Instruction index.
        pc: usize,
        /// The instruction.
        inst: Instruction,
    },
    /// The instruction was discarded by a taken branch or jump.
    Flushed {
        /// Instruction index.
        pc: usize,
        /// The instruction.
        inst: Instruction,
    },
}

impl StageState {
    /// The instruction index, if the stage held a real instruction.
    pub const fn pc(&self) -> Option<usize> {
        match *self {
            Self::Active { pc, .. } | Self::Stalled { pc, .. } | Self::Flushed { pc, .. } => {
                Some(pc)
            }
            Self::Idle | Self::Bubble => None,
        }
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("-"),
            Self::Bubble => f.write_str("(bubble)"),
            Self::Active { pc, inst } => write!(f, "{pc}:{inst}"),
            Self::Stalled { pc, inst } => write!(f, "{pc}:{inst} [stall]"),
            Self::Flushed { pc, inst } => write!(f, "{pc}:{inst} [flush]"),
        }
    }
}

/// Snapshot of one clock cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleTrace {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Stage states in IF, ID, EX, MEM, WB order.
    pub stages: [StageState; PIPELINE_DEPTH],
    /// Program counter at the start of the cycle.
    pub pc: usize,
    /// Hazard decision taken this cycle.
    pub action: HazardAction,
}

impl CycleTrace {
    /// State of the stage at `idx` (see [`stage`]).
    pub fn stage(&self, idx: usize) -> StageState {
        self.stages.get(idx).copied().unwrap_or_default()
    }
}

impl fmt::Display for CycleTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cycle {:>4} PC={:<4}", self.cycle, self.pc)?;
        for (name, state) in STAGE_NAMES.iter().zip(&self.stages) {
            write!(f, " | {name}: {:<24}", state.to_string())?;
        }
        match self.action {
            HazardAction::Proceed => Ok(()),
            HazardAction::Stall => f.write_str(" | STALL"),
            HazardAction::Flush { target } => write!(f, " | FLUSH -> {target}"),
        }
    }
}
