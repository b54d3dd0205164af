//! Writeback (WB) Stage.
//!
//! Commits results to the register file and retires the instruction. This is
//! the only place architectural registers change.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::latches::{Latch, MemWbEntry};
use crate::core::pipeline::trace::StageState;

/// Executes the writeback stage.
pub fn wb_stage(cpu: &mut Cpu, mem_wb: &Latch<MemWbEntry>) -> StageState {
    let entry = match mem_wb {
        Latch::Empty => return StageState::Idle,
        Latch::Bubble => return StageState::Bubble,
        Latch::Occupied(entry) => entry,
    };

    if let Some(rd) = entry.rd.filter(|_| entry.ctrl.reg_write) {
        let value = entry.result();
        cpu.regs.write(usize::from(rd), value);
        trace!(pc = entry.pc, rd, value, "writeback");
    }
    cpu.stats.record_retire(&entry.inst);

    StageState::Active {
        pc: entry.pc,
        inst: entry.inst,
    }
}
