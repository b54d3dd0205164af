//! Memory Access (MEM) Stage.
//!
//! Performs the data memory access for `LOAD` and `STORE`. Every other
//! instruction passes through unchanged. Accesses complete within the cycle.

use tracing::{debug, trace};

use crate::common::error::EngineError;
use crate::core::Cpu;
use crate::core::pipeline::latches::{ExMemEntry, Latch, MemWbEntry};
use crate::core::pipeline::trace::StageState;

/// Executes the memory access stage.
///
/// # Errors
///
/// Returns [`EngineError::MemoryFault`] if the effective address lies outside
/// data memory, or [`EngineError::Overflow`] if the MEM/WB latch was already
/// filled this cycle.
pub fn mem_stage(
    cpu: &mut Cpu,
    ex_mem: &Latch<ExMemEntry>,
    mem_wb: &mut Latch<MemWbEntry>,
) -> Result<StageState, EngineError> {
    let entry = match ex_mem {
        Latch::Empty => return Ok(StageState::Idle),
        Latch::Bubble => {
            mem_wb.bubble();
            return Ok(StageState::Bubble);
        }
        Latch::Occupied(entry) => entry,
    };

    let mut load_data = 0;
    if entry.ctrl.mem_read || entry.ctrl.mem_write {
        let size = cpu.memory.size();
        let addr = usize::try_from(entry.alu)
            .ok()
            .filter(|&addr| addr < size)
            .ok_or(EngineError::MemoryFault {
                pc: entry.pc,
                addr: entry.alu,
                size,
            })?;

        if entry.ctrl.mem_read {
            load_data = cpu.memory.read(addr);
            debug!(pc = entry.pc, addr, value = load_data, "load");
        }
        if entry.ctrl.mem_write {
            cpu.memory.write(addr, entry.store_data);
            trace!(pc = entry.pc, addr, value = entry.store_data, "store");
        }
    }

    mem_wb.put(
        MemWbEntry {
            pc: entry.pc,
            inst: entry.inst,
            rd: entry.rd,
            alu: entry.alu,
            load_data,
            ctrl: entry.ctrl,
        },
        "MEM/WB",
    )?;

    Ok(StageState::Active {
        pc: entry.pc,
        inst: entry.inst,
    })
}
