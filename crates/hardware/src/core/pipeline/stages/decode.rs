//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Control Generation:** Derives the control signals that travel with the instruction.
//! 2. **Register Read:** Reads source operands from the register file after WB has committed.
//! 3. **Stall Application:** Holds the instruction in IF/ID and injects a bubble into EX.
//! 4. **Flush Application:** Discards the instruction and injects a bubble into EX.

use tracing::debug;

use crate::common::error::EngineError;
use crate::core::Cpu;
use crate::core::pipeline::hazards::HazardAction;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry, Latch, PipelineLatches};
use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::trace::StageState;

/// Executes the instruction decode stage.
///
/// Reads the instruction from the previous cycle's IF/ID latch and writes the
/// next cycle's ID/EX latch. On a stall the instruction is also written back
/// into the next IF/ID latch so it is re-presented next cycle.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if a destination latch was already filled this cycle.
pub fn decode_stage(
    cpu: &mut Cpu,
    if_id: &Latch<IfIdEntry>,
    action: HazardAction,
    next: &mut PipelineLatches,
) -> Result<StageState, EngineError> {
    let entry = match if_id {
        Latch::Empty => {
            if matches!(action, HazardAction::Flush { .. }) {
                next.id_ex.bubble();
            }
            return Ok(StageState::Idle);
        }
        Latch::Bubble => {
            next.id_ex.bubble();
            return Ok(StageState::Bubble);
        }
        Latch::Occupied(entry) => entry,
    };
    let (pc, inst) = (entry.pc, entry.inst);

    match action {
        HazardAction::Flush { .. } => {
            next.id_ex.bubble();
            cpu.stats.instructions_flushed += 1;
            debug!(pc, %inst, "flush ID");
            Ok(StageState::Flushed { pc, inst })
        }
        HazardAction::Stall => {
            next.id_ex.bubble();
            next.if_id.put(entry.clone(), "IF/ID")?;
            debug!(pc, %inst, "load-use stall");
            Ok(StageState::Stalled { pc, inst })
        }
        HazardAction::Proceed => {
            let [rs1, rs2] = inst.sources();
            let read = |reg: Option<u8>| reg.map_or(0, |r| cpu.regs.read(usize::from(r)));
            let id_entry = IdExEntry {
                pc,
                inst,
                rs1,
                rs2,
                rd: inst.dest(),
                rv1: read(rs1),
                rv2: read(rs2),
                ctrl: ControlSignals::for_instruction(&inst),
            };
            next.id_ex.put(id_entry, "ID/EX")?;
            Ok(StageState::Active { pc, inst })
        }
    }
}
