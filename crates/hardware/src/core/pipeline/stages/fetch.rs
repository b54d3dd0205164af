//! Instruction Fetch (IF) Stage.
//!
//! Fetches the instruction at the current PC into the IF/ID latch and advances
//! the PC by one. Under a stall nothing is fetched and the PC holds; under a
//! flush the instruction at the PC is discarded and the PC is redirected.

use tracing::debug;

use crate::common::error::EngineError;
use crate::core::Cpu;
use crate::core::pipeline::hazards::HazardAction;
use crate::core::pipeline::latches::{IfIdEntry, Latch};
use crate::core::pipeline::trace::StageState;

/// Executes the instruction fetch stage.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if the IF/ID latch was already filled this cycle.
pub fn fetch_stage(
    cpu: &mut Cpu,
    action: HazardAction,
    if_id: &mut Latch<IfIdEntry>,
) -> Result<StageState, EngineError> {
    let pc = cpu.pc;
    let fetched = cpu.program.get(pc);

    match action {
        HazardAction::Stall => {
            Ok(fetched.map_or(StageState::Idle, |inst| StageState::Stalled { pc, inst }))
        }
        HazardAction::Flush { target } => {
            if_id.bubble();
            cpu.pc = target;
            Ok(fetched.map_or(StageState::Bubble, |inst| {
                cpu.stats.instructions_flushed += 1;
                debug!(pc, %inst, "flush IF");
                StageState::Flushed { pc, inst }
            }))
        }
        HazardAction::Proceed => {
            let Some(inst) = fetched else {
                return Ok(StageState::Idle);
            };
            if_id.put(IfIdEntry { pc, inst }, "IF/ID")?;
            cpu.pc = pc + 1;
            debug!(pc, %inst, "fetch");
            Ok(StageState::Active { pc, inst })
        }
    }
}
