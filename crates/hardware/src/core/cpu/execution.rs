//! Main Execution Loop.
//!
//! This module implements one clock cycle of the CPU. It performs the following:
//! 1. **Double Buffering:** Snapshots the latches so every stage reads last cycle's state.
//! 2. **Stage Ordering:** Runs WB, MEM, EX, ID, IF so WB commits before ID reads registers.
//! 3. **Hazard Resolution:** Consults the hazard unit between EX and ID.
//! 4. **Observability:** Returns a [`CycleTrace`] describing every stage.

use tracing::debug;

use super::Cpu;
use crate::common::error::EngineError;
use crate::core::pipeline::hazards::{self, HazardAction, PipelineView};
use crate::core::pipeline::latches::PipelineLatches;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::pipeline::trace::CycleTrace;

impl Cpu {
    /// Advances the whole pipeline by one clock cycle.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if a core invariant is violated. The CPU
    /// state is unspecified afterwards and the run must be abandoned.
    pub fn step(&mut self) -> Result<CycleTrace, EngineError> {
        let prev = std::mem::take(&mut self.latches);
        let mut next = PipelineLatches::default();
        let pc = self.pc;
        self.stats.cycles += 1;

        let wb = wb_stage(self, &prev.mem_wb);
        let mem = mem_stage(self, &prev.ex_mem, &mut next.mem_wb)?;
        let (ex, redirect) = execute_stage(self, &prev, &mut next.ex_mem)?;

        let action = hazards::decide(&PipelineView::of(&prev), redirect);
        if action == HazardAction::Stall {
            self.stats.stalls_inserted += 1;
        }

        let id = decode_stage(self, &prev.if_id, action, &mut next)?;
        let fetch = fetch_stage(self, action, &mut next.if_id)?;

        self.latches = next;

        let trace = CycleTrace {
            cycle: self.stats.cycles,
            stages: [fetch, id, ex, mem, wb],
            pc,
            action,
        };
        debug!("{trace}");
        Ok(trace)
    }

    /// True once every instruction has been fetched and retired.
    pub fn is_drained(&self) -> bool {
        self.pc >= self.program.len() && self.latches.is_drained()
    }
}
