//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and CPI:** Total cycles, completed instructions, and derived metrics (CPI, IPC).
//! 2. **Hazards:** Stall cycles, taken branches, flushed instructions and forwarding counts.
//! 3. **Instruction mix:** Counts by category (ALU, load, store, branch, no-op).
//!
//! Counters are updated only by pipeline events, so two runs of the same program
//! produce identical statistics.

use std::fmt::Write as _;

use serde::Serialize;

use crate::common::error::StatsError;
use crate::isa::instruction::Instruction;

/// Names accepted by [`SimStats::print_sections`].
pub const STATS_SECTIONS: [&str; 3] = ["summary", "hazards", "instruction_mix"];

const RULE_HEAVY: &str = "==========================================================";
const RULE_LIGHT: &str = "----------------------------------------------------------";

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total clock cycles (one per `step()`).
    pub cycles: u64,
    /// Instructions retired by WB, excluding bubbles.
    pub instructions_completed: u64,

    /// Cycles in which a load-use stall held ID and IF.
    pub stalls_inserted: u64,
    /// Taken `BEQ`/`JUMP` instructions.
    pub branches_taken: u64,
    /// Real instructions discarded from IF or ID by a taken branch.
    pub instructions_flushed: u64,
    /// Operands supplied from the EX/MEM latch.
    pub forwards_ex_mem: u64,
    /// Operands supplied from the MEM/WB latch.
    pub forwards_mem_wb: u64,

    /// Count of arithmetic instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of explicit `NOP` instructions retired.
    pub inst_nop: u64,
}

impl SimStats {
    /// Records one instruction retiring in WB.
    pub const fn record_retire(&mut self, inst: &Instruction) {
        self.instructions_completed += 1;
        match inst {
            Instruction::Add { .. } | Instruction::Sub { .. } | Instruction::Mul { .. } => {
                self.inst_alu += 1;
            }
            Instruction::Load { .. } => self.inst_load += 1,
            Instruction::Store { .. } => self.inst_store += 1,
            Instruction::Beq { .. } | Instruction::Jump { .. } => self.inst_branch += 1,
            Instruction::Nop => self.inst_nop += 1,
        }
    }

    /// Cycles per completed instruction.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoInstructions`] if no instruction has completed.
    pub fn cpi(&self) -> Result<f64, StatsError> {
        if self.instructions_completed == 0 {
            return Err(StatsError::NoInstructions);
        }
        Ok(self.cycles as f64 / self.instructions_completed as f64)
    }

    /// Completed instructions per cycle.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoInstructions`] if no instruction has completed.
    pub fn ipc(&self) -> Result<f64, StatsError> {
        if self.instructions_completed == 0 {
            return Err(StatsError::NoInstructions);
        }
        Ok(self.instructions_completed as f64 / self.cycles as f64)
    }

    /// Renders the requested sections; an empty slice selects all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let mut out = String::new();

        if want("summary") {
            let _ = writeln!(out, "\n{RULE_HEAVY}");
            let _ = writeln!(out, "PIPELINE SIMULATION STATISTICS");
            let _ = writeln!(out, "{RULE_HEAVY}");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_completed);
            match (self.cpi(), self.ipc()) {
                (Ok(cpi), Ok(ipc)) => {
                    let _ = writeln!(out, "sim_cpi                  {cpi:.4}");
                    let _ = writeln!(out, "sim_ipc                  {ipc:.4}");
                }
                _ => {
                    let _ = writeln!(out, "sim_cpi                  n/a");
                    let _ = writeln!(out, "sim_ipc                  n/a");
                }
            }
            let _ = writeln!(out, "{RULE_LIGHT}");
        }
        if want("hazards") {
            let _ = writeln!(out, "HAZARDS");
            let _ = writeln!(
                out,
                "  stalls.load_use        {} ({:.2}%)",
                self.stalls_inserted,
                self.stalls_inserted as f64 / cyc * 100.0
            );
            let _ = writeln!(out, "  branches.taken         {}", self.branches_taken);
            let _ = writeln!(out, "  flushed                {}", self.instructions_flushed);
            let _ = writeln!(out, "  forward.ex_mem         {}", self.forwards_ex_mem);
            let _ = writeln!(out, "  forward.mem_wb         {}", self.forwards_mem_wb);
            let _ = writeln!(out, "{RULE_LIGHT}");
        }
        if want("instruction_mix") {
            let total = self.instructions_completed.max(1) as f64;
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("alu", self.inst_alu),
                ("load", self.inst_load),
                ("store", self.inst_store),
                ("branch", self.inst_branch),
                ("nop", self.inst_nop),
            ] {
                let _ = writeln!(
                    out,
                    "  {name:<22} {count} ({:.2}%)",
                    count as f64 / total * 100.0
                );
            }
            let _ = writeln!(out, "{RULE_LIGHT}");
        }
        out
    }

    /// Prints the requested sections to stdout; an empty slice prints all of them.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }
}
