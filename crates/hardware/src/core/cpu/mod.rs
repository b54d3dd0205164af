//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Owns the register file and the program counter.
//! 2. **Pipeline Control:** Holds the four inter-stage latches between cycles.
//! 3. **Memory:** Drives the data memory collaborator from the MEM stage.
//! 4. **Accounting:** Accumulates the statistics reported after a run.

/// Per-cycle pipeline orchestration.
pub mod execution;

use std::fmt;

use crate::common::reg::{RegisterFile, Word};
use crate::core::pipeline::latches::PipelineLatches;
use crate::sim::program::Program;
use crate::soc::traits::DataMemory;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
///
/// The register file and program counter are mutated only by the pipeline
/// stages driven from [`Cpu::step`]; outside the crate the state is read-only
/// apart from presets written before the first cycle.
pub struct Cpu {
    /// General purpose registers.
    pub(crate) regs: RegisterFile,
    /// Index of the next instruction to fetch.
    pub(crate) pc: usize,
    /// The validated program being executed.
    pub(crate) program: Program,
    /// Data memory accessed by the MEM stage.
    pub(crate) memory: Box<dyn DataMemory>,
    /// Latch contents at the end of the last cycle.
    pub(crate) latches: PipelineLatches,
    /// Accumulated statistics.
    pub(crate) stats: SimStats,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &self.pc)
            .field("regs", &self.regs)
            .field("latches", &self.latches)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a CPU at PC 0 with zeroed registers and empty latches.
    pub fn new(program: Program, memory: Box<dyn DataMemory>) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            program,
            memory,
            latches: PipelineLatches::default(),
            stats: SimStats::default(),
        }
    }

    /// Presets a register before the first cycle.
    pub fn set_register(&mut self, idx: usize, val: Word) {
        self.regs.write(idx, val);
    }

    /// Returns the current register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Returns the accumulated statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Index of the next instruction to fetch.
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// The program being executed.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Latch contents at the end of the last cycle.
    pub const fn latches(&self) -> &PipelineLatches {
        &self.latches
    }
}
