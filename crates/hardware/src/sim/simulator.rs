//! Simulator: owns the CPU and drives it to completion.
//!
//! The simulator builds the data memory from the configuration, applies
//! register and memory presets, steps the CPU until the pipeline drains and
//! enforces the cycle budget.

use serde::Serialize;
use tracing::{info, warn};

use super::loader::ProgramImage;
use super::program::Program;
use crate::common::constants::NUM_REGS;
use crate::common::error::{LoaderError, ProgramLoadError, SimError};
use crate::common::reg::{RegisterFile, Word};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::trace::CycleTrace;
use crate::isa::instruction::Instruction;
use crate::soc::cache::{CacheStats, CachedMemory};
use crate::soc::memory::FlatMemory;
use crate::soc::traits::DataMemory;
use crate::stats::SimStats;

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    /// Final register file.
    pub registers: RegisterFile,
    /// Accumulated statistics.
    pub stats: SimStats,
    /// Cache counters, when a cache was configured.
    pub cache: Option<CacheStats>,
    /// Per-cycle traces, when tracing was enabled.
    pub traces: Vec<CycleTrace>,
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    cpu: Cpu,
    max_cycles: u64,
    record_traces: bool,
    traces: Vec<CycleTrace>,
}

impl Simulator {
    /// Creates a simulator with the memory described by `config`.
    pub fn new(program: Program, config: &Config) -> Self {
        Self::with_flat_memory(program, config, FlatMemory::new(config.memory.size_words))
    }

    /// Creates a simulator over a pre-filled flat memory, adding the configured cache.
    pub fn with_flat_memory(program: Program, config: &Config, memory: FlatMemory) -> Self {
        let memory: Box<dyn DataMemory> = if config.cache.enabled {
            Box::new(CachedMemory::new(memory, &config.cache))
        } else {
            Box::new(memory)
        };
        Self::with_memory(program, config, memory)
    }

    /// Creates a simulator over an arbitrary data memory.
    pub fn with_memory(program: Program, config: &Config, memory: Box<dyn DataMemory>) -> Self {
        Self {
            cpu: Cpu::new(program, memory),
            max_cycles: config.general.max_cycles,
            record_traces: config.general.trace_pipeline,
            traces: Vec::new(),
        }
    }

    /// Validates `insts` and creates a simulator.
    ///
    /// # Errors
    ///
    /// Returns a [`ProgramLoadError`] listing every invalid instruction.
    pub fn from_instructions(
        insts: Vec<Instruction>,
        config: &Config,
    ) -> Result<Self, ProgramLoadError> {
        let program = Program::new(insts, config.memory.size_words)?;
        Ok(Self::new(program, config))
    }

    /// Validates an image, applies its presets and creates a simulator.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Program`] for invalid instructions and
    /// [`LoaderError::Preset`] for a register or address that does not exist.
    pub fn from_image(image: &ProgramImage, config: &Config) -> Result<Self, LoaderError> {
        let size = config.memory.size_words;
        let program = Program::new(image.program.clone(), size)?;

        let mut memory = FlatMemory::new(size);
        for (&addr, &val) in &image.memory {
            if addr >= size {
                return Err(LoaderError::Preset {
                    kind: "memory",
                    index: addr,
                    limit: size,
                });
            }
            memory.write(addr, val);
        }

        let mut sim = Self::with_flat_memory(program, config, memory);
        for (&idx, &val) in &image.registers {
            if idx >= NUM_REGS {
                return Err(LoaderError::Preset {
                    kind: "register",
                    index: idx,
                    limit: NUM_REGS,
                });
            }
            sim.set_register(idx, val);
        }
        Ok(sim)
    }

    /// Presets a register. Writes to `R0` are ignored.
    pub fn set_register(&mut self, idx: usize, val: Word) {
        self.cpu.set_register(idx, val);
    }

    /// Read-only view of the CPU state.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        self.cpu.stats()
    }

    /// Reads a register.
    pub fn register(&self, idx: usize) -> Word {
        self.cpu.regs.read(idx)
    }

    /// Reads a data memory word, or `None` outside memory.
    pub fn read_memory(&mut self, addr: usize) -> Option<Word> {
        (addr < self.cpu.memory.size()).then(|| self.cpu.memory.read(addr))
    }

    /// True once the pipeline has drained.
    pub fn is_done(&self) -> bool {
        self.cpu.is_drained()
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Engine`] if the pipeline hits a fatal invariant violation.
    pub fn tick(&mut self) -> Result<CycleTrace, SimError> {
        let trace = self.cpu.step()?;
        if self.record_traces {
            self.traces.push(trace.clone());
        }
        Ok(trace)
    }

    /// Runs until the pipeline drains.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if the cycle budget runs out first, or
    /// [`SimError::Engine`] on a fatal pipeline error.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        info!(
            instructions = self.cpu.program.len(),
            max_cycles = self.max_cycles,
            "run start"
        );
        while !self.is_done() {
            if self.cpu.stats.cycles >= self.max_cycles {
                warn!(limit = self.max_cycles, pc = self.cpu.pc, "cycle limit reached");
                return Err(SimError::CycleLimit {
                    limit: self.max_cycles,
                });
            }
            let _ = self.tick()?;
        }
        info!(
            cycles = self.cpu.stats.cycles,
            completed = self.cpu.stats.instructions_completed,
            stalls = self.cpu.stats.stalls_inserted,
            "run finished"
        );
        Ok(self.report())
    }

    /// Snapshot of the current registers, statistics and traces.
    pub fn report(&self) -> RunReport {
        RunReport {
            registers: self.cpu.regs.clone(),
            stats: self.cpu.stats.clone(),
            cache: self.cpu.memory.cache_stats(),
            traces: self.traces.clone(),
        }
    }
}
