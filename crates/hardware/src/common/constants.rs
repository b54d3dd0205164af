//! Architectural constants shared across the simulator.
//!
//! This module collects the fixed parameters of the modelled datapath:
//! 1. **Register file:** Number of architectural registers and the zero register.
//! 2. **Memory:** Default size of the flat data memory.
//! 3. **Pipeline:** Stage count and the canonical stage ordering.

/// Number of architectural integer registers (`R0`..`R31`).
pub const NUM_REGS: usize = 32;

/// Index of the hardwired zero register.
///
/// Reads always return 0 and writes are discarded.
pub const REG_ZERO: usize = 0;

/// Default size of the flat data memory, in words.
pub const DEFAULT_MEMORY_WORDS: usize = 1024;

/// Number of pipeline stages (IF, ID, EX, MEM, WB).
pub const PIPELINE_DEPTH: usize = 5;

/// Default upper bound on simulated cycles before a run is aborted.
///
/// Guards against programs that never drain (e.g. a `JUMP` to itself).
pub const DEFAULT_MAX_CYCLES: u64 = 100_000;

/// Stage names in pipeline order, used for traces and diagrams.
pub const STAGE_NAMES: [&str; PIPELINE_DEPTH] = ["IF", "ID", "EX", "MEM", "WB"];
