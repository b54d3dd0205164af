//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Register count, memory size and pipeline depth.
//! 2. **Error Handling:** Error enums for the ISA, loader, engine and statistics.
//! 3. **Register Management:** The architectural register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for every fallible operation.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{DEFAULT_MEMORY_WORDS, NUM_REGS, PIPELINE_DEPTH, REG_ZERO};
pub use error::{
    AsmError, EngineError, InvalidInstruction, IsaError, LoaderError, ProgramLoadError, SimError,
    StatsError, ValidationIssue,
};
pub use reg::{RegisterFile, Word};
