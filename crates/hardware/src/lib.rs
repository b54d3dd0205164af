//! Five-stage pipelined processor simulator library.
//!
//! This crate implements a cycle-accurate scalar pipeline (IF, ID, EX, MEM, WB) with the following:
//! 1. **ISA:** Eight instructions, a bit-exact 32-bit encoding, an assembler and a disassembler.
//! 2. **Core:** Pipeline latches, full forwarding, load-use stalls and branch flushes.
//! 3. **Memory:** Flat word-addressed data memory with an optional write-through cache.
//! 4. **Simulation:** Program validation, image loading, configuration and statistics.
//!
//! # Example
//!
//! ```
//! use pipesim_core::{Config, Simulator};
//! use pipesim_core::isa::asm::assemble;
//!
//! let program = assemble("ADD R1, R2, R3\nSUB R4, R5, R6").unwrap();
//! let mut sim = Simulator::from_instructions(program, &Config::default()).unwrap();
//! sim.set_register(2, 10);
//! sim.set_register(3, 20);
//! sim.set_register(5, 30);
//! sim.set_register(6, 15);
//! let report = sim.run().unwrap();
//! assert_eq!(report.registers.read(1), 30);
//! assert_eq!(report.registers.read(4), 15);
//! ```

/// Common types and constants (registers, errors).
pub mod common;
/// Simulator configuration (defaults, sectioned config structures).
pub mod config;
/// CPU core (pipeline, execution units, per-cycle step).
pub mod core;
/// Instruction set (model, encoding, assembler, disassembler).
pub mod isa;
/// Program validation, image loading and the run loop.
pub mod sim;
/// Data memory and cache collaborators.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, latches, memory and stats.
pub use crate::core::Cpu;
/// Instruction model shared by every component.
pub use crate::isa::Instruction;
/// Validated program and top-level simulator.
pub use crate::sim::{Program, RunReport, Simulator};
/// Statistics record.
pub use crate::stats::SimStats;
