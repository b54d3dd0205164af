//! Core processor implementation.
//!
//! This module contains the CPU that owns the architectural state, the
//! five-stage pipeline that moves instructions through it, and the execution
//! units used by the EX stage.

/// CPU state and the per-cycle step.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals, traces).
pub mod pipeline;

/// Execution units (ALU, branch resolution).
pub mod units;

pub use self::cpu::Cpu;
