//! Simulation driver and program loading.
//!
//! Provides the validated [`Program`] type, readers for program images on disk,
//! and the [`Simulator`] that runs a program to completion.

/// Program image readers (JSON, assembly, hex).
pub mod loader;

/// Validated instruction sequences.
pub mod program;

/// Top-level run loop.
pub mod simulator;

pub use loader::{ImageFormat, ProgramImage};
pub use program::Program;
pub use simulator::{RunReport, Simulator};
