//! Instruction pipeline.
//!
//! A classic five-stage in-order pipeline (IF, ID, EX, MEM, WB) with full
//! forwarding, a one-cycle load-use stall and branch resolution in EX.

/// Data and control hazard resolution.
pub mod hazards;

/// Inter-stage latch structures.
pub mod latches;

/// Control signals generated in ID.
pub mod signals;

/// The five stage implementations.
pub mod stages;

/// Per-cycle occupancy traces.
pub mod trace;

pub use hazards::{ForwardSource, HazardAction, PipelineView};
pub use latches::{Latch, PipelineLatches};
pub use trace::{CycleTrace, StageState};
