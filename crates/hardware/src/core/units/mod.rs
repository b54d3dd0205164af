//! Execution units used by the EX stage.

/// Arithmetic logic unit.
pub mod alu;

/// Branch resolution unit.
pub mod bru;

pub use alu::Alu;
pub use bru::Bru;
