//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the instruction model, its 32-bit binary encoding, and the text
//! forms used by the assembler and disassembler.
//!
//! # Formats
//!
//! * `R`: register-register arithmetic (`ADD`, `SUB`, `MUL`).
//! * `I`: base plus signed offset loads (`LOAD`).
//! * `S`: absolute-address stores (`STORE`).
//! * `B`: PC-relative conditional branches (`BEQ`).
//! * `J`: absolute jumps (`JUMP`).

/// Text assembler producing instruction sequences from source lines.
pub mod asm;

/// Instruction disassembler for traces and diagnostics.
pub mod disasm;

/// Binary encoding and decoding of instruction words.
pub mod encoding;

/// The instruction model and operand accessors.
pub mod instruction;

/// Opcode values occupying bits 31-26 of an instruction word.
pub mod opcodes;

pub use encoding::{decode, encode};
pub use instruction::{Instruction, Reg};
pub use opcodes::Opcode;
