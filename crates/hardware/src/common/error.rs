//! Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **ISA Errors:** Encoding and decoding failures (`InvalidOperand`, `UnknownOpcode`).
//! 2. **Load Errors:** Whole-program validation failures that list every offending index.
//! 3. **Engine Errors:** Fatal invariant violations detected while stepping the pipeline.
//! 4. **Reporting Errors:** Derived metrics that cannot be computed (CPI with no retirements).
//!
//! Load-time errors are user-facing and recoverable. Engine errors indicate a defect
//! in the simulator itself and abort the run.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while encoding or decoding a single instruction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IsaError {
    /// A register index or immediate does not fit in its bit field.
    #[error("invalid operand: {field} = {value} does not fit in its {bits}-bit field")]
    InvalidOperand {
        /// Name of the offending operand field (e.g. `"rd"`, `"offset"`).
        field: &'static str,
        /// The value that was supplied.
        value: i64,
        /// Width of the field in bits.
        bits: u32,
    },

    /// The opcode bits of a word match no defined operation.
    #[error("unknown opcode {opcode:#04x} in word {word:#010x}")]
    UnknownOpcode {
        /// The 6-bit opcode value.
        opcode: u32,
        /// The full instruction word.
        word: u32,
    },
}

/// Errors raised by the text assembler. Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmError {
    /// The mnemonic is not part of the instruction set.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// Source line.
        line: usize,
        /// The mnemonic as written.
        mnemonic: String,
    },

    /// A register operand is malformed (expected `R<n>`).
    #[error("line {line}: invalid register `{token}`")]
    InvalidRegister {
        /// Source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// An immediate, address or target operand is malformed.
    #[error("line {line}: invalid immediate `{token}`")]
    InvalidImmediate {
        /// Source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// Wrong number of operands for the mnemonic.
    #[error("line {line}: expected {expected} operand(s), found {found}")]
    OperandCount {
        /// Source line.
        line: usize,
        /// Operands required by the mnemonic.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },
}

/// Reason a single program instruction failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// An operand does not fit its encoding field, or the word did not decode.
    #[error(transparent)]
    Isa(#[from] IsaError),

    /// A branch or jump target lies outside `0..=len`.
    #[error("control-flow target {target} outside 0..={len}")]
    TargetOutOfRange {
        /// Resolved target index.
        target: i64,
        /// Program length.
        len: usize,
    },

    /// A static memory address lies outside the data memory.
    #[error("memory address {addr} outside 0..{size}")]
    AddressOutOfRange {
        /// The address operand.
        addr: i64,
        /// Data memory size in words.
        size: usize,
    },
}

/// One offending instruction in a rejected program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidInstruction {
    /// Index of the instruction in the program.
    pub index: usize,
    /// Why it was rejected.
    pub issue: ValidationIssue,
}

/// A program failed whole-program validation; no cycle was executed.
///
/// Every offending instruction is reported, not just the first.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("program rejected with {} invalid instruction(s):{}", .issues.len(), render_issues(.issues))]
pub struct ProgramLoadError {
    /// All validation failures, in program order.
    pub issues: Vec<InvalidInstruction>,
}

impl ProgramLoadError {
    /// Indices of every rejected instruction.
    pub fn indices(&self) -> Vec<usize> {
        self.issues.iter().map(|i| i.index).collect()
    }
}

fn render_issues(issues: &[InvalidInstruction]) -> String {
    let mut out = String::new();
    for issue in issues {
        let _ = write!(out, "\n  [{}] {}", issue.index, issue.issue);
    }
    out
}

/// Fatal conditions detected while stepping the pipeline.
///
/// A validated program never triggers these; each one is a simulator defect.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Two instructions tried to occupy the same stage in one cycle.
    #[error("engine overflow: {stage} stage already occupied this cycle")]
    Overflow {
        /// Name of the over-committed stage.
        stage: &'static str,
    },

    /// EX needed a value that no latch holds yet (a missed load-use stall).
    #[error("unresolved hazard at pc {pc}: R{reg} is still being loaded")]
    UnresolvedHazard {
        /// Index of the consuming instruction.
        pc: usize,
        /// Register whose value was unavailable.
        reg: u8,
    },

    /// A computed effective address fell outside data memory.
    #[error("memory fault at pc {pc}: address {addr} outside 0..{size}")]
    MemoryFault {
        /// Index of the faulting instruction.
        pc: usize,
        /// Effective address.
        addr: i64,
        /// Data memory size in words.
        size: usize,
    },
}

/// Derived statistics that cannot be computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StatsError {
    /// CPI and IPC are undefined until at least one instruction completes.
    #[error("no instructions completed; CPI is undefined")]
    NoInstructions,
}

/// Errors raised while reading program images or configuration files.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be read.
    #[error("could not read `{path}`: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected schema.
    #[error("malformed JSON in `{path}`: {source}")]
    Json {
        /// File path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Assembly source failed to parse.
    #[error(transparent)]
    Asm(#[from] AsmError),

    /// A hex image line is not a 32-bit word.
    #[error("line {line}: `{token}` is not a 32-bit hex word")]
    Hex {
        /// Source line (1-based).
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A register or memory preset names a location that does not exist.
    #[error("preset {kind}[{index}] out of range (limit {limit})")]
    Preset {
        /// `"register"` or `"memory"`.
        kind: &'static str,
        /// Requested index.
        index: usize,
        /// Number of locations available.
        limit: usize,
    },

    /// The decoded or parsed program failed validation.
    #[error(transparent)]
    Program(#[from] ProgramLoadError),
}

/// Top-level error returned by [`crate::sim::Simulator`].
#[derive(Debug, Error)]
pub enum SimError {
    /// The program was rejected before the first cycle.
    #[error(transparent)]
    Load(#[from] ProgramLoadError),

    /// The engine hit a fatal invariant violation.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The pipeline did not drain within the configured cycle budget.
    #[error("cycle limit of {limit} reached before the pipeline drained")]
    CycleLimit {
        /// The configured limit.
        limit: u64,
    },
}
