//! Validated programs.
//!
//! A [`Program`] can only be built through whole-program validation, so the
//! pipeline never sees an operand that does not fit its encoding, a branch
//! that leaves the program, or a static address outside data memory. Every
//! offending instruction is reported, not just the first.

use serde::Serialize;

use crate::common::error::{InvalidInstruction, IsaError, ProgramLoadError, ValidationIssue};
use crate::isa::encoding::{decode, encode};
use crate::isa::instruction::Instruction;

/// An immutable, validated instruction sequence. Indices double as addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Program {
    insts: Vec<Instruction>,
}

impl Program {
    /// Validates `insts` against a data memory of `memory_words` words.
    ///
    /// # Errors
    ///
    /// Returns a [`ProgramLoadError`] listing every invalid instruction.
    pub fn new(insts: Vec<Instruction>, memory_words: usize) -> Result<Self, ProgramLoadError> {
        let issues: Vec<InvalidInstruction> = insts
            .iter()
            .enumerate()
            .flat_map(|(index, inst)| {
                validate(inst, index, insts.len(), memory_words)
                    .into_iter()
                    .map(move |issue| InvalidInstruction { index, issue })
            })
            .collect();
        if issues.is_empty() {
            Ok(Self { insts })
        } else {
            Err(ProgramLoadError { issues })
        }
    }

    /// Decodes and validates a binary image.
    ///
    /// # Errors
    ///
    /// Returns a [`ProgramLoadError`] listing every word that fails to decode
    /// or whose instruction fails validation.
    pub fn from_words(words: &[u32], memory_words: usize) -> Result<Self, ProgramLoadError> {
        Self::new(decode_words(words)?, memory_words)
    }

    /// The instruction at `pc`, if within the program.
    pub fn get(&self, pc: usize) -> Option<Instruction> {
        self.insts.get(pc).copied()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.insts.len()
    }

    /// True for an empty program.
    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    /// All instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.insts
    }

    /// Encodes the program into a binary image.
    ///
    /// # Errors
    ///
    /// Cannot fail for a validated program; the error is propagated from
    /// [`encode`] for completeness.
    pub fn to_words(&self) -> Result<Vec<u32>, IsaError> {
        self.insts.iter().map(encode).collect()
    }
}

/// Decodes a binary image without validating control flow or addresses.
///
/// # Errors
///
/// Returns a [`ProgramLoadError`] listing every word with an unknown opcode.
pub fn decode_words(words: &[u32]) -> Result<Vec<Instruction>, ProgramLoadError> {
    let mut insts = Vec::with_capacity(words.len());
    let mut issues = Vec::new();
    for (index, &word) in words.iter().enumerate() {
        match decode(word) {
            Ok(inst) => insts.push(inst),
            Err(err) => issues.push(InvalidInstruction {
                index,
                issue: err.into(),
            }),
        }
    }
    if issues.is_empty() {
        Ok(insts)
    } else {
        Err(ProgramLoadError { issues })
    }
}

fn validate(
    inst: &Instruction,
    index: usize,
    len: usize,
    memory_words: usize,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if let Err(err) = encode(inst) {
        issues.push(err.into());
    }
    // The one-past-the-end target is allowed: it falls through to the drain.
    if let Some(target) = inst
        .branch_target(index)
        .filter(|t| !(0..=len as i64).contains(t))
    {
        issues.push(ValidationIssue::TargetOutOfRange { target, len });
    }
    if let Some(addr) = inst
        .static_address()
        .filter(|a| !(0..memory_words as i64).contains(a))
    {
        issues.push(ValidationIssue::AddressOutOfRange {
            addr,
            size: memory_words,
        });
    }
    issues
}
