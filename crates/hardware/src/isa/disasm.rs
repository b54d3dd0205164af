//! Instruction disassembler.
//!
//! Renders instructions in the same syntax the assembler accepts, for pipeline
//! traces, logging and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x0043_0800), "ADD R1, R2, R3");
//! ```

use std::fmt;

use super::encoding::decode;
use super::instruction::Instruction;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match *self {
            Self::Add { rd, rs1, rs2 } | Self::Sub { rd, rs1, rs2 } | Self::Mul { rd, rs1, rs2 } => {
                write!(f, "{mnemonic} R{rd}, R{rs1}, R{rs2}")
            }
            Self::Load {
                rd,
                base: 0,
                offset,
            } => write!(f, "{mnemonic} R{rd}, [{offset}]"),
            Self::Load { rd, base, offset } => {
                write!(f, "{mnemonic} R{rd}, [R{base}{offset:+}]")
            }
            Self::Store { rs, addr } => write!(f, "{mnemonic} R{rs}, [{addr}]"),
            Self::Beq { rs1, rs2, offset } => write!(f, "{mnemonic} R{rs1}, R{rs2}, {offset:+}"),
            Self::Jump { target } => write!(f, "{mnemonic} {target}"),
            Self::Nop => f.write_str(mnemonic),
        }
    }
}

/// Disassembles a 32-bit instruction word.
///
/// Returns the mnemonic text, or `"unknown (0x........)"` for words whose
/// opcode is undefined.
pub fn disassemble(word: u32) -> String {
    decode(word).map_or_else(|_| format!("unknown ({word:#010x})"), |inst| inst.to_string())
}

/// Disassembles a word image, one line per instruction prefixed by its index.
pub fn disassemble_listing(words: &[u32]) -> String {
    words
        .iter()
        .enumerate()
        .map(|(pc, &word)| format!("{pc:4}: {word:08x}  {}\n", disassemble(word)))
        .collect()
}
