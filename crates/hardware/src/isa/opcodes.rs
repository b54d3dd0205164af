//! Opcodes.
//!
//! Defines the major opcodes (bits 31-26) of the instruction word.

/// Register-register addition.
pub const OP_ADD: u32 = 0x00;

/// Register-register subtraction.
pub const OP_SUB: u32 = 0x01;

/// Register-register multiplication (low 64 bits).
pub const OP_MUL: u32 = 0x02;

/// Load a word from data memory.
pub const OP_LOAD: u32 = 0x03;

/// Store a word to data memory.
pub const OP_STORE: u32 = 0x04;

/// Branch if equal, PC-relative.
pub const OP_BEQ: u32 = 0x05;

/// Unconditional jump to an absolute index.
pub const OP_JUMP: u32 = 0x06;

/// No operation.
pub const OP_NOP: u32 = 0x07;

/// Operation kind of an instruction, independent of its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `ADD rd, rs1, rs2`
    Add,
    /// `SUB rd, rs1, rs2`
    Sub,
    /// `MUL rd, rs1, rs2`
    Mul,
    /// `LOAD rd, [base+offset]`
    Load,
    /// `STORE rs, [addr]`
    Store,
    /// `BEQ rs1, rs2, offset`
    Beq,
    /// `JUMP target`
    Jump,
    /// `NOP`
    Nop,
}

impl Opcode {
    /// Every opcode in encoding order.
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Load,
        Self::Store,
        Self::Beq,
        Self::Jump,
        Self::Nop,
    ];

    /// Returns the 6-bit opcode field value.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Add => OP_ADD,
            Self::Sub => OP_SUB,
            Self::Mul => OP_MUL,
            Self::Load => OP_LOAD,
            Self::Store => OP_STORE,
            Self::Beq => OP_BEQ,
            Self::Jump => OP_JUMP,
            Self::Nop => OP_NOP,
        }
    }

    /// Maps an opcode field value back to its operation, if defined.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            OP_ADD => Some(Self::Add),
            OP_SUB => Some(Self::Sub),
            OP_MUL => Some(Self::Mul),
            OP_LOAD => Some(Self::Load),
            OP_STORE => Some(Self::Store),
            OP_BEQ => Some(Self::Beq),
            OP_JUMP => Some(Self::Jump),
            OP_NOP => Some(Self::Nop),
            _ => None,
        }
    }

    /// Upper-case assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Beq => "BEQ",
            Self::Jump => "JUMP",
            Self::Nop => "NOP",
        }
    }

    /// Parses a mnemonic, ignoring case.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }
}
