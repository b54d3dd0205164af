//! Assembler Tests.

use pipesim_core::common::AsmError;
use pipesim_core::isa::asm::assemble;
use pipesim_core::isa::instruction::Instruction;
use pretty_assertions::assert_eq;

#[test]
fn assembles_every_form() {
    let src = "
        # arithmetic
        ADD R1, R2, R3
        sub r4, r5, r6      ; lower case
        MUL R7, R8, R9
        LOAD R8, 100
        LOAD R8, [100]
        LOAD R1, [R2+4]
        LOAD R1, [R2 - 4]
        LOAD R1, [R3]
        STORE R1, 64
        STORE R1, [0x40]
        BEQ R1, R4, +2
        BEQ R1, R4, -3
        JUMP 0
        NOP
    ";
    let program = assemble(src).unwrap();
    assert_eq!(
        program,
        vec![
            Instruction::Add { rd: 1, rs1: 2, rs2: 3 },
            Instruction::Sub { rd: 4, rs1: 5, rs2: 6 },
            Instruction::Mul { rd: 7, rs1: 8, rs2: 9 },
            Instruction::Load { rd: 8, base: 0, offset: 100 },
            Instruction::Load { rd: 8, base: 0, offset: 100 },
            Instruction::Load { rd: 1, base: 2, offset: 4 },
            Instruction::Load { rd: 1, base: 2, offset: -4 },
            Instruction::Load { rd: 1, base: 3, offset: 0 },
            Instruction::Store { rs: 1, addr: 64 },
            Instruction::Store { rs: 1, addr: 64 },
            Instruction::Beq { rs1: 1, rs2: 4, offset: 2 },
            Instruction::Beq { rs1: 1, rs2: 4, offset: -3 },
            Instruction::Jump { target: 0 },
            Instruction::Nop,
        ]
    );
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(assemble("\n  # only a comment\n; another\n\n").unwrap(), vec![]);
}

#[test]
fn unknown_mnemonic_reports_line() {
    assert_eq!(
        assemble("NOP\nFOO R1, R2").unwrap_err(),
        AsmError::UnknownMnemonic {
            line: 2,
            mnemonic: "FOO".to_string()
        }
    );
}

#[test]
fn wrong_operand_count() {
    assert_eq!(
        assemble("ADD R1, R2").unwrap_err(),
        AsmError::OperandCount {
            line: 1,
            expected: 3,
            found: 2
        }
    );
    assert_eq!(
        assemble("NOP R1").unwrap_err(),
        AsmError::OperandCount {
            line: 1,
            expected: 0,
            found: 1
        }
    );
}

#[test]
fn bad_register_tokens() {
    for (src, token) in [
        ("ADD R1, R2, X3", "X3"),
        ("ADD R32, R1, R1", "R32"),
        ("ADD R1, R, R1", "R"),
    ] {
        assert_eq!(
            assemble(src).unwrap_err(),
            AsmError::InvalidRegister {
                line: 1,
                token: token.to_string()
            },
            "{src}"
        );
    }
}

#[test]
fn bad_immediates() {
    assert!(matches!(
        assemble("LOAD R1, [abc]").unwrap_err(),
        AsmError::InvalidImmediate { line: 1, .. }
    ));
    assert!(matches!(
        assemble("JUMP -1").unwrap_err(),
        AsmError::InvalidImmediate { line: 1, .. }
    ));
    assert!(matches!(
        assemble("STORE R1, [R2+4]").unwrap_err(),
        AsmError::InvalidImmediate { line: 1, .. }
    ));
    assert!(matches!(
        assemble("LOAD R1, [100").unwrap_err(),
        AsmError::InvalidImmediate { line: 1, .. }
    ));
}

#[test]
fn errors_render_with_line_numbers() {
    let err = assemble("NOP\nNOP\nBAD").unwrap_err();
    assert_eq!(err.to_string(), "line 3: unknown mnemonic `BAD`");
}
