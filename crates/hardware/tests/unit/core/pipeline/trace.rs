//! Cycle Trace Tests.

use pipesim_core::core::pipeline::hazards::HazardAction;
use pipesim_core::core::pipeline::trace::{CycleTrace, StageState, stage};
use pipesim_core::isa::instruction::Instruction;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn fill_and_drain_shape() {
    let (_, report) = TestContext::asm("ADD R1, R2, R3").run();

    assert_eq!(report.traces.len(), 5);
    for (cycle, trace) in report.traces.iter().enumerate() {
        assert_eq!(trace.cycle, cycle as u64 + 1);
        // The lone instruction sits in stage `cycle` and nowhere else.
        for idx in 0..5 {
            assert_eq!(trace.stage(idx).pc().is_some(), idx == cycle, "cycle {cycle}");
        }
    }
}

#[test]
fn display_marks_actions() {
    let add = Instruction::Add { rd: 1, rs1: 2, rs2: 3 };
    let trace = CycleTrace {
        cycle: 3,
        stages: [
            StageState::Flushed { pc: 2, inst: Instruction::Nop },
            StageState::Stalled { pc: 1, inst: add },
            StageState::Bubble,
            StageState::Active { pc: 0, inst: add },
            StageState::Idle,
        ],
        pc: 2,
        action: HazardAction::Flush { target: 7 },
    };
    let text = trace.to_string();
    assert!(text.starts_with("Cycle    3 PC=2   "));
    assert!(text.contains("IF: 2:NOP [flush]"));
    assert!(text.contains("ID: 1:ADD R1, R2, R3 [stall]"));
    assert!(text.contains("EX: (bubble)"));
    assert!(text.contains("WB: -"));
    assert!(text.ends_with("FLUSH -> 7"));
}

#[test]
fn serializes_with_state_tags() {
    let (_, report) = TestContext::asm("NOP").run();
    let json = serde_json::to_value(&report.traces[0]).unwrap();

    assert_eq!(json["cycle"], 1);
    assert_eq!(json["action"], "Proceed");
    assert_eq!(json["stages"][stage::IF]["state"], "active");
    assert_eq!(json["stages"][stage::IF]["inst"]["op"], "NOP");
    assert_eq!(json["stages"][stage::WB]["state"], "idle");
}
