//! Fatal Engine Error Tests.
//!
//! Runtime conditions that abandon a run: an address computed outside data
//! memory and a program that never drains within its cycle budget.

use pipesim_core::common::{EngineError, SimError};

use crate::common::harness::TestContext;

#[test]
fn jump_to_self_hits_cycle_limit() {
    let mut sim = TestContext::asm("JUMP 0").max_cycles(50).build();
    let err = sim.run().unwrap_err();

    assert!(matches!(err, SimError::CycleLimit { limit: 50 }), "{err}");
    assert_eq!(sim.stats().cycles, 50);
    assert_eq!(
        err.to_string(),
        "cycle limit of 50 reached before the pipeline drained"
    );
}

#[test]
fn limit_equal_to_needed_cycles_succeeds() {
    let mut sim = TestContext::asm("ADD R1, R2, R3").max_cycles(5).build();
    assert!(sim.run().is_ok());
}

#[test]
fn load_past_end_of_memory_faults() {
    let mut sim = TestContext::asm("LOAD R1, [R2+0]").reg(2, 5000).build();
    let err = sim.run().unwrap_err();

    assert!(
        matches!(
            err,
            SimError::Engine(EngineError::MemoryFault {
                pc: 0,
                addr: 5000,
                size: 1024
            })
        ),
        "{err}"
    );
}

#[test]
fn negative_address_faults() {
    let mut sim = TestContext::asm(
        "
        NOP
        LOAD R1, [R2-1]
        ",
    )
    .build();
    let err = sim.run().unwrap_err();

    assert!(
        matches!(
            err,
            SimError::Engine(EngineError::MemoryFault { pc: 1, addr: -1, .. })
        ),
        "{err}"
    );
}

#[test]
fn fault_leaves_older_instructions_committed() {
    let mut sim = TestContext::asm(
        "
        ADD  R5, R6, R6
        LOAD R1, [R2+0]
        ",
    )
    .reg(6, 3)
    .reg(2, -8)
    .build();
    assert!(sim.run().is_err());
    // WB runs before MEM, so the ADD retires in the faulting cycle.
    assert_eq!(sim.register(5), 6);
    assert_eq!(sim.register(1), 0);
    assert_eq!(sim.stats().instructions_completed, 1);
}
