//! The five pipeline stages.
//!
//! One function per stage, each taking the CPU and the latches it reads and
//! writes:
//! 1. **IF:** Moves the instruction at the PC into IF/ID, or holds on a stall.
//! 2. **ID:** Builds control signals and reads registers; applies stalls and flushes.
//! 3. **EX:** Forwards operands, runs the ALU and resolves branches.
//! 4. **MEM:** Performs the data memory access for loads and stores.
//! 5. **WB:** Commits to the register file and counts the instruction as completed.
//!
//! Each stage reads the previous cycle's latch snapshot and writes the next
//! cycle's latch. WB runs first so that ID reads the values it commits.

/// ID stage.
pub mod decode;

/// EX stage.
pub mod execute;

/// IF stage.
pub mod fetch;

/// MEM stage.
pub mod memory;

/// WB stage.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
