use pipesim_core::common::Word;
use pipesim_core::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use pipesim_core::core::pipeline::signals::ControlSignals;
use pipesim_core::isa::asm::assemble_line;
use pipesim_core::isa::instruction::Instruction;

/// Parses a single line of assembly.
pub fn inst(text: &str) -> Instruction {
    assemble_line(text, 1)
        .expect("valid assembly")
        .expect("non-empty line")
}

pub fn if_id(pc: usize, text: &str) -> IfIdEntry {
    IfIdEntry {
        pc,
        inst: inst(text),
    }
}

pub struct IdExBuilder(IdExEntry);

impl IdExBuilder {
    pub fn new(text: &str) -> Self {
        let inst = inst(text);
        let [rs1, rs2] = inst.sources();
        Self(IdExEntry {
            pc: 0,
            inst,
            rs1,
            rs2,
            rd: inst.dest(),
            rv1: 0,
            rv2: 0,
            ctrl: ControlSignals::for_instruction(&inst),
        })
    }

    pub fn pc(mut self, pc: usize) -> Self {
        self.0.pc = pc;
        self
    }

    /// Values read from the register file in ID.
    pub fn values(mut self, rv1: Word, rv2: Word) -> Self {
        self.0.rv1 = rv1;
        self.0.rv2 = rv2;
        self
    }

    pub fn build(self) -> IdExEntry {
        self.0
    }
}

/// EX/MEM entry for `text` carrying `alu` as its result or address.
pub fn ex_mem(text: &str, alu: Word) -> ExMemEntry {
    let inst = inst(text);
    ExMemEntry {
        pc: 0,
        inst,
        rd: inst.dest(),
        alu,
        store_data: 0,
        ctrl: ControlSignals::for_instruction(&inst),
    }
}

/// MEM/WB entry for `text`; `value` lands in `load_data` for loads and `alu` otherwise.
pub fn mem_wb(text: &str, value: Word) -> MemWbEntry {
    let inst = inst(text);
    let ctrl = ControlSignals::for_instruction(&inst);
    MemWbEntry {
        pc: 0,
        inst,
        rd: inst.dest(),
        alu: if ctrl.mem_read { 100 } else { value },
        load_data: if ctrl.mem_read { value } else { 0 },
        ctrl,
    }
}
