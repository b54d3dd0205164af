use pipesim_core::common::Word;
use pipesim_core::config::Config;
use pipesim_core::isa::asm::assemble;
use pipesim_core::isa::instruction::Instruction;
use pipesim_core::sim::{RunReport, Simulator};
use pipesim_core::soc::memory::FlatMemory;
use pipesim_core::soc::traits::DataMemory;
use pipesim_core::Program;

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Assembles a program, presets registers and memory, and runs it.
pub struct TestContext {
    program: Vec<Instruction>,
    config: Config,
    registers: Vec<(usize, Word)>,
    memory: Vec<(usize, Word)>,
}

impl TestContext {
    /// Context for assembly source. Pipeline traces are recorded.
    pub fn asm(source: &str) -> Self {
        Self::new(assemble(source).expect("test program should assemble"))
    }

    pub fn new(program: Vec<Instruction>) -> Self {
        init_tracing();
        let mut config = Config::default();
        config.general.trace_pipeline = true;
        Self {
            program,
            config,
            registers: Vec::new(),
            memory: Vec::new(),
        }
    }

    pub fn reg(mut self, idx: usize, val: Word) -> Self {
        self.registers.push((idx, val));
        self
    }

    pub fn mem(mut self, addr: usize, val: Word) -> Self {
        self.memory.push((addr, val));
        self
    }

    pub fn max_cycles(mut self, limit: u64) -> Self {
        self.config.general.max_cycles = limit;
        self
    }

    pub fn with_cache(mut self, lines: usize, ways: usize, block_words: usize) -> Self {
        self.config.cache.enabled = true;
        self.config.cache.lines = lines;
        self.config.cache.ways = ways;
        self.config.cache.block_words = block_words;
        self
    }

    /// Builds the simulator without running it.
    pub fn build(&self) -> Simulator {
        let program = Program::new(self.program.clone(), self.config.memory.size_words)
            .expect("test program should validate");
        let mut memory = FlatMemory::new(self.config.memory.size_words);
        for &(addr, val) in &self.memory {
            memory.write(addr, val);
        }
        let mut sim = Simulator::with_flat_memory(program, &self.config, memory);
        for &(idx, val) in &self.registers {
            sim.set_register(idx, val);
        }
        sim
    }

    /// Runs to completion, returning the simulator for inspection and the report.
    pub fn run(&self) -> (Simulator, RunReport) {
        let mut sim = self.build();
        let report = sim.run().expect("test program should run to completion");
        (sim, report)
    }
}
