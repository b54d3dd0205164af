//! Five-stage pipeline simulator CLI.
//!
//! This binary provides a single entry point for the simulator and its ISA tools. It performs:
//! 1. **Run:** Load a program image, apply presets and overrides, and run it to completion.
//! 2. **Encode:** Assemble a program into a hex word image.
//! 3. **Decode / Disasm:** Turn instruction words back into assembly text.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pipesim_core::common::{LoaderError, NUM_REGS, Word};
use pipesim_core::config::Config;
use pipesim_core::isa::decode;
use pipesim_core::isa::disasm::disassemble_listing;
use pipesim_core::sim::loader::{self, ImageFormat, ProgramImage};
use pipesim_core::sim::RunReport;
use pipesim_core::stats::STATS_SECTIONS;
use pipesim_core::{Program, Simulator};

type CliResult<T = ()> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate five-stage pipeline simulator",
    long_about = "Run programs through an IF/ID/EX/MEM/WB pipeline with forwarding, load-use stalls and branch flushing.\n\nPrograms are JSON images, assembly (.asm/.s) or hex word images (.hex).\n\nExamples:\n  pipesim run programs/hazards.json\n  pipesim run loop.asm --reg R1=3 --trace\n  pipesim encode loop.asm > loop.hex\n  pipesim decode 0x00430800"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image until the pipeline drains.
    Run(RunArgs),

    /// Assemble a program and print its hex word image.
    Encode {
        /// Program image (.json, .asm or .s).
        file: PathBuf,

        /// JSON configuration file; its memory size bounds static addresses.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Decode instruction words given on the command line.
    Decode {
        /// 32-bit words in hex, with or without `0x`.
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Print a disassembly listing of a program image.
    Disasm {
        /// Program image; `.hex` images may contain undecodable words.
        file: PathBuf,

        /// JSON configuration file; its memory size bounds static addresses.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Encode { file, config } => cmd_encode(&file, config.as_deref()),
        Commands::Decode { words } => cmd_decode(&words),
        Commands::Disasm { file, config } => cmd_disasm(&file, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Program image (.json, .asm, .s or .hex).
    file: PathBuf,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the pipeline occupancy of every cycle.
    #[arg(short, long)]
    trace: bool,

    /// Print the run report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Cycle budget before the run is abandoned.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Preset a register, e.g. `--reg R2=10`. Repeatable.
    #[arg(long = "reg", value_name = "R=V", value_parser = parse_reg_preset)]
    regs: Vec<(usize, Word)>,

    /// Preset a memory word, e.g. `--mem 100=25`. Repeatable.
    #[arg(long = "mem", value_name = "A=V", value_parser = parse_mem_preset)]
    mems: Vec<(usize, Word)>,

    /// Put the configured data cache in front of memory.
    #[arg(long)]
    cache: bool,

    /// Statistics sections to print (summary, hazards, instruction_mix). Default: all.
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,
}

/// Loads, presets and runs a program, then prints the report.
///
/// Command line presets override those stored in the image.
fn cmd_run(args: &RunArgs) -> CliResult {
    let mut config = load_config(args.config.as_deref())?;
    if args.trace {
        config.general.trace_pipeline = true;
    }
    if let Some(limit) = args.max_cycles {
        config.general.max_cycles = limit;
    }
    if args.cache {
        config.cache.enabled = true;
    }
    if let Some(bad) = args
        .stats
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        return Err(format!(
            "unknown stats section `{bad}` (expected one of {})",
            STATS_SECTIONS.join(", ")
        )
        .into());
    }

    let mut image = loader::load_image(&args.file)?;
    image.registers.extend(args.regs.iter().copied());
    image.memory.extend(args.mems.iter().copied());
    debug!(
        file = %args.file.display(),
        instructions = image.program.len(),
        "image loaded"
    );

    let mut sim = Simulator::from_image(&image, &config)?;
    let report = sim.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &args.stats);
    }
    Ok(())
}

fn print_report(report: &RunReport, sections: &[String]) {
    if !report.traces.is_empty() {
        println!("PIPELINE TRACE");
        for trace in &report.traces {
            println!("{trace}");
        }
        println!();
    }

    println!("REGISTERS");
    print!("{}", report.registers);
    report.stats.print_sections(sections);

    if let Some(cache) = report.cache {
        println!("DATA CACHE");
        println!("  hits                   {}", cache.hits);
        println!("  misses                 {}", cache.misses);
        println!("  hit_rate               {:.2}%", cache.hit_rate() * 100.0);
    }
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    Ok(match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    })
}

/// Validates a program image against the configured memory and encodes it.
fn encode_image(file: &Path, config: &Config) -> CliResult<Vec<u32>> {
    let ProgramImage { program, .. } = loader::load_image(file)?;
    Ok(Program::new(program, config.memory.size_words)?.to_words()?)
}

/// Validates a program image and prints it as one hex word per line.
fn cmd_encode(file: &Path, config: Option<&Path>) -> CliResult {
    for word in encode_image(file, &load_config(config)?)? {
        println!("{word:08x}");
    }
    Ok(())
}

fn cmd_decode(words: &[String]) -> CliResult {
    for word in loader::parse_hex(&words.join("\n"))? {
        println!("{word:08x}  {}", decode(word)?);
    }
    Ok(())
}

fn cmd_disasm(file: &Path, config: Option<&Path>) -> CliResult {
    let words = if ImageFormat::from_path(file) == ImageFormat::Hex {
        let text = fs::read_to_string(file).map_err(|source| LoaderError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        loader::parse_hex(&text)?
    } else {
        encode_image(file, &load_config(config)?)?
    };
    print!("{}", disassemble_listing(&words));
    Ok(())
}

fn parse_assignment(text: &str) -> Result<(&str, Word), String> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{text}`"))?;
    let value = value
        .trim()
        .parse::<Word>()
        .map_err(|e| format!("invalid value `{value}`: {e}"))?;
    Ok((key.trim(), value))
}

fn parse_reg_preset(text: &str) -> Result<(usize, Word), String> {
    let (key, value) = parse_assignment(text)?;
    let digits = key
        .strip_prefix('R')
        .or_else(|| key.strip_prefix('r'))
        .unwrap_or(key);
    let idx: usize = digits
        .parse()
        .map_err(|_| format!("invalid register `{key}`"))?;
    if idx >= NUM_REGS {
        return Err(format!("register `{key}` out of range (R0..R{})", NUM_REGS - 1));
    }
    Ok((idx, value))
}

fn parse_mem_preset(text: &str) -> Result<(usize, Word), String> {
    let (key, value) = parse_assignment(text)?;
    let addr = key
        .parse()
        .map_err(|_| format!("invalid address `{key}`"))?;
    Ok((addr, value))
}
