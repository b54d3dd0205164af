//! Program Image Loader.
//!
//! This module reads programs and their initial state from disk. It performs:
//! 1. **Format Selection:** Picks JSON, assembly or hex parsing from the file extension.
//! 2. **Parsing:** Produces an instruction list plus register and memory presets.
//! 3. **Error Reporting:** Wraps I/O, JSON, assembler and decode failures in [`LoaderError`].
//!
//! A JSON image looks like:
//!
//! ```json
//! {
//!   "program": [
//!     { "op": "ADD", "rd": 1, "rs1": 2, "rs2": 3 },
//!     { "op": "LOAD", "rd": 8, "addr": 100 }
//!   ],
//!   "registers": { "2": 10, "3": 20 },
//!   "memory": { "100": 25 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::program::decode_words;
use crate::common::error::LoaderError;
use crate::common::reg::Word;
use crate::isa::asm::assemble;
use crate::isa::instruction::Instruction;

/// On-disk program representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// JSON object with `program`, `registers` and `memory` keys.
    Json,
    /// Assembly text, one instruction per line.
    Asm,
    /// One 32-bit hex word per line.
    Hex,
}

impl ImageFormat {
    /// Selects the format from a file extension; unknown extensions are assembly.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("hex") => Self::Hex,
            _ => Self::Asm,
        }
    }
}

/// A program with the register and memory state it starts from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramImage {
    /// Instructions in program order.
    pub program: Vec<Instruction>,
    /// Initial register values keyed by index.
    #[serde(default)]
    pub registers: BTreeMap<usize, Word>,
    /// Initial memory words keyed by address.
    #[serde(default)]
    pub memory: BTreeMap<usize, Word>,
}

impl ProgramImage {
    /// An image with no presets.
    pub fn from_instructions(program: Vec<Instruction>) -> Self {
        Self {
            program,
            ..Self::default()
        }
    }
}

/// Parses a hex word image.
///
/// Blank lines and `#` comments are skipped; words may carry a `0x` prefix and
/// `_` separators.
///
/// # Errors
///
/// Returns [`LoaderError::Hex`] for the first token that is not a 32-bit word.
pub fn parse_hex(text: &str) -> Result<Vec<u32>, LoaderError> {
    let mut words = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let digits: String = line
            .trim_start_matches("0x")
            .trim_start_matches("0X")
            .chars()
            .filter(|&c| c != '_')
            .collect();
        let word = u32::from_str_radix(&digits, 16).map_err(|_| LoaderError::Hex {
            line: idx + 1,
            token: line.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Parses image text in the given format.
///
/// # Errors
///
/// Returns a [`LoaderError`] describing the first parse failure, or every
/// undecodable word of a hex image. `path` is used only in messages.
pub fn parse_image(text: &str, format: ImageFormat, path: &Path) -> Result<ProgramImage, LoaderError> {
    match format {
        ImageFormat::Json => serde_json::from_str(text).map_err(|source| LoaderError::Json {
            path: path.to_path_buf(),
            source,
        }),
        ImageFormat::Asm => Ok(ProgramImage::from_instructions(assemble(text)?)),
        ImageFormat::Hex => {
            let words = parse_hex(text)?;
            Ok(ProgramImage::from_instructions(decode_words(&words)?))
        }
    }
}

/// Reads a program image from disk, choosing the format from its extension.
///
/// # Errors
///
/// Returns [`LoaderError::Io`] if the file cannot be read, or the parse error
/// from [`parse_image`].
pub fn load_image(path: impl AsRef<Path>) -> Result<ProgramImage, LoaderError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    parse_image(&text, ImageFormat::from_path(path), path)
}

fn read_text(path: &Path) -> Result<String, LoaderError> {
    fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: PathBuf::from(path),
        source,
    })
}
