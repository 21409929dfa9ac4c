//! cli component of huffpack.
//!
//! lines starting with `> ` denote valid invocations. `$exename` stands for the executable name,
//! `<description>` denotes a required argument and `[description]` an optional one.
//!
//! # Compression
//!
//! > `$exename encode <input file> <output file> [--force]`
//!
//! reads the whole input file, compresses it into a single container and writes it verbatim to the
//! output path. empty inputs are refused, since the container cannot describe a zero length.
//! `enc` and `c` are accepted as aliases.
//!
//! # Decompression
//!
//! > `$exename decode <input file> <output file> [--force]`
//!
//! the input must be at least large enough to hold the 4 byte header and one tree record.
//! `dec` and `d` are accepted as aliases.
//!
//! existing output files are never overwritten unless `--force` is given.
//!
//! # Testing
//!
//! > `$exename test <input file> [--keep-failures]`
//!
//! compresses the file, immediately decompresses the result and compares it with the original.
//! with `--keep-failures`, a mismatch leaves `{file name}.expected.bin` and `{file name}.got.bin`
//! in the working directory.
//!
//! > `$exename corpus [directory] [--json]`
//!
//! runs the same roundtrip over every file below the directory (`./test_data` by default).
//!
//! # Inspection
//!
//! > `$exename inspect <compressed file> [--json]`
//!
//! prints the header and tree statistics of a container without decoding its payload.
//!
//! # Exit status
//!
//! every command exits with a non-zero status if it failed, after printing the error chain.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use huffpack::{Compressor, HuffmanCoding, if_tracing};
use serde::Serialize;
use voxell_timer::time_fn;

pub mod corpus;
pub mod decode;
pub mod encode;
pub mod inspect;

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence when set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode (compress) a file
    #[command(visible_aliases = ["enc", "c"])]
    Encode(EncodeArgs),

    /// Decode (decompress) a file
    #[command(visible_aliases = ["dec", "d"])]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip on a single file
    Test(TestArgs),

    /// Show header and tree statistics of a compressed file
    Inspect(InspectArgs),

    /// Roundtrip every file below a directory
    Corpus(CorpusArgs),
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the compressed output file
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long, short)]
    pub force: bool,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the compressed input file
    pub input: PathBuf,

    /// Path for the decompressed output file
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long, short)]
    pub force: bool,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the original file
    pub input: PathBuf,

    /// Save expected and actual output next to the working directory on mismatch
    #[arg(long)]
    pub keep_failures: bool,
}

/// Arguments specific to the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the compressed file
    pub input: PathBuf,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments specific to the corpus command
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Directory to walk
    #[arg(default_value = "./test_data")]
    pub dir: PathBuf,

    /// Print a JSON summary instead of per-file reports
    #[arg(long)]
    pub json: bool,
}

/// Reads a whole input file, refusing missing files and files shorter than `min_len` bytes.
pub fn read_input(path: &Path, min_len: usize) -> Result<Vec<u8>> {
    if !path.is_file() {
        bail!("input file {} not found", path.display());
    }
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if data.is_empty() {
        bail!("input file {} is empty", path.display());
    }
    if data.len() < min_len {
        bail!(
            "input file {} is {} bytes, too short for a compressed container ({} bytes minimum)",
            path.display(),
            data.len(),
            min_len
        );
    }
    Ok(data)
}

pub fn write_output(path: &Path, data: &[u8], force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("output file {} already exists, pass --force to overwrite", path.display());
    }
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

/// Outcome of compressing and decompressing one file in memory.
#[derive(Debug, Serialize)]
pub struct RoundTripReport {
    pub path: PathBuf,
    pub passed: bool,
    pub original_len: usize,
    pub compressed_len: usize,
    pub decompressed_len: usize,
    pub encode_micros: u128,
    pub decode_micros: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub decompressed: Vec<u8>,
}

impl RoundTripReport {
    /// Compressed size as a fraction of the original.
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.compressed_len as f64 / self.original_len as f64
    }

    pub fn print(&self) {
        let bytes_saved = self.original_len as isize - self.compressed_len as isize;
        let percent_saved = if self.original_len == 0 {
            0.0
        } else {
            bytes_saved as f64 / self.original_len as f64 * 100.0
        };
        eprintln!(
            "======== {} {} ========\n\t{}us encode\n\t{}us decode\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes ({:+.1}%){}",
            if self.passed { "PASSED" } else { "FAILED" },
            self.path.display(),
            self.encode_micros,
            self.decode_micros,
            self.original_len,
            self.compressed_len,
            self.decompressed_len,
            self.ratio() * 100.0,
            bytes_saved,
            percent_saved,
            self.error.as_deref().map(|e| format!("\n\terror: {}", e)).unwrap_or_default()
        );
    }
}

pub fn run_roundtrip(path: &Path, data: &[u8]) -> RoundTripReport {
    let mut coder = HuffmanCoding;
    let mut report = RoundTripReport {
        path: path.to_path_buf(),
        passed: false,
        original_len: data.len(),
        compressed_len: 0,
        decompressed_len: 0,
        encode_micros: 0,
        decode_micros: 0,
        error: None,
        decompressed: Vec::new(),
    };

    let (compressed, encode_time) = time_fn(|| coder.compress_bytes(data));
    report.encode_micros = encode_time.as_micros();
    let compressed = match compressed {
        Ok(c) => c,
        Err(e) => {
            report.error = Some(format!("{:#}", e));
            return report;
        }
    };
    report.compressed_len = compressed.len();

    let (decompressed, decode_time) = time_fn(|| coder.decompress_bytes(&compressed));
    report.decode_micros = decode_time.as_micros();
    match decompressed {
        Ok(d) => {
            report.decompressed_len = d.len();
            report.passed = d == data;
            if !report.passed {
                report.error = Some("decompressed data differs from the original".to_string());
            }
            report.decompressed = d;
        }
        Err(e) => report.error = Some(format!("{:#}", e)),
    }

    if_tracing! {
        tracing::debug!(
            event = "roundtrip",
            path = %path.display(),
            passed = report.passed,
            ratio = report.ratio(),
            "roundtrip finished"
        );
    }

    report
}

/// Writes `{file name}.expected.bin` and `{file name}.got.bin` to the working directory,
/// moving earlier copies aside to `.old`.
pub fn save_failed_equality_results_to_file(expected: &[u8], got: &[u8], path: &Path) -> Result<()> {
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    let target_expected = format!("{}.expected.bin", filename);
    let target_got = format!("{}.got.bin", filename);

    for target in [&target_expected, &target_got] {
        if fs::exists(target)? {
            fs::rename(target, format!("{}.old", target))?;
        }
    }

    fs::write(&target_expected, expected).with_context(|| format!("failed to write {}", target_expected))?;
    fs::write(&target_got, got).with_context(|| format!("failed to write {}", target_got))?;
    Ok(())
}
