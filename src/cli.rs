//! cli component of the huffpack project.
//!
//! lines starting with `> ` denote valid invocations. `<description>` denotes a required argument,
//! `[description]` an optional one.
//!
//! # Encoding
//!
//! > `huffpack enc <path> [--output <path>] [--json]`
//!
//! the input is read twice: once to count symbols, once to pack their codes. the output defaults to
//! the input path with the configured extension (`.huff`) appended. the report prints the input
//! size, the payload size and the space saved, or the same data as json with `--json`.
//!
//! # Decoding
//!
//! > `huffpack dec <path> [--output <path>]`
//!
//! the output defaults to the input path with the extension stripped; decoding a file without the
//! extension requires `--output`.
//!
//! # Testing
//!
//! > `huffpack test <path>`
//!
//! > `huffpack corpus <folder>`
//!
//! `test` round-trips one file in memory and reports whether the result matches. `corpus` does the
//! same for every file under a folder and fails if any of them does not survive the trip.
//!
//! # Inspection
//!
//! > `huffpack table <path>`
//!
//! prints the frequency and code of every symbol of a file.
//!
//! # Configuration
//!
//! > `huffpack --config <file> <command>`
//!
//! > `huffpack config init <path>`
//!
//! > `huffpack config show`
//!
//! the configuration is a json file; missing fields take their defaults.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use huffpack::CodecConfig;

pub mod config;
pub mod corpus;
pub mod decode;
pub mod encode;
pub mod table;

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load the codec configuration from a JSON file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The configuration named by `--config`, or the defaults.
    pub fn load_config(&self) -> Result<CodecConfig> {
        match &self.config {
            Some(path) => CodecConfig::from_file(path)
                .with_context(|| format!("failed to load configuration from {}", path.display())),
            None => Ok(CodecConfig::default()),
        }
    }
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode (compress) a file
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decode (decompress) a file
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip of a file
    Test(TestArgs),

    /// Roundtrip every file in a folder
    Corpus(CorpusArgs),

    /// Print the code table of a file
    Table(TableArgs),

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file, defaults to the input path plus the extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the encoded file
    pub input: PathBuf,

    /// Path for the output file, defaults to the input path without the extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the original file
    pub input: PathBuf,
}

/// Arguments specific to the corpus command
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Folder to walk
    #[arg(default_value = "./test_data")]
    pub dir: PathBuf,
}

/// Arguments specific to the table command
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Path to the file to analyse
    pub input: PathBuf,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the default configuration to a file
    Init {
        /// Output file path
        output_path: PathBuf,
    },

    /// Print the effective configuration
    Show,
}
