//! CLI Module
//!
//! Command-line interface for samp. Format options come first, then
//! exactly one operation:
//!
//! ```text
//! samp -r 44100 -b 16 -c 2 [-o out.raw] cut 100 200 in.raw
//! ```
//!
//! The single-dash spelling (`-cut`, `-rms`, ...) is accepted as well; see
//! [`normalize_args`].

pub mod commands;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

use crate::engine::{AudioFormat, BitDepth, ByteOrder, ChannelLayout};

/// Output file used when `-o` is not given
pub const DEFAULT_OUTPUT: &str = "out.raw";

/// Operation names that may be written with a leading dash
const LEGACY_OPERATIONS: [&str; 8] = [
    "-add", "-cut", "-radd", "-cat", "-v", "-rev", "-rms", "-norm",
];

/// samp - raw PCM sample manipulation
#[derive(Parser, Debug)]
#[command(name = "samp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sample rate in Hz
    #[arg(
        short = 'r',
        long = "rate",
        value_name = "HZ",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub sample_rate: u32,

    /// Bits per sample (8 or 16)
    #[arg(short = 'b', long = "bits", value_name = "BITS", value_parser = parse_bit_depth)]
    pub bit_depth: BitDepth,

    /// Number of channels (1 or 2)
    #[arg(short = 'c', long = "channels", value_name = "N", value_parser = parse_layout)]
    pub layout: ChannelLayout,

    /// Output file for operations that produce audio
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Byte order of input and output samples
    #[arg(long, value_enum, default_value_t = Endian::Native)]
    pub endian: Endian,

    /// Print rms results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub operation: Operation,
}

impl Cli {
    /// The declared format of every input file
    pub fn format(&self) -> AudioFormat {
        AudioFormat::new(self.sample_rate, self.bit_depth, self.layout)
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.endian.into()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Operation {
    /// Add two files sample by sample, clamping on overflow
    Add { first: PathBuf, second: PathBuf },

    /// Remove samples START..=END (1-based)
    Cut {
        start: usize,
        end: usize,
        input: PathBuf,
    },

    /// Add a span of FIRST (seconds) to a span of SECOND (seconds)
    Radd {
        start_first: f64,
        end_first: f64,
        start_second: f64,
        end_second: f64,
        first: PathBuf,
        second: PathBuf,
    },

    /// Concatenate two files
    Cat { first: PathBuf, second: PathBuf },

    /// Scale left/right volume (mono uses LEFT)
    #[command(name = "v", visible_alias = "volume", allow_negative_numbers = true)]
    Volume {
        left: f32,
        right: f32,
        input: PathBuf,
    },

    /// Reverse the file
    #[command(name = "rev", visible_alias = "reverse")]
    Reverse { input: PathBuf },

    /// Print the RMS of each channel
    Rms { input: PathBuf },

    /// Normalize left/right to a target RMS (mono uses LEFT)
    #[command(name = "norm", visible_alias = "normalize")]
    Normalize {
        left: f64,
        right: f64,
        input: PathBuf,
    },
}

impl Operation {
    /// Short name used in logs and error context
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Cut { .. } => "cut",
            Operation::Radd { .. } => "radd",
            Operation::Cat { .. } => "cat",
            Operation::Volume { .. } => "volume",
            Operation::Reverse { .. } => "reverse",
            Operation::Rms { .. } => "rms",
            Operation::Normalize { .. } => "normalize",
        }
    }
}

/// Byte order as spelled on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Native,
    Little,
    Big,
}

impl From<Endian> for ByteOrder {
    fn from(endian: Endian) -> Self {
        match endian {
            Endian::Native => ByteOrder::Native,
            Endian::Little => ByteOrder::Little,
            Endian::Big => ByteOrder::Big,
        }
    }
}

/// Rewrite the first single-dash operation token (`-add`, `-rms`, ...)
/// to its subcommand name so clap does not read it as bundled short flags.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut rewritten = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if !rewritten {
                if let Some(token) = arg.to_str() {
                    if LEGACY_OPERATIONS.contains(&token) {
                        rewritten = true;
                        return OsString::from(&token[1..]);
                    }
                }
            }
            arg
        })
        .collect()
}

/// Text printed to stdout for a command-line usage error.
///
/// Value errors (`-b 24`, `-c 3`) render without a usage line, so the
/// top-level usage is appended when clap left it out.
pub fn usage_error_text(err: &clap::Error) -> String {
    let message = err.render().to_string();
    let message = message.trim_end();
    if message.contains("Usage:") {
        return message.to_string();
    }
    let usage = Cli::command().render_usage().to_string();
    format!("{}\n\n{}", message, usage.trim_end())
}

fn parse_bit_depth(value: &str) -> Result<BitDepth, String> {
    value
        .parse::<u16>()
        .ok()
        .and_then(BitDepth::from_bits)
        .ok_or_else(|| format!("invalid bit depth '{}' (must be either 8 or 16)", value))
}

fn parse_layout(value: &str) -> Result<ChannelLayout, String> {
    value
        .parse::<usize>()
        .ok()
        .and_then(ChannelLayout::from_count)
        .ok_or_else(|| format!("invalid channel count '{}' (must be either 1 or 2)", value))
}
