//! CLI Command Implementations
//!
//! Loads the input files in the declared format, applies the requested
//! operation and writes (or prints) the result.

use std::path::Path;

use log::info;
use serde::Serialize;

use crate::cli::{Cli, Operation};
use crate::engine::{
    AudioFormat, BitDepth, ByteOrder, ChannelLayout, Frame, Mono, Rms, SampleBuffer, SampleRange,
    Stereo,
};
use crate::error::Result;

/// Machine-readable result of the `rms` operation
#[derive(Debug, Clone, Serialize)]
pub struct RmsReport {
    pub input: String,
    pub sample_rate: u32,
    pub bit_depth: u16,
    pub channels: usize,
    pub frames: usize,
    pub rms: Rms,
}

/// Run the operation selected on the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let format = cli.format();
    info!("Running {} on {} input", cli.operation.name(), format);

    match (format.bit_depth, format.layout) {
        (BitDepth::Eight, ChannelLayout::Mono) => execute::<Mono<i8>>(cli, format),
        (BitDepth::Sixteen, ChannelLayout::Mono) => execute::<Mono<i16>>(cli, format),
        (BitDepth::Eight, ChannelLayout::Stereo) => execute::<Stereo<i8>>(cli, format),
        (BitDepth::Sixteen, ChannelLayout::Stereo) => execute::<Stereo<i16>>(cli, format),
    }
}

fn execute<F: Frame>(cli: &Cli, format: AudioFormat) -> Result<()> {
    let order = cli.byte_order();

    let output: SampleBuffer<F> = match &cli.operation {
        Operation::Add { first, second } => {
            let a = load::<F>(first, format, order)?;
            let b = load::<F>(second, format, order)?;
            &a + &b
        }
        Operation::Cut { start, end, input } => {
            let range = SampleRange::new(*start, *end)?;
            load::<F>(input, format, order)?.cut(range)?
        }
        Operation::Radd {
            start_first,
            end_first,
            start_second,
            end_second,
            first,
            second,
        } => {
            let range_a = SampleRange::from_seconds(*start_first, *end_first, format.sample_rate)?;
            let range_b =
                SampleRange::from_seconds(*start_second, *end_second, format.sample_rate)?;
            let a = load::<F>(first, format, order)?;
            let b = load::<F>(second, format, order)?;
            SampleBuffer::ranged_add(&a, range_a, &b, range_b)?
        }
        Operation::Cat { first, second } => {
            let a = load::<F>(first, format, order)?;
            let b = load::<F>(second, format, order)?;
            a.concat(&b)?
        }
        Operation::Volume { left, right, input } => {
            load::<F>(input, format, order)? * (*left, *right)
        }
        Operation::Reverse { input } => load::<F>(input, format, order)?.reverse(),
        Operation::Rms { input } => {
            let buffer = load::<F>(input, format, order)?;
            let report = rms_report(input, &buffer)?;
            println!("{}", render_rms(&report, cli.json)?);
            return Ok(());
        }
        Operation::Normalize { left, right, input } => {
            load::<F>(input, format, order)?.normalized((*left, *right))?
        }
    };

    output.save_with_order(&cli.output, order)?;
    println!(
        "Wrote {} frames ({}) to {}",
        output.len(),
        output.format(),
        cli.output.display()
    );

    Ok(())
}

fn load<F: Frame>(path: &Path, format: AudioFormat, order: ByteOrder) -> Result<SampleBuffer<F>> {
    let mut buffer = SampleBuffer::new(format);
    buffer.read_with_order(path, order)?;
    Ok(buffer)
}

/// Measure a loaded buffer for display
pub fn rms_report<F: Frame>(input: &Path, buffer: &SampleBuffer<F>) -> Result<RmsReport> {
    Ok(RmsReport {
        input: input.display().to_string(),
        sample_rate: buffer.sample_rate(),
        bit_depth: buffer.bit_depth(),
        channels: buffer.channels(),
        frames: buffer.len(),
        rms: buffer.rms()?,
    })
}

/// Format an RMS report as plain text or pretty JSON
pub fn render_rms(report: &RmsReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    Ok(if report.channels == 1 {
        format!("RMS: {:.4}", report.rms.left)
    } else {
        format!(
            "RMS left: {:.4} right: {:.4}",
            report.rms.left, report.rms.right
        )
    })
}
