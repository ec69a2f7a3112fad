//! samp - Raw PCM Sample Manipulation
//!
//! samp loads headerless PCM audio (8 or 16-bit signed, mono or stereo)
//! into memory and applies sample-level transforms:
//! - Concatenation, reversal and range cuts
//! - Per-channel volume scaling and saturating addition
//! - RMS measurement and RMS-target normalization
//!
//! # Architecture
//!
//! A [`SampleBuffer`] is generic over a [`Frame`] type ([`Mono`] or
//! [`Stereo`]) whose channels hold a [`Sample`] (`i8` or `i16`), so each
//! transform is written once for all four formats. The [`cli`] module is
//! the command-line front end on top of the library.

pub mod cli;
pub mod engine;
pub mod error;

pub use engine::{
    AudioFormat, BitDepth, ByteOrder, ChannelLayout, Frame, Mono, Rms, Sample, SampleBuffer,
    SampleRange, Stereo,
};
pub use error::{Result, SampError};
