//! Sample Engine Module
//!
//! Core raw PCM handling:
//! - Sample and frame types (8/16-bit, mono/stereo)
//! - Buffer metadata and sample ranges
//! - Raw file I/O
//! - The sample buffer and its transforms

pub mod buffer;
pub mod format;
pub mod frame;
pub mod io;
pub mod sample;

pub use buffer::{Rms, SampleBuffer};
pub use format::{AudioFormat, BitDepth, ChannelLayout, SampleRange, DEFAULT_SAMPLE_RATE};
pub use frame::{Frame, Mono, Stereo};
pub use io::ByteOrder;
pub use sample::Sample;
