//! Buffer metadata and sample ranges
//!
//! Raw PCM carries no header, so the format of a file is whatever the
//! caller declares: sample rate, bit depth and channel layout.

use std::fmt;
use std::ops::Range;

use crate::engine::frame::Frame;
use crate::engine::sample::Sample;
use crate::error::{Result, SampError};

/// Sample rate used when none is given
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

// ============================================================================
// Bit Depth
// ============================================================================

/// Width of one integer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitDepth {
    /// Signed 8-bit samples
    Eight,
    /// Signed 16-bit samples
    #[default]
    Sixteen,
}

impl BitDepth {
    /// Number of bits per sample
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }

    /// Create a BitDepth from a bit count
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(BitDepth::Eight),
            16 => Some(BitDepth::Sixteen),
            _ => None,
        }
    }
}

// ============================================================================
// Channel Layout
// ============================================================================

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// Single channel (mono)
    #[default]
    Mono,
    /// Two channels (stereo: left, right)
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Create a ChannelLayout from a channel count
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

// ============================================================================
// Audio Format
// ============================================================================

/// Descriptive metadata attached to a buffer.
///
/// Not enforced against the buffer contents: the frame type decides how
/// bytes are decoded, the format only travels with the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample
    pub bit_depth: BitDepth,
    /// Mono or stereo
    pub layout: ChannelLayout,
}

impl AudioFormat {
    pub fn new(sample_rate: u32, bit_depth: BitDepth, layout: ChannelLayout) -> Self {
        Self {
            sample_rate,
            bit_depth,
            layout,
        }
    }

    /// Build a format from raw integer metadata
    ///
    /// # Errors
    /// * `UnsupportedFormat` - bit depth other than 8/16 or channel count other than 1/2
    pub fn from_raw(sample_rate: u32, bits: u16, channels: usize) -> Result<Self> {
        let bit_depth = BitDepth::from_bits(bits).ok_or_else(|| SampError::UnsupportedFormat {
            format: format!("{}-bit samples (must be 8 or 16)", bits),
        })?;
        let layout =
            ChannelLayout::from_count(channels).ok_or_else(|| SampError::UnsupportedFormat {
                format: format!("{} channels (must be 1 or 2)", channels),
            })?;
        Ok(Self::new(sample_rate, bit_depth, layout))
    }

    /// The format that matches frame type `F` at the given sample rate
    pub fn for_frame<F: Frame>(sample_rate: u32) -> Self {
        Self::new(sample_rate, <F::Sample as Sample>::DEPTH, F::LAYOUT)
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.layout.num_channels()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {}-bit, {} ch",
            self.sample_rate,
            self.bit_depth.bits(),
            self.channels()
        )
    }
}

// ============================================================================
// Sample Range
// ============================================================================

/// A 1-based inclusive range of sample positions.
///
/// `SampleRange::new(2, 5)` addresses the second through fifth frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleRange {
    start: usize,
    end: usize,
}

impl SampleRange {
    /// # Errors
    /// * `InvalidRange` - `start` is 0 or `start > end`
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start == 0 {
            return Err(invalid_range(start, end, 0, "start must be at least 1"));
        }
        if start > end {
            return Err(invalid_range(start, end, 0, "start is after end"));
        }
        Ok(Self { start, end })
    }

    /// Convert a time span in seconds to sample positions using
    /// `round(t * sample_rate)`. Time zero maps to the first sample.
    ///
    /// # Errors
    /// * `InvalidArgument` - negative or non-finite times
    /// * `InvalidRange` - the converted positions are inverted
    pub fn from_seconds(start_secs: f64, end_secs: f64, sample_rate: u32) -> Result<Self> {
        let to_index = |secs: f64| -> Result<usize> {
            if !secs.is_finite() || secs < 0.0 {
                return Err(SampError::InvalidArgument {
                    reason: format!("time must be a non-negative number of seconds, got {}", secs),
                });
            }
            Ok(((secs * f64::from(sample_rate)).round() as usize).max(1))
        };
        Self::new(to_index(start_secs)?, to_index(end_secs)?)
    }

    /// First position (1-based)
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last position (1-based, inclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false: a valid range covers at least one position
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The equivalent 0-based half-open index range, checked against a
    /// buffer of `len` frames.
    ///
    /// # Errors
    /// * `InvalidRange` - the range ends past the buffer
    pub fn to_indices(&self, len: usize) -> Result<Range<usize>> {
        if self.end > len {
            return Err(invalid_range(self.start, self.end, len, "end is past the last sample"));
        }
        Ok(self.start - 1..self.end)
    }
}

impl TryFrom<(usize, usize)> for SampleRange {
    type Error = SampError;

    fn try_from((start, end): (usize, usize)) -> Result<Self> {
        Self::new(start, end)
    }
}

fn invalid_range(start: usize, end: usize, len: usize, reason: &str) -> SampError {
    SampError::InvalidRange {
        start,
        end,
        len,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame::{Mono, Stereo};

    #[test]
    fn test_from_raw_validates() {
        let format = AudioFormat::from_raw(44100, 16, 2).unwrap();
        assert_eq!(format.bit_depth, BitDepth::Sixteen);
        assert_eq!(format.layout, ChannelLayout::Stereo);
        assert_eq!(format.to_string(), "44100 Hz, 16-bit, 2 ch");

        assert!(matches!(
            AudioFormat::from_raw(44100, 24, 1),
            Err(SampError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            AudioFormat::from_raw(44100, 8, 3),
            Err(SampError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_for_frame() {
        let mono8 = AudioFormat::for_frame::<Mono<i8>>(8000);
        assert_eq!(mono8, AudioFormat::new(8000, BitDepth::Eight, ChannelLayout::Mono));

        let stereo16 = AudioFormat::for_frame::<Stereo<i16>>(48000);
        assert_eq!(stereo16.channels(), 2);
        assert_eq!(stereo16.bit_depth.bits(), 16);
    }

    #[test]
    fn test_range_indices() {
        let range = SampleRange::new(2, 5).unwrap();
        assert_eq!(range.len(), 4);
        assert_eq!(range.to_indices(8).unwrap(), 1..5);
        assert_eq!(SampleRange::new(8, 8).unwrap().to_indices(8).unwrap(), 7..8);
    }

    #[test]
    fn test_range_rejects_bad_bounds() {
        assert!(SampleRange::new(0, 3).is_err());
        assert!(SampleRange::new(4, 3).is_err());
        assert!(SampleRange::try_from((1, 9)).unwrap().to_indices(8).is_err());
    }

    #[test]
    fn test_range_from_seconds() {
        let range = SampleRange::from_seconds(0.5, 1.0, 10).unwrap();
        assert_eq!((range.start(), range.end()), (5, 10));

        let from_zero = SampleRange::from_seconds(0.0, 0.26, 10).unwrap();
        assert_eq!((from_zero.start(), from_zero.end()), (1, 3));

        assert!(matches!(
            SampleRange::from_seconds(-1.0, 1.0, 10),
            Err(SampError::InvalidArgument { .. })
        ));
        assert!(SampleRange::from_seconds(2.0, 1.0, 10).is_err());
    }
}
