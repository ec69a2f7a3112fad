//! Sample Buffer
//!
//! [`SampleBuffer`] owns an ordered sequence of frames plus the format
//! metadata that travels with them. Every transform returns a new buffer
//! and leaves its inputs untouched; only [`SampleBuffer::read`] fills a
//! buffer in place.

use std::ops::{Add, Mul};
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use crate::engine::format::{AudioFormat, SampleRange, DEFAULT_SAMPLE_RATE};
use crate::engine::frame::Frame;
use crate::engine::io::{self, ByteOrder};
use crate::engine::sample::Sample;
use crate::error::{Result, SampError};

// ============================================================================
// RMS
// ============================================================================

/// Per-channel root-mean-square amplitude, in sample units.
///
/// For mono buffers `right` is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rms {
    pub left: f64,
    pub right: f64,
}

impl Rms {
    /// RMS of channel `channel` (0 = left, 1 = right)
    pub fn channel(&self, channel: usize) -> f64 {
        if channel == 0 {
            self.left
        } else {
            self.right
        }
    }
}

// ============================================================================
// Sample Buffer
// ============================================================================

/// In-memory raw PCM audio.
///
/// # Example
/// ```
/// use samp::{AudioFormat, Mono, SampleBuffer};
///
/// let format = AudioFormat::for_frame::<Mono<i16>>(44100);
/// let buffer = SampleBuffer::from_samples(format, vec![Mono(1i16), Mono(-1), Mono(2)]);
/// assert_eq!(buffer.reverse().samples(), &[Mono(2), Mono(-1), Mono(1)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<F: Frame> {
    format: AudioFormat,
    samples: Vec<F>,
}

impl<F: Frame> Default for SampleBuffer<F> {
    fn default() -> Self {
        Self::new(AudioFormat::for_frame::<F>(DEFAULT_SAMPLE_RATE))
    }
}

impl<F: Frame> SampleBuffer<F> {
    /// Create an empty buffer
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            samples: Vec::new(),
        }
    }

    /// Create a buffer from frames already in memory
    pub fn from_samples(format: AudioFormat, samples: Vec<F>) -> Self {
        Self { format, samples }
    }

    /// Create a buffer and fill it from a raw file in host byte order
    ///
    /// # Errors
    /// * `FileOpen` - the file is missing or unreadable
    pub fn open(path: &Path, format: AudioFormat) -> Result<Self> {
        let mut buffer = Self::new(format);
        buffer.read(path)?;
        Ok(buffer)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[inline]
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    #[inline]
    pub fn bit_depth(&self) -> u16 {
        self.format.bit_depth.bits()
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    #[inline]
    pub fn samples(&self) -> &[F] {
        &self.samples
    }

    /// Take the frames out of the buffer
    pub fn into_samples(self) -> Vec<F> {
        self.samples
    }

    /// Number of frames
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds at the declared sample rate
    pub fn duration_secs(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / f64::from(self.format.sample_rate)
    }

    // ------------------------------------------------------------------------
    // Binary I/O
    // ------------------------------------------------------------------------

    /// Replace the buffer contents with the frames of a raw file, host byte order
    pub fn read(&mut self, path: &Path) -> Result<()> {
        self.read_with_order(path, ByteOrder::Native)
    }

    /// Replace the buffer contents with the frames of a raw file
    ///
    /// # Errors
    /// * `FileOpen` - the file is missing or unreadable; the buffer is left unchanged
    pub fn read_with_order(&mut self, path: &Path, order: ByteOrder) -> Result<()> {
        self.samples = io::read_frames(path, order)?;
        debug!(
            "Loaded {} frames ({}, {:?} byte order)",
            self.len(),
            self.format,
            order.resolve()
        );
        Ok(())
    }

    /// Write the frames to a raw file in host byte order
    pub fn save(&self, path: &Path) -> Result<()> {
        self.save_with_order(path, ByteOrder::Native)
    }

    /// Write the frames to a raw file, truncating any existing content
    ///
    /// # Errors
    /// * `FileCreate` - the destination cannot be opened or written
    pub fn save_with_order(&self, path: &Path, order: ByteOrder) -> Result<()> {
        io::write_frames(path, &self.samples, order)
    }

    // ------------------------------------------------------------------------
    // Value operators
    // ------------------------------------------------------------------------

    /// `self` followed by `other`
    ///
    /// # Errors
    /// * `FormatMismatch` - sample rate, bit depth or layout differ
    pub fn concat(&self, other: &Self) -> Result<Self> {
        if self.format != other.format {
            return Err(SampError::FormatMismatch {
                left: self.format,
                right: other.format,
            });
        }

        let mut samples = Vec::with_capacity(self.len() + other.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        Ok(Self::from_samples(self.format, samples))
    }

    /// Scale every sample by a per-channel volume factor.
    ///
    /// Mono uses only `factor.0`. Products are clamped to the sample range
    /// and truncated toward zero.
    pub fn scaled(&self, factor: (f32, f32)) -> Self {
        let factors = [f64::from(factor.0), f64::from(factor.1)];
        self.map_samples(|ch, s| s.scale(factors[ch]))
    }

    /// Saturating elementwise sum.
    ///
    /// The shorter operand is treated as zero-padded at the tail; the
    /// result takes the length and format of the longer one (`self` on a tie).
    pub fn mix(&self, other: &Self) -> Self {
        let (longer, shorter) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut sum = longer.clone();
        for (dst, &src) in sum.samples.iter_mut().zip(shorter.samples.iter()) {
            *dst = dst.zip_with(src, Sample::saturating_sum);
        }
        sum
    }

    /// Remove the frames in `range` (1-based, inclusive), joining what is
    /// left on either side.
    ///
    /// # Errors
    /// * `InvalidRange` - the range ends past the buffer
    pub fn cut(&self, range: SampleRange) -> Result<Self> {
        let indices = range.to_indices(self.len())?;
        let mut samples = Vec::with_capacity(self.len() - indices.len());
        samples.extend_from_slice(&self.samples[..indices.start]);
        samples.extend_from_slice(&self.samples[indices.end..]);
        debug!("Cut {} frames, {} remain", range.len(), samples.len());
        Ok(Self::from_samples(self.format, samples))
    }

    /// Frames in reverse temporal order; stereo pairs stay together
    pub fn reverse(&self) -> Self {
        let samples = self.samples.iter().rev().copied().collect();
        Self::from_samples(self.format, samples)
    }

    /// Copy of the frames in `range` (1-based, inclusive)
    ///
    /// # Errors
    /// * `InvalidRange` - the range ends past the buffer
    pub fn extract(&self, range: SampleRange) -> Result<Self> {
        let indices = range.to_indices(self.len())?;
        Ok(Self::from_samples(self.format, self.samples[indices].to_vec()))
    }

    /// Saturating sum of a slice of `a` and a slice of `b`.
    ///
    /// Ranges of unequal length are accepted; the shorter extract is
    /// zero-padded as in [`SampleBuffer::mix`].
    ///
    /// # Errors
    /// * `InvalidRange` - either range ends past its buffer
    pub fn ranged_add(
        a: &Self,
        range_a: SampleRange,
        b: &Self,
        range_b: SampleRange,
    ) -> Result<Self> {
        if range_a.len() != range_b.len() {
            warn!(
                "Ranged add over unequal spans ({} vs {} frames); shorter span is zero-padded",
                range_a.len(),
                range_b.len()
            );
        }
        let first = a.extract(range_a)?;
        let second = b.extract(range_b)?;
        Ok(first.mix(&second))
    }

    // ------------------------------------------------------------------------
    // Loudness
    // ------------------------------------------------------------------------

    /// Per-channel root-mean-square amplitude
    ///
    /// # Errors
    /// * `EmptyBuffer` - there are no frames to average
    pub fn rms(&self) -> Result<Rms> {
        if self.is_empty() {
            return Err(SampError::EmptyBuffer { operation: "measure" });
        }

        let mut sum_squares = [0.0f64; 2];
        for frame in &self.samples {
            for (ch, acc) in sum_squares.iter_mut().enumerate().take(F::CHANNELS) {
                let value = frame.channel(ch).as_f64();
                *acc += value * value;
            }
        }

        let count = self.len() as f64;
        Ok(Rms {
            left: (sum_squares[0] / count).sqrt(),
            right: (sum_squares[1] / count).sqrt(),
        })
    }

    /// Scale each channel so its RMS approaches `target`.
    ///
    /// Mono uses only `target.0`. A silent channel has no meaningful gain
    /// and is copied unchanged.
    ///
    /// # Errors
    /// * `EmptyBuffer` - there are no frames to measure
    pub fn normalized(&self, target: (f64, f64)) -> Result<Self> {
        let current = self.rms().map_err(|_| SampError::EmptyBuffer {
            operation: "normalize",
        })?;
        let targets = [target.0, target.1];

        let mut factors = [1.0f64; 2];
        for (ch, factor) in factors.iter_mut().enumerate().take(F::CHANNELS) {
            let rms = current.channel(ch);
            if rms > 0.0 {
                *factor = targets[ch] / rms;
            } else {
                warn!("Channel {} is silent; leaving it unchanged", ch);
            }
        }
        debug!("Normalization factors: {:?}", &factors[..F::CHANNELS]);

        Ok(self.map_samples(|ch, s| s.scale(factors[ch])))
    }

    fn map_samples<G>(&self, mut f: G) -> Self
    where
        G: FnMut(usize, F::Sample) -> F::Sample,
    {
        let samples = self
            .samples
            .iter()
            .map(|frame| frame.map(&mut f))
            .collect();
        Self::from_samples(self.format, samples)
    }
}

impl<F: Frame> Add for &SampleBuffer<F> {
    type Output = SampleBuffer<F>;

    fn add(self, rhs: Self) -> SampleBuffer<F> {
        self.mix(rhs)
    }
}

impl<F: Frame> Add for SampleBuffer<F> {
    type Output = SampleBuffer<F>;

    fn add(self, rhs: Self) -> SampleBuffer<F> {
        self.mix(&rhs)
    }
}

impl<F: Frame> Mul<(f32, f32)> for &SampleBuffer<F> {
    type Output = SampleBuffer<F>;

    fn mul(self, factor: (f32, f32)) -> SampleBuffer<F> {
        self.scaled(factor)
    }
}

impl<F: Frame> Mul<(f32, f32)> for SampleBuffer<F> {
    type Output = SampleBuffer<F>;

    fn mul(self, factor: (f32, f32)) -> SampleBuffer<F> {
        self.scaled(factor)
    }
}
