//! Frame types
//!
//! A frame is one temporal position in a buffer: a single sample for mono,
//! a left/right pair for stereo. Every transform in
//! [`SampleBuffer`](crate::engine::buffer::SampleBuffer) is written once
//! against [`Frame`] and works for both arities.

use std::fmt;

use crate::engine::format::ChannelLayout;
use crate::engine::io::ByteOrder;
use crate::engine::sample::Sample;

/// One frame of fixed-width samples.
pub trait Frame: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The per-channel sample type
    type Sample: Sample;

    /// Channel layout of this frame
    const LAYOUT: ChannelLayout;

    /// Number of channels in the frame
    const CHANNELS: usize;

    /// Encoded size of one frame in bytes
    const BYTES: usize = Self::CHANNELS * <Self::Sample as Sample>::BYTES;

    /// Build a frame by computing each channel from its index.
    fn from_fn<G>(f: G) -> Self
    where
        G: FnMut(usize) -> Self::Sample;

    /// Sample at `channel` (0 = mono/left, 1 = right).
    fn channel(&self, channel: usize) -> Self::Sample;

    /// Apply `f` to every channel, passing the channel index.
    #[inline]
    fn map<G>(self, mut f: G) -> Self
    where
        G: FnMut(usize, Self::Sample) -> Self::Sample,
    {
        Self::from_fn(|ch| f(ch, self.channel(ch)))
    }

    /// Combine two frames channel by channel.
    #[inline]
    fn zip_with<G>(self, other: Self, mut f: G) -> Self
    where
        G: FnMut(Self::Sample, Self::Sample) -> Self::Sample,
    {
        Self::from_fn(|ch| f(self.channel(ch), other.channel(ch)))
    }

    /// Decode a frame from the first [`Self::BYTES`] bytes of `bytes`,
    /// channels in order with no padding.
    #[inline]
    fn decode(bytes: &[u8], order: ByteOrder) -> Self {
        let width = <Self::Sample as Sample>::BYTES;
        Self::from_fn(|ch| {
            <Self::Sample as Sample>::decode(&bytes[ch * width..(ch + 1) * width], order)
        })
    }

    /// Append the encoded frame to `out`, channels in order.
    #[inline]
    fn encode(&self, order: ByteOrder, out: &mut Vec<u8>) {
        for ch in 0..Self::CHANNELS {
            self.channel(ch).encode(order, out);
        }
    }
}

/// A single-channel frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mono<S>(pub S);

impl<S: Sample> Frame for Mono<S> {
    type Sample = S;
    const LAYOUT: ChannelLayout = ChannelLayout::Mono;
    const CHANNELS: usize = 1;

    #[inline]
    fn from_fn<G>(mut f: G) -> Self
    where
        G: FnMut(usize) -> S,
    {
        Mono(f(0))
    }

    #[inline]
    fn channel(&self, channel: usize) -> S {
        debug_assert_eq!(channel, 0, "mono frame has a single channel");
        self.0
    }
}

impl<S> From<S> for Mono<S> {
    fn from(sample: S) -> Self {
        Mono(sample)
    }
}

/// A left/right frame.
///
/// Temporal operations (reverse, cut, concatenate) move whole frames, so
/// the pairing never changes; per-channel operations touch each side
/// independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stereo<S> {
    pub left: S,
    pub right: S,
}

impl<S> Stereo<S> {
    pub fn new(left: S, right: S) -> Self {
        Self { left, right }
    }
}

impl<S: Sample> Frame for Stereo<S> {
    type Sample = S;
    const LAYOUT: ChannelLayout = ChannelLayout::Stereo;
    const CHANNELS: usize = 2;

    #[inline]
    fn from_fn<G>(mut f: G) -> Self
    where
        G: FnMut(usize) -> S,
    {
        let left = f(0);
        let right = f(1);
        Self { left, right }
    }

    #[inline]
    fn channel(&self, channel: usize) -> S {
        debug_assert!(channel < 2, "stereo frame has two channels");
        if channel == 0 {
            self.left
        } else {
            self.right
        }
    }
}

impl<S> From<(S, S)> for Stereo<S> {
    fn from((left, right): (S, S)) -> Self {
        Self { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_sizes() {
        assert_eq!(<Mono<i8> as Frame>::BYTES, 1);
        assert_eq!(<Mono<i16> as Frame>::BYTES, 2);
        assert_eq!(<Stereo<i8> as Frame>::BYTES, 2);
        assert_eq!(<Stereo<i16> as Frame>::BYTES, 4);
    }

    #[test]
    fn test_map_passes_channel_index() {
        let frame = Stereo::new(10i16, 20i16);
        let mapped = frame.map(|ch, s| if ch == 0 { s * 2 } else { -s });
        assert_eq!(mapped, Stereo::new(20, -20));

        let mono = Mono(7i8).map(|ch, s| s + ch as i8);
        assert_eq!(mono, Mono(7));
    }

    #[test]
    fn test_zip_with_is_channelwise() {
        let a = Stereo::new(1i16, 2i16);
        let b = Stereo::new(10i16, 20i16);
        assert_eq!(a.zip_with(b, |x, y| x + y), Stereo::new(11, 22));
    }

    #[test]
    fn test_stereo_decode_left_then_right() {
        let bytes = [0x01, 0x00, 0xFF, 0xFF];
        let frame = Stereo::<i16>::decode(&bytes, ByteOrder::Little);
        assert_eq!(frame, Stereo::new(1, -1));

        let mut out = Vec::new();
        frame.encode(ByteOrder::Little, &mut out);
        assert_eq!(out, bytes.to_vec());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Mono::from(3i16), Mono(3));
        assert_eq!(Stereo::from((1i8, 2i8)), Stereo::new(1, 2));
    }
}
