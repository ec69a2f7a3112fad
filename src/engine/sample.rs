//! Fixed-width sample types
//!
//! A [`Sample`] is one channel value of one frame: a signed 8-bit or
//! 16-bit integer. All arithmetic that can leave the type's range goes
//! through the saturating helpers here, so no transform ever wraps.

use std::fmt;

use num_traits::{PrimInt, Signed};

use crate::engine::format::BitDepth;
use crate::engine::io::ByteOrder;

/// A signed fixed-width integer sample.
///
/// Implemented for `i8` (8-bit PCM) and `i16` (16-bit PCM).
pub trait Sample:
    PrimInt + Signed + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Encoded size of one sample in bytes
    const BYTES: usize;

    /// Bit depth this sample type represents
    const DEPTH: BitDepth;

    /// Widen losslessly to `i32`.
    fn widen(self) -> i32;

    /// Narrow from `i32`, clamping to `[MIN, MAX]` first.
    fn from_wide(value: i32) -> Self;

    /// Convert losslessly to `f64`.
    fn as_f64(self) -> f64;

    /// Narrow from `f64`, clamping to `[MIN, MAX]` and truncating toward zero.
    ///
    /// NaN narrows to zero.
    fn from_f64_saturating(value: f64) -> Self;

    /// Decode one sample from the first [`Self::BYTES`] bytes of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than [`Self::BYTES`].
    fn decode(bytes: &[u8], order: ByteOrder) -> Self;

    /// Append the encoded sample to `out`.
    fn encode(self, order: ByteOrder, out: &mut Vec<u8>);

    /// Add two samples, saturating at the type bounds.
    #[inline]
    fn saturating_sum(self, other: Self) -> Self {
        Self::from_wide(self.widen() + other.widen())
    }

    /// Multiply by a gain factor, saturating at the type bounds.
    #[inline]
    fn scale(self, factor: f64) -> Self {
        Self::from_f64_saturating(self.as_f64() * factor)
    }
}

macro_rules! impl_sample {
    ($t:ty, $depth:expr) => {
        impl Sample for $t {
            const BYTES: usize = std::mem::size_of::<$t>();
            const DEPTH: BitDepth = $depth;

            #[inline]
            fn widen(self) -> i32 {
                i32::from(self)
            }

            #[inline]
            fn from_wide(value: i32) -> Self {
                value.clamp(i32::from(<$t>::MIN), i32::from(<$t>::MAX)) as $t
            }

            #[inline]
            fn as_f64(self) -> f64 {
                f64::from(self)
            }

            #[inline]
            fn from_f64_saturating(value: f64) -> Self {
                // float-to-int `as` truncates toward zero and maps NaN to 0
                value.clamp(f64::from(<$t>::MIN), f64::from(<$t>::MAX)) as $t
            }

            #[inline]
            fn decode(bytes: &[u8], order: ByteOrder) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(&bytes[..Self::BYTES]);
                match order {
                    ByteOrder::Little => <$t>::from_le_bytes(raw),
                    ByteOrder::Big => <$t>::from_be_bytes(raw),
                    ByteOrder::Native => <$t>::from_ne_bytes(raw),
                }
            }

            #[inline]
            fn encode(self, order: ByteOrder, out: &mut Vec<u8>) {
                let raw = match order {
                    ByteOrder::Little => self.to_le_bytes(),
                    ByteOrder::Big => self.to_be_bytes(),
                    ByteOrder::Native => self.to_ne_bytes(),
                };
                out.extend_from_slice(&raw);
            }
        }
    };
}

impl_sample!(i8, BitDepth::Eight);
impl_sample!(i16, BitDepth::Sixteen);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_sum_clamps() {
        assert_eq!(32767i16.saturating_sum(5), i16::MAX);
        assert_eq!((-32768i16).saturating_sum(-1), i16::MIN);
        assert_eq!(100i8.saturating_sum(100), i8::MAX);
        assert_eq!((-100i8).saturating_sum(-100), i8::MIN);
        assert_eq!(3i16.saturating_sum(-5), -2);
    }

    #[test]
    fn test_scale_truncates_toward_zero() {
        let input: [i16; 8] = [-1, 1, 2, -2, 3, -3, 10, -10];
        let scaled: Vec<i16> = input.iter().map(|s| s.scale(0.5)).collect();
        assert_eq!(scaled, vec![0, 0, 1, -1, 1, -1, 5, -5]);
    }

    #[test]
    fn test_scale_clamps_before_narrowing() {
        assert_eq!(20000i16.scale(2.0), i16::MAX);
        assert_eq!((-20000i16).scale(2.0), i16::MIN);
        assert_eq!(100i8.scale(1.5), i8::MAX);
        assert_eq!(5i8.scale(f64::NAN), 0);
    }

    #[test]
    fn test_decode_respects_byte_order() {
        let bytes = [0x01, 0x02];
        assert_eq!(i16::decode(&bytes, ByteOrder::Little), 0x0201);
        assert_eq!(i16::decode(&bytes, ByteOrder::Big), 0x0102);
        assert_eq!(i8::decode(&[0xFF], ByteOrder::Native), -1);
    }

    #[test]
    fn test_encode_appends_bytes() {
        let mut out = Vec::new();
        (-2i16).encode(ByteOrder::Little, &mut out);
        0x0102i16.encode(ByteOrder::Big, &mut out);
        assert_eq!(out, vec![0xFE, 0xFF, 0x01, 0x02]);
    }

    #[test]
    fn test_depth_constants() {
        assert_eq!(<i8 as Sample>::BYTES, 1);
        assert_eq!(<i16 as Sample>::BYTES, 2);
        assert_eq!(<i8 as Sample>::DEPTH, BitDepth::Eight);
        assert_eq!(<i16 as Sample>::DEPTH, BitDepth::Sixteen);
    }
}
