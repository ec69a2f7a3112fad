//! Raw PCM file I/O
//!
//! Files are headerless: frames back to back, channels in order within a
//! frame, no padding. The frame count is the file length divided by the
//! frame size; a trailing partial frame is dropped.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, warn};

use crate::engine::frame::Frame;
use crate::error::{Result, SampError};

/// Byte order of encoded samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    Little,
    Big,
    /// Whatever the host uses
    #[default]
    Native,
}

impl ByteOrder {
    /// Resolve `Native` to the concrete order of the host
    pub fn resolve(self) -> Self {
        match self {
            ByteOrder::Native if cfg!(target_endian = "big") => ByteOrder::Big,
            ByteOrder::Native => ByteOrder::Little,
            other => other,
        }
    }
}

/// Decode every complete frame in `bytes`
pub fn decode_frames<F: Frame>(bytes: &[u8], order: ByteOrder) -> Vec<F> {
    let chunks = bytes.chunks_exact(F::BYTES);
    let leftover = chunks.remainder().len();
    if leftover > 0 {
        warn!("Ignoring {} trailing bytes (partial frame)", leftover);
    }
    chunks.map(|chunk| F::decode(chunk, order)).collect()
}

/// Encode frames back to back
pub fn encode_frames<F: Frame>(frames: &[F], order: ByteOrder) -> Vec<u8> {
    let mut out = Vec::with_capacity(frames.len() * F::BYTES);
    for frame in frames {
        frame.encode(order, &mut out);
    }
    out
}

/// Read raw frames from a file
///
/// # Errors
/// * `FileOpen` - the file is missing or cannot be opened
/// * `Io` - the file opened but reading it failed
pub fn read_frames<F: Frame>(path: &Path, order: ByteOrder) -> Result<Vec<F>> {
    let mut file = File::open(path).map_err(|e| SampError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    let frames = decode_frames(&bytes, order);
    debug!(
        "Read {} bytes ({} frames) from {}",
        bytes.len(),
        frames.len(),
        path.display()
    );
    Ok(frames)
}

/// Write raw frames to a file, truncating any existing content
///
/// Frames are encoded before the destination is touched.
///
/// # Errors
/// * `FileCreate` - the destination cannot be created
/// * `Io` - the destination was created but writing to it failed
pub fn write_frames<F: Frame>(path: &Path, frames: &[F], order: ByteOrder) -> Result<()> {
    let bytes = encode_frames(frames, order);
    let mut file = File::create(path).map_err(|e| SampError::FileCreate {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(&bytes)?;
    file.flush()?;
    debug!(
        "Wrote {} bytes ({} frames) to {}",
        bytes.len(),
        frames.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame::{Mono, Stereo};
    use tempfile::tempdir;

    #[test]
    fn test_native_resolves() {
        let resolved = ByteOrder::Native.resolve();
        assert_ne!(resolved, ByteOrder::Native);
        assert_eq!(ByteOrder::Big.resolve(), ByteOrder::Big);
    }

    #[test]
    fn test_decode_drops_partial_frame() {
        let bytes = [1u8, 0, 2, 0, 3];
        let frames: Vec<Mono<i16>> = decode_frames(&bytes, ByteOrder::Little);
        assert_eq!(frames, vec![Mono(1), Mono(2)]);

        let stereo: Vec<Stereo<i16>> = decode_frames(&bytes, ByteOrder::Little);
        assert_eq!(stereo, vec![Stereo::new(1, 2)]);
    }

    #[test]
    fn test_encode_matches_decode_layout() {
        let frames = vec![Stereo::new(-1i8, 2i8), Stereo::new(3, -4)];
        let bytes = encode_frames(&frames, ByteOrder::Native);
        assert_eq!(bytes, vec![0xFF, 0x02, 0x03, 0xFC]);
        assert_eq!(decode_frames::<Stereo<i8>>(&bytes, ByteOrder::Native), frames);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.raw");
        let frames = vec![Mono(100i16), Mono(-100), Mono(i16::MAX), Mono(i16::MIN)];

        write_frames(&path, &frames, ByteOrder::Big).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 8);

        let back: Vec<Mono<i16>> = read_frames(&path, ByteOrder::Big).unwrap();
        assert_eq!(back, frames);
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let dir = tempdir().unwrap();
        let result = read_frames::<Mono<i8>>(&dir.path().join("missing.raw"), ByteOrder::Native);
        assert!(matches!(result, Err(SampError::FileOpen { .. })));
    }

    #[test]
    fn test_unwritable_destination_is_create_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.raw");
        let result = write_frames(&path, &[Mono(1i8)], ByteOrder::Native);
        assert!(matches!(result, Err(SampError::FileCreate { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_read_is_io_error() {
        // opening a directory succeeds on unix; reading it does not
        let dir = tempdir().unwrap();
        let result = read_frames::<Mono<i16>>(dir.path(), ByteOrder::Native);
        assert!(matches!(result, Err(SampError::Io(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_write_is_io_error() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let result = write_frames(full, &[Mono(1i8)], ByteOrder::Native);
        assert!(matches!(result, Err(SampError::Io(_))));
    }
}
