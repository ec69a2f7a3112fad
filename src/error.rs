//! Error handling for samp
//!
//! Every failure surfaces as a typed `SampError`; only the binary turns
//! them into exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::format::AudioFormat;

/// Result type alias for samp operations
pub type Result<T> = std::result::Result<T, SampError>;

/// Main error type for samp operations
#[derive(Error, Debug)]
pub enum SampError {
    // File Errors
    #[error("Cannot open file for reading: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open file for writing: {path}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Format Errors
    #[error("Format mismatch: {left} vs {right}")]
    FormatMismatch { left: AudioFormat, right: AudioFormat },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    // Value Errors
    #[error("Invalid sample range ({start}, {end}) for {len} samples: {reason}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
        reason: String,
    },

    #[error("Cannot {operation} an empty buffer")]
    EmptyBuffer { operation: &'static str },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SampError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SampError::FileOpen { .. } => "FILE_OPEN",
            SampError::FileCreate { .. } => "FILE_CREATE",
            SampError::FormatMismatch { .. } => "FORMAT_MISMATCH",
            SampError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            SampError::InvalidRange { .. } => "INVALID_RANGE",
            SampError::EmptyBuffer { .. } => "EMPTY_BUFFER",
            SampError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            SampError::Io(_) => "IO_ERROR",
            SampError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            SampError::FileOpen { .. } => vec![
                "Check the file path is correct",
                "Verify the file is readable by the current user",
            ],
            SampError::FileCreate { .. } => vec![
                "Check the output directory exists",
                "Verify the output location is writable",
            ],
            SampError::FormatMismatch { .. } => vec![
                "Both inputs must share sample rate, bit depth and channel count",
            ],
            SampError::UnsupportedFormat { .. } => vec![
                "Bit depth must be 8 or 16",
                "Channel count must be 1 (mono) or 2 (stereo)",
            ],
            SampError::InvalidRange { .. } => vec![
                "Ranges are 1-based and inclusive: the first sample is 1",
                "The range end must not exceed the number of samples",
            ],
            SampError::EmptyBuffer { .. } => vec!["The input file contains no complete frames"],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SampError::EmptyBuffer { operation: "measure" };
        assert_eq!(err.error_code(), "EMPTY_BUFFER");
        assert_eq!(err.to_string(), "Cannot measure an empty buffer");
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = SampError::InvalidRange {
            start: 0,
            end: 3,
            len: 8,
            reason: "start must be at least 1".to_string(),
        };
        assert!(!err.recovery_suggestions().is_empty());
        assert!(err.to_string().contains("(0, 3)"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: SampError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.recovery_suggestions().is_empty());
    }
}
