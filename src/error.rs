//! Error types.

use thiserror::Error;

/// A parameter file could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported parameter file version {0} (expected 100, 101 or 102)")]
    UnsupportedVersion(u32),

    #[error("parameter data truncated: needed {needed} bytes at offset {offset}, only {len} available")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },
}

/// Errors returned by file and export operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "wav")]
    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("export exceeded {limit} frames without the sound ending")]
    FrameLimit { limit: usize },

    #[error("unsupported WAV sample rate {0} Hz (expected 44100 or 22050)")]
    UnsupportedSampleRate(u32),

    #[error("unsupported WAV bit depth {0} (expected 16 or 8)")]
    UnsupportedBitDepth(u16),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
