use std::path::PathBuf;

use crate::foundation::types::FrameSize;

/// Convenience result type used across the engine.
pub type SlitscanResult<T> = Result<T, SlitscanError>;

/// Top-level error taxonomy for the remap pipeline.
///
/// Every variant here is fatal and aborts the run. Memory-budget
/// downgrades are deliberately not errors; see [`Downgrade`](crate::Downgrade).
#[derive(thiserror::Error, Debug)]
pub enum SlitscanError {
    /// The input directory could not be enumerated.
    #[error("cannot read directory '{path}'")]
    DirectoryUnreadable {
        /// Directory that failed to enumerate.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file name pattern is not a valid glob.
    #[error("invalid name pattern '{pattern}'")]
    InvalidPattern {
        /// Pattern as given by the caller.
        pattern: String,
        /// Underlying glob parse error.
        #[source]
        source: glob::PatternError,
    },

    /// A frame's image header could not be read during preflight.
    #[error("frame {index}: cannot read image header of '{path}'")]
    Probe {
        /// 0-based frame index.
        index: usize,
        /// Offending file.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// A frame reports a zero width or height.
    #[error("frame {index}: invalid frame size {size}")]
    InvalidFrameSize {
        /// 0-based frame index.
        index: usize,
        /// Reported size.
        size: FrameSize,
    },

    /// A frame's size disagrees with the reference size of the sequence.
    #[error("all frames must be of equal size\nframe {index}: {actual} is not {expected}")]
    DimensionMismatch {
        /// 0-based index of the disagreeing frame.
        index: usize,
        /// Size the frame reported.
        actual: FrameSize,
        /// Size established by the preceding frames.
        expected: FrameSize,
    },

    /// No reference size could be established (empty input set).
    #[error("no reference frame size could be established")]
    InvalidFinalSize,

    /// A frame's pixel data could not be decoded at remap time.
    #[error("frame {index}: cannot decode '{path}'")]
    Decode {
        /// 0-based frame index.
        index: usize,
        /// Offending file.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// An output frame failed to encode.
    #[error("cannot encode output frame {index}")]
    Encode {
        /// Output column index of the frame being encoded.
        index: u32,
        /// Underlying encode error.
        #[source]
        source: image::ImageError,
    },

    /// An encoded output frame failed to persist.
    #[error("cannot write output frame '{path}'")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
