//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
///
/// The STL-specific variants keep the exact message text the decoder has
/// always reported; tooling downstream matches on it.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// The stream is too short to carry even an STL format marker.
    #[error("STL file has invalid header.")]
    InvalidStlHeader,

    /// An ASCII solid ended before any `facet` keyword was found.
    #[error("STL file is missing face data.")]
    MissingFaceData,

    /// The binary face count could not be read at offset 80.
    #[error("Binary STL file has invalid header.")]
    InvalidBinaryHeader,

    /// A binary facet record was cut short.
    #[error("Incomplete STL facet description.")]
    IncompleteFacet,

    /// An ASCII facet block had missing or mismatched keywords.
    #[error("Invalid STL facet description.")]
    InvalidFacet,

    /// A facet coordinate token did not parse as a float.
    #[error("Invalid float in STL facet description.")]
    InvalidFloat,

    /// A facet whose every vertex component is NaN or infinite cannot be
    /// repaired, as sanitization has no finite vertex to copy from.
    #[error("Every vertex in a triangle is NaN.")]
    AllVerticesNonFinite,

    /// The mesh offers no position values to encode.
    #[error("mesh has no position attribute values")]
    MissingPositionAttribute,

    /// More faces than the 4-byte binary STL count can declare.
    #[error("face count exceeds the binary STL limit")]
    FaceCountOverflow,

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
