//! Error types for mesh file I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing mesh files.
#[derive(Debug, Error)]
pub enum IoError {
    /// The file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The binary header is shorter than the format requires.
    #[error("Invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Bytes the format requires.
        expected: usize,
        /// Bytes actually present.
        got: usize,
    },

    /// The file ended before the declared number of triangles.
    #[error("Invalid STL face count: header declares {expected} triangles, read {got}")]
    InvalidFaceCount {
        /// Triangle count from the header.
        expected: u32,
        /// Triangles actually read.
        got: u32,
    },

    /// The file content is not valid for the format.
    #[error("Invalid file content: {0}")]
    InvalidContent(String),

    /// A numeric field failed to parse.
    #[error("Failed to parse number: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl IoError {
    /// Build an [`IoError::InvalidContent`] from anything printable.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent(message.into())
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = std::result::Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = IoError::InvalidFaceCount {
            expected: 100,
            got: 42,
        };
        let text = format!("{err}");
        assert!(text.contains("100"));
        assert!(text.contains("42"));

        let err = IoError::invalid_content("truncated record");
        assert!(format!("{err}").contains("truncated record"));
    }
}
