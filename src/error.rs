//! Error types for document comparison.

use thiserror::Error;

/// Errors surfaced by package reading and extraction.
#[derive(Error, Debug)]
pub enum CompareError {
    /// Error reading the archive handle.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container is malformed.
    #[error("malformed archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A required part is absent from the package.
    #[error("missing required part: {0}")]
    MissingPart(String),

    /// A part exists but its XML cannot be parsed.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Result type for document comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;
