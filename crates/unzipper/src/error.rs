//! Error types for archive validation and extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for unzip operations.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Archive file not found at the specified path.
    #[error("Archive not found: {0}")]
    NotFound(PathBuf),

    /// The file content does not carry a ZIP signature.
    #[error("The provided file is not a zip file: {0}")]
    NotAnArchive(PathBuf),

    /// The archive is protected and no password, or a wrong one, was given.
    #[error("The zip file is either password protected or the provided password is invalid")]
    PasswordInvalidOrRequired,

    /// The archive is larger than the configured size limit.
    #[error("The size of the zip file ({size}) is larger than the allowed file size ({limit})")]
    FileTooLarge {
        /// Human-readable archive size
        size: String,
        /// Configured limit
        limit: String,
    },

    /// The configured size limit could not be parsed.
    #[error("The file size limit {0:?} is not properly formatted. Try set it as '1 KB'")]
    SizeLimitFormat(String),

    /// An extracted member selected for compression is not a decodable image.
    #[error("The file to be compressed is not an image: {}", path.display())]
    NotAnImage {
        /// Location of the extracted member
        path: PathBuf,
        /// Decoder failure
        #[source]
        source: image::ImageError,
    },

    /// Options rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A member path would escape the destination directory.
    #[error("Security violation: {0}")]
    Security(#[from] SecurityError),

    /// The ZIP decoder failed after the validation gates passed.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An I/O error occurred during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Security-related errors during extraction.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Path traversal attempt detected (e.g., "../../../etc/passwd").
    #[error("Path traversal attempt: {0}")]
    PathTraversal(String),

    /// Absolute path not allowed in archive members.
    #[error("Absolute path not allowed: {0}")]
    AbsolutePath(String),
}
