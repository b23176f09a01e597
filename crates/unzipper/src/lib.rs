//! # Unzipper
//!
//! Validate and safely extract ZIP archives.
//!
//! Before anything is written, an archive must pass three gates in order:
//! its content has to be a ZIP container, it has to verify under the given
//! password (or need none), and it has to fit the configured size limit.
//! Members whose extension is not on the allow-list are then skipped, and
//! extracted members can optionally be recompressed as images.
//!
//! ## Example
//!
//! ```rust,no_run
//! use unzipper::{Unzipper, UnzipOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = UnzipOptions {
//!     allowed_extensions: ["jpg", "png"].map(String::from).into(),
//!     max_size: Some("10 MB".to_string()),
//!     ..Default::default()
//! };
//! let extractor = Unzipper::new(options)?;
//!
//! extractor.unzip(Path::new("photos.zip"), Path::new("output"), None)?;
//!
//! let info = unzipper::probe(Path::new("photos.zip"))?;
//! println!("Format: {}, Entries: {}", info.format, info.entries);
//! # Ok(())
//! # }
//! ```

pub mod compress;
pub mod error;
pub mod extract;
pub mod filter;
pub mod password;
pub mod probe;
pub mod safety;
pub mod size;
pub mod sniff;
pub mod types;

// Re-export main types
pub use error::{ExtractError, SecurityError};
pub use extract::Unzipper;
pub use size::{HumanSize, SizeLimit, SizeUnit};
pub use types::{ArchiveInfo, ArchiveMember, ExclusionSet, MemberCheck, UnzipOptions};

use std::path::Path;

/// Probe an archive to retrieve metadata without extracting.
///
/// # Errors
///
/// Returns an error if:
/// - The archive file doesn't exist
/// - The content is not a ZIP container
/// - The archive cannot be read
pub fn probe(path: &Path) -> Result<ArchiveInfo, ExtractError> {
    probe::probe_archive(path)
}
