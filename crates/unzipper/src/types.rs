//! Type definitions for archive validation and extraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Member names excluded from extraction by the extension allow-list.
pub type ExclusionSet = BTreeSet<String>;

/// Individual member within an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMember {
    /// Path of the member as stored in the archive
    pub path: String,

    /// Whether this member is a directory
    pub is_directory: bool,

    /// Uncompressed size in bytes
    pub size: u64,

    /// Compressed size in bytes
    pub compressed_size: u64,

    /// Whether the member is encrypted
    pub encrypted: bool,
}

/// Metadata information about an archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveInfo {
    /// Archive format, always "ZIP"
    pub format: String,

    /// Number of members in the archive
    pub entries: u64,

    /// Size of the archive file in bytes
    pub compressed_bytes: u64,

    /// Sum of the uncompressed member sizes (if the archive is not empty)
    pub uncompressed_estimate: Option<u64>,

    /// Whether any member is password-protected
    pub encrypted: bool,

    /// List of all members in the archive
    pub entry_list: Vec<ArchiveMember>,
}

/// Options accepted once when building an [`Unzipper`](crate::Unzipper).
///
/// Every instance owns its own allow-list; the default is a fresh empty set,
/// which permits every member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnzipOptions {
    /// Member extensions that may be extracted, e.g. `["docx", "jpeg"]`
    pub allowed_extensions: BTreeSet<String>,

    /// Recompress every extracted member as an image
    pub image_compress: bool,

    /// Recompression quality, 1 to 100
    pub image_quality: u8,

    /// Divisor used to step from B to KB, KB to MB and so on
    pub size_unit_base: u64,

    /// Remove the archive once its members have been extracted
    pub delete_source_on_success: bool,

    /// Maximum archive size written as "<number> <unit>", e.g. "1 MB"
    pub max_size: Option<String>,
}

impl Default for UnzipOptions {
    fn default() -> Self {
        Self {
            allowed_extensions: BTreeSet::new(),
            image_compress: false,
            image_quality: 50,
            size_unit_base: 1024,
            delete_source_on_success: false,
            max_size: None,
        }
    }
}

/// Outcome of checking archive members against the extension allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberCheck {
    /// Whether every member passed the allow-list
    pub all_allowed: bool,

    /// Members whose extension is not allowed
    pub excluded: ExclusionSet,
}

impl MemberCheck {
    /// Result for an unrestricted allow-list.
    pub fn all_permitted() -> Self {
        Self {
            all_allowed: true,
            excluded: ExclusionSet::new(),
        }
    }
}
