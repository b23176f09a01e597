//! Archive probing functionality for reading metadata without extraction.

use crate::error::ExtractError;
use crate::sniff::is_zip_archive;
use crate::types::{ArchiveInfo, ArchiveMember};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Probe an archive to retrieve metadata without extracting.
///
/// Reads the central directory to report the member list, sizes and whether
/// any member is encrypted.
///
/// # Errors
///
/// Returns an error if:
/// - The archive file doesn't exist
/// - The content is not a ZIP container
/// - The central directory cannot be read
pub fn probe_archive(path: &Path) -> Result<ArchiveInfo, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    if !is_zip_archive(path)? {
        return Err(ExtractError::NotAnArchive(path.to_path_buf()));
    }

    let compressed_bytes = std::fs::metadata(path)?.len();
    let mut archive = open_archive(path)?;
    let entry_list = list_members(&mut archive)?;

    let uncompressed_estimate = if !entry_list.is_empty() {
        Some(entry_list.iter().map(|m| m.size).sum())
    } else {
        None
    };

    Ok(ArchiveInfo {
        format: "ZIP".to_string(),
        entries: entry_list.len() as u64,
        compressed_bytes,
        uncompressed_estimate,
        encrypted: entry_list.iter().any(|m| m.encrypted),
        entry_list,
    })
}

/// Opens the central directory of a ZIP file.
pub(crate) fn open_archive(path: &Path) -> Result<ZipArchive<File>, ExtractError> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(file)?)
}

/// Enumerates members from the central directory, without decrypting them.
pub(crate) fn list_members<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<ArchiveMember>, ExtractError> {
    let mut members = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        members.push(ArchiveMember {
            path: entry.name().to_string(),
            is_directory: entry.is_dir(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            encrypted: entry.encrypted(),
        });
    }

    Ok(members)
}
