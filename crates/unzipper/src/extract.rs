//! The validation-and-extraction pipeline.
//!
//! Gates run in a fixed order and stop at the first failure:
//!
//! 1. content is a ZIP container ([`ExtractError::NotAnArchive`])
//! 2. the archive verifies under the given password
//!    ([`ExtractError::PasswordInvalidOrRequired`])
//! 3. the archive fits the size limit ([`ExtractError::FileTooLarge`])
//!
//! Only then are members filtered and extracted. An image recompression
//! failure aborts the loop but leaves already extracted files in place.

use crate::compress::recompress_image;
use crate::error::ExtractError;
use crate::filter::check_members;
use crate::password::verify_archive;
use crate::probe::{list_members, open_archive};
use crate::safety::resolve_member_path;
use crate::size::{size_check, HumanSize, SizeLimit};
use crate::sniff::is_zip_archive;
use crate::types::{MemberCheck, UnzipOptions};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

/// Validates and extracts ZIP archives under a fixed configuration.
#[derive(Debug, Clone)]
pub struct Unzipper {
    allowed_extensions: BTreeSet<String>,
    image_compress: bool,
    image_quality: u8,
    size_unit_base: u64,
    delete_source_on_success: bool,
    max_size: Option<SizeLimit>,
}

impl Unzipper {
    /// Builds an extractor, rejecting bad options up front.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::SizeLimitFormat`] if `max_size` is not `"<number> <unit>"`
    /// - [`ExtractError::InvalidConfig`] if the quality is outside 1 to 100 or
    ///   the size unit base is below 2
    pub fn new(options: UnzipOptions) -> Result<Self, ExtractError> {
        if !(1..=100).contains(&options.image_quality) {
            return Err(ExtractError::InvalidConfig(format!(
                "image quality must be between 1 and 100, got {}",
                options.image_quality
            )));
        }
        if options.size_unit_base < 2 {
            return Err(ExtractError::InvalidConfig(format!(
                "size unit base must be at least 2, got {}",
                options.size_unit_base
            )));
        }

        let max_size = options
            .max_size
            .as_deref()
            .map(str::parse::<SizeLimit>)
            .transpose()?;

        Ok(Self {
            allowed_extensions: options.allowed_extensions,
            image_compress: options.image_compress,
            image_quality: options.image_quality,
            size_unit_base: options.size_unit_base,
            delete_source_on_success: options.delete_source_on_success,
            max_size,
        })
    }

    /// The parsed size limit, if any.
    pub fn max_size(&self) -> Option<&SizeLimit> {
        self.max_size.as_ref()
    }

    /// Validates `archive_path` and extracts its permitted members into
    /// `destination`, preserving relative paths.
    ///
    /// The password, when given, is used both for the verification gate and
    /// for decrypting members.
    ///
    /// # Errors
    ///
    /// Returns the first failing gate's error without touching `destination`.
    /// [`ExtractError::NotAnImage`] during recompression leaves earlier members
    /// on disk.
    pub fn unzip(
        &self,
        archive_path: &Path,
        destination: &Path,
        password: Option<&str>,
    ) -> Result<(), ExtractError> {
        tracing::info!(
            archive = %archive_path.display(),
            destination = %destination.display(),
            "Unzipping archive"
        );

        if !archive_path.exists() {
            return Err(ExtractError::NotFound(archive_path.to_path_buf()));
        }

        if !self.zip_file_check(archive_path)? {
            tracing::warn!(archive = %archive_path.display(), "Not a zip file");
            return Err(ExtractError::NotAnArchive(archive_path.to_path_buf()));
        }

        // One handle for the remaining gates and the extraction loop
        let mut archive = open_archive(archive_path)?;

        if !verify_archive(&mut archive, password) {
            tracing::warn!(archive = %archive_path.display(), "Password check failed");
            return Err(ExtractError::PasswordInvalidOrRequired);
        }

        let file_size = fs::metadata(archive_path)?.len();
        if !self.size_check(file_size) {
            let size = HumanSize::from_bytes(file_size, self.size_unit_base);
            tracing::warn!(%size, "Archive exceeds size limit");
            return Err(ExtractError::FileTooLarge {
                size: size.to_string(),
                limit: self
                    .max_size
                    .map(|limit| limit.to_string())
                    .unwrap_or_default(),
            });
        }
        tracing::debug!("Validation gates passed");

        let check = self.check_archive_members(&mut archive)?;
        if !check.all_allowed {
            tracing::info!(
                excluded = check.excluded.len(),
                "Skipping members with disallowed extensions"
            );
        }

        self.extract_members(&mut archive, destination, password, &check)?;
        drop(archive);

        if self.delete_source_on_success && archive_path.is_file() {
            fs::remove_file(archive_path)?;
            tracing::debug!(archive = %archive_path.display(), "Deleted source archive");
        }

        tracing::info!(archive = %archive_path.display(), "Unzip complete");
        Ok(())
    }

    /// Type gate: whether the file content is a ZIP container.
    pub fn zip_file_check(&self, path: &Path) -> Result<bool, ExtractError> {
        Ok(is_zip_archive(path)?)
    }

    /// Password gate: whether every member decodes under `password`.
    pub fn password_protect_check(
        &self,
        path: &Path,
        password: Option<&str>,
    ) -> Result<bool, ExtractError> {
        let mut archive = open_archive(path)?;
        Ok(verify_archive(&mut archive, password))
    }

    /// Size gate against the configured limit. Pure.
    pub fn size_check(&self, file_size: u64) -> bool {
        size_check(file_size, self.max_size.as_ref(), self.size_unit_base)
    }

    /// Member filter for the archive at `path`.
    ///
    /// An empty allow-list returns without opening the archive.
    pub fn file_list_check(&self, path: &Path) -> Result<MemberCheck, ExtractError> {
        if self.allowed_extensions.is_empty() {
            return Ok(MemberCheck::all_permitted());
        }
        let mut archive = open_archive(path)?;
        self.check_archive_members(&mut archive)
    }

    fn check_archive_members(
        &self,
        archive: &mut ZipArchive<File>,
    ) -> Result<MemberCheck, ExtractError> {
        if self.allowed_extensions.is_empty() {
            return Ok(MemberCheck::all_permitted());
        }
        let members = list_members(archive)?;
        Ok(check_members(&members, &self.allowed_extensions))
    }

    fn extract_members(
        &self,
        archive: &mut ZipArchive<File>,
        destination: &Path,
        password: Option<&str>,
        check: &MemberCheck,
    ) -> Result<(), ExtractError> {
        fs::create_dir_all(destination)?;

        for i in 0..archive.len() {
            let (name, encrypted) = {
                let raw = archive.by_index_raw(i)?;
                (raw.name().to_string(), raw.encrypted())
            };

            if check.excluded.contains(&name) {
                tracing::debug!(member = %name, "Skipping excluded member");
                continue;
            }

            let output_path = resolve_member_path(destination, &name).inspect_err(|e| {
                tracing::warn!(member = %name, error = %e, "Unsafe member path");
            })?;

            let mut entry = match (encrypted, password) {
                (true, Some(password)) => archive.by_index_decrypt(i, password.as_bytes())?,
                _ => archive.by_index(i)?,
            };

            if entry.is_dir() {
                fs::create_dir_all(&output_path)?;
                continue;
            }

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut outfile = File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile)?;
            drop(outfile);

            tracing::debug!(member = %name, bytes = entry.size(), "Extracted member");

            if self.image_compress {
                recompress_image(&output_path, self.image_quality)?;
            }
        }

        Ok(())
    }
}
