//! Read-only password verification.

use std::io::{self, Read, Seek};
use zip::ZipArchive;

/// Password gate: decodes every member into a sink so that decryption,
/// CRC32 and AES authentication are all exercised. Nothing touches the disk.
///
/// Without a password the check only succeeds for archives with no encrypted
/// members.
pub fn verify_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, password: Option<&str>) -> bool {
    for i in 0..archive.len() {
        if let Err(e) = verify_member(archive, i, password) {
            tracing::debug!(index = i, error = %e, "Member failed verification");
            return false;
        }
    }
    true
}

fn verify_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    password: Option<&str>,
) -> zip::result::ZipResult<()> {
    let encrypted = archive.by_index_raw(index)?.encrypted();

    let mut entry = match (encrypted, password) {
        (true, Some(password)) => archive.by_index_decrypt(index, password.as_bytes())?,
        _ => archive.by_index(index)?,
    };
    io::copy(&mut entry, &mut io::sink())?;
    Ok(())
}

