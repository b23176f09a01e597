//! Member path checks for extraction.
//!
//! Member names are normalized before being joined to the destination so that
//! no extracted file lands outside it (zip-slip).

use crate::error::SecurityError;
use std::path::{Component, Path, PathBuf};

/// Validates and normalizes an archive member path.
///
/// Rejects absolute paths and `..` components, drops `.` components and
/// redundant separators.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unzipper::safety::validate_member_path;
///
/// let safe_path = validate_member_path("dir/file.txt").unwrap();
/// assert_eq!(safe_path, Path::new("dir/file.txt"));
///
/// assert!(validate_member_path("../../etc/passwd").is_err());
/// assert!(validate_member_path("/etc/passwd").is_err());
/// ```
pub fn validate_member_path(name: &str) -> Result<PathBuf, SecurityError> {
    // Some archivers store Windows separators
    let unified = name.replace('\\', "/");
    let path = Path::new(&unified);

    if path.is_absolute() || unified.starts_with('/') {
        return Err(SecurityError::AbsolutePath(name.to_string()));
    }

    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => continue,
            Component::ParentDir => {
                return Err(SecurityError::PathTraversal(format!(
                    "Path contains '..' component: {}",
                    name
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(SecurityError::AbsolutePath(name.to_string()));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(SecurityError::PathTraversal(format!(
            "Path normalizes to empty: {:?}",
            name
        )));
    }

    Ok(normalized)
}

/// Joins a validated member path onto the destination directory.
pub fn resolve_member_path(destination: &Path, name: &str) -> Result<PathBuf, SecurityError> {
    Ok(destination.join(validate_member_path(name)?))
}
