//! Content-type sniffing by leading signature bytes.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// MIME type reported for ZIP containers.
pub const ZIP_MIME: &str = "application/zip";

/// MIME type reported when no known signature matches.
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// Maps the first bytes of a file to a MIME-like string.
pub fn sniff_mime(header: &[u8]) -> &'static str {
    match header {
        // Local file header, empty archive, spanned archive
        [0x50, 0x4B, 0x03, 0x04, ..]
        | [0x50, 0x4B, 0x05, 0x06, ..]
        | [0x50, 0x4B, 0x07, 0x08, ..] => ZIP_MIME,
        [0x1F, 0x8B, ..] => "application/gzip",
        [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C, ..] => "application/x-7z-compressed",
        [0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, ..] => "application/x-rar",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'%', b'P', b'D', b'F', ..] => "application/pdf",
        [] => "application/x-empty",
        _ => OCTET_STREAM_MIME,
    }
}

/// Reads the leading bytes of `path` and sniffs its MIME type.
pub fn sniff_file(path: &Path) -> io::Result<&'static str> {
    let mut header = Vec::with_capacity(8);
    File::open(path)?.take(8).read_to_end(&mut header)?;
    Ok(sniff_mime(&header))
}

/// Type gate: whether the file content is a ZIP container.
pub fn is_zip_archive(path: &Path) -> io::Result<bool> {
    Ok(sniff_file(path)? == ZIP_MIME)
}
