use std::ffi::OsString;
use std::fs::File;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

use crate::http::parser::{HTTP_10, HTTP_11, METHOD_PREFIX};

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Extracts the URI from a received request head.
///
/// The head must start with `GET /`, contain a CRLF, and carry one of the
/// two supported version tokens exactly at the first space after the URI,
/// starting before that first CRLF. The returned slice spans from the
/// opening slash (inclusive) to the space preceding the version token.
///
/// Misformed headers after a well-formed request-line are allowed through.
pub fn extract_uri(head: &[u8]) -> Option<&[u8]> {
    if !head.starts_with(METHOD_PREFIX) {
        return None;
    }
    let first_crlf = find(head, b"\r\n")?;

    // The URI begins at the slash, one byte before the end of the prefix.
    let uri_start = METHOD_PREFIX.len() - 1;
    let tail = &head[uri_start..];
    let next_space = tail.iter().position(|&b| b == b' ');

    // A version token only counts if it sits at the first space after the
    // URI and begins inside the first line.
    let version_at = |token: &[u8]| {
        let at = find(tail, token)?;
        (next_space == Some(at) && uri_start + at < first_crlf).then_some(at)
    };
    let space = version_at(HTTP_10).or_else(|| version_at(HTTP_11))?;

    Some(&head[uri_start..uri_start + space])
}

/// True if the URI tries to traverse upwards out of the web root: a `/..`
/// suffix or a `/../` anywhere. A leading `..` cannot occur since an
/// abs_path always begins with `/`.
///
/// The check is purely textual. `.` segments, doubled slashes,
/// percent-encoding and symlinks are not normalized.
pub fn has_path_escape(uri: &[u8]) -> bool {
    uri.ends_with(b"/..") || find(uri, b"/../").is_some()
}

/// Joins the web root and the URI by plain concatenation. `Path::join`
/// would replace the root with the absolute URI, so the bytes are appended
/// directly.
pub fn resolve_path(root: &Path, uri: &[u8]) -> PathBuf {
    let mut full = root.as_os_str().as_bytes().to_vec();
    full.extend_from_slice(uri);
    PathBuf::from(OsString::from_vec(full))
}

/// Opens `path` read-only if it names a regular file, returning the handle
/// and its size captured at open time. Directories, FIFOs and missing
/// paths all yield `None`.
pub fn open_regular_file(path: &Path) -> Option<(File, u64)> {
    let file = File::open(path).ok()?;
    let meta = file.metadata().ok()?;
    meta.is_file().then_some((file, meta.len()))
}
