//! Content type detection based on file extensions.

/// Fallback for unmapped or missing extensions.
pub const MIME_DEFAULT: &str = "application/octet-stream";

// Pre-computed mime map for simplicity and readability.
const MIME_MAP: [(&str, &str); 4] = [
    (".html", "text/html"),
    (".jpg", "image/jpeg"),
    (".css", "text/css"),
    (".js", "text/javascript"),
];

/// Maps a URI to the content type of its extension.
///
/// The extension is everything from the last `.` of the final path segment,
/// matched exactly and case-sensitively. A URI whose final segment has no
/// extension gets the default type.
pub fn mime_for(uri: &[u8]) -> &'static str {
    let last_dot = uri.iter().rposition(|&b| b == b'.');
    let last_slash = uri.iter().rposition(|&b| b == b'/');

    let ext = match (last_dot, last_slash) {
        (None, _) => return MIME_DEFAULT,
        (Some(dot), Some(slash)) if slash > dot => return MIME_DEFAULT,
        (Some(dot), _) => &uri[dot..],
    };

    MIME_MAP
        .iter()
        .find(|(suffix, _)| suffix.as_bytes() == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(MIME_DEFAULT)
}
