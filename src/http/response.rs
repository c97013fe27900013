use std::fs::File;
use std::path::Path;

use bytes::Bytes;

use crate::http::{mime, uri};

pub const HEADER_400: &[u8] = b"HTTP/1.0 400 Bad Request\r\nContent-Length: 0\r\n\r\n";
pub const HEADER_404: &[u8] = b"HTTP/1.0 404 Not Found\r\nContent-Length: 0\r\n\r\n";

/// A complete response ready to be sent to a client, one variant per
/// status. Immutable once built; dropping it closes the file handle on
/// every exit path.
///
/// The status line always reports `HTTP/1.0`, regardless of the version the
/// request negotiated.
#[derive(Debug)]
pub enum Response {
    /// 400, header only.
    BadRequest,
    /// 404, header only.
    NotFound,
    /// 200 with the open file as body. `size` is captured at open time and
    /// is what the header advertises; the file is not re-queried during
    /// transmission.
    Ok {
        header: Bytes,
        file: File,
        size: u64,
    },
}

impl Response {
    /// Builds the response for a received request head. Never fails: every
    /// failure short-circuits into a 400 or 404.
    pub fn build(root: &Path, head: &[u8]) -> Response {
        let Some(uri) = uri::extract_uri(head) else {
            return Response::BadRequest;
        };

        // 404 URIs which traverse upwards out of the web root.
        if uri::has_path_escape(uri) {
            return Response::NotFound;
        }

        let path = uri::resolve_path(root, uri);
        let Some((file, size)) = uri::open_regular_file(&path) else {
            return Response::NotFound;
        };

        Response::ok(file, size, mime::mime_for(uri))
    }

    pub fn ok(file: File, size: u64, mime: &str) -> Response {
        let header = Bytes::from(format!(
            "HTTP/1.0 200 OK\r\nContent-Length: {size}\r\nContent-Type: {mime}\r\n\r\n"
        ));
        Response::Ok { header, file, size }
    }

    /// The formatted status-line and headers, terminated by a blank line.
    pub fn header(&self) -> &[u8] {
        match self {
            Response::BadRequest => HEADER_400,
            Response::NotFound => HEADER_404,
            Response::Ok { header, .. } => header,
        }
    }

    /// Number of body bytes that follow the header. Zero for 400 and 404.
    pub fn body_size(&self) -> u64 {
        match self {
            Response::Ok { size, .. } => *size,
            _ => 0,
        }
    }
}
