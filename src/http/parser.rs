use crate::http::request::Request;

pub(crate) const METHOD_PREFIX: &[u8] = b"GET /";
pub(crate) const HTTP_10: &[u8] = b" HTTP/1.0\r\n";
pub(crate) const HTTP_11: &[u8] = b" HTTP/1.1\r\n";

/// Outcome of one incremental parsing pass. `Valid` and `Bad` are terminal;
/// `Receiving` means the bytes so far are still a prefix of some well-formed
/// request-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    Receiving,
    Valid,
    Bad,
}

/// Advances the request-line parse over the bytes received since the last
/// call.
///
/// Called after every read. Resumes from the cursors stored in the request,
/// so bytes already classified are not re-scanned:
///
/// 1. Until the method is validated, the buffer must be a prefix of
///    `GET /` (or start with it). Anything else fails immediately.
/// 2. The URI runs to the first space after the prefix; the search resumes
///    at `scan_from`.
/// 3. The bytes at that space must literally be ` HTTP/1.0\r\n` or
///    ` HTTP/1.1\r\n`, completing the request-line.
pub fn advance(req: &mut Request) -> ParseStage {
    if !req.method_ok {
        let head = req.filled();
        if head.len() < METHOD_PREFIX.len() {
            return if METHOD_PREFIX.starts_with(head) {
                ParseStage::Receiving
            } else {
                ParseStage::Bad
            };
        }
        if &head[..METHOD_PREFIX.len()] != METHOD_PREFIX {
            return ParseStage::Bad;
        }
        req.method_ok = true;
        req.uri_start = METHOD_PREFIX.len() - 1;
        req.scan_from = METHOD_PREFIX.len();
    }

    if req.space_at.is_none() {
        let from = req.scan_from;
        req.space_at = req.filled()[from..]
            .iter()
            .position(|&b| b == b' ')
            .map(|i| from + i);
    }

    let Some(space) = req.space_at else {
        // No space yet: remember how far we searched.
        req.scan_from = req.len();
        return ParseStage::Receiving;
    };

    let tail = &req.filled()[space..];
    if tail.len() >= HTTP_10.len() {
        let version = &tail[..HTTP_10.len()];
        if version == HTTP_10 || version == HTTP_11 {
            ParseStage::Valid
        } else {
            ParseStage::Bad
        }
    } else if HTTP_10.starts_with(tail) || HTTP_11.starts_with(tail) {
        ParseStage::Receiving
    } else {
        ParseStage::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_request_line() {
        let mut req = Request::new();
        req.push(b"GET /index.html HTTP/1.1\r\n");

        assert_eq!(advance(&mut req), ParseStage::Valid);
        assert!(req.method_validated());
        assert_eq!(req.uri_offset(), 4);
    }
}
