use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Hard cap on the size of a request head, terminator included.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No blank line yet; more bytes are needed.
    Incomplete,
    /// The first line has fewer than three tokens.
    MalformedRequestLine,
    /// The head is not valid UTF-8.
    InvalidEncoding,
}

/// Parses one request head from the front of `buf`.
///
/// Returns the request and the number of bytes consumed (head plus
/// terminator). Anything after the terminator is left for the caller.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let head = std::str::from_utf8(&buf[..headers_end])
        .map_err(|_| ParseError::InvalidEncoding)?;

    let request = parse_head(head)?;
    Ok((request, headers_end + HEAD_TERMINATOR.len()))
}

/// Parses a decoded request head (without the terminating blank line).
pub fn parse_head(head: &str) -> Result<Request, ParseError> {
    let mut lines = head.split("\r\n");

    // Request line
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let path = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let version = parts.next().ok_or(ParseError::MalformedRequestLine)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            break;
        }

        // Lines without a colon are tolerated and skipped
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    Ok(Request {
        method: Method::from_token(method_str),
        path: path.to_string(),
        version: version.to_string(),
        headers,
    })
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|w| w == HEAD_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn leaves_pipelined_bytes_unconsumed() {
        let req = b"GET /a.html HTTP/1.1\r\n\r\nGET /b.html HTTP/1.1\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/a.html");
        assert_eq!(&req[consumed..], b"GET /b.html HTTP/1.1\r\n\r\n");
    }

    #[test]
    fn last_duplicate_header_wins() {
        let req = b"GET / HTTP/1.1\r\nConnection: close\r\nconnection: keep-alive\r\n\r\n";

        let (parsed, _) = parse_http_request(req).unwrap();

        assert_eq!(parsed.header("Connection"), Some("keep-alive"));
        assert!(parsed.keep_alive(false));
    }
}
