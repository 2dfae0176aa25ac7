use lantern::http::parser::{ParseError, find_headers_end, parse_head, parse_http_request};
use lantern::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_head_request() {
    let req = b"HEAD /style.css HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::HEAD);
    assert_eq!(parsed.path, "/style.css");
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("user-agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("accept").unwrap(), "*/*");
}

#[test]
fn test_parse_repeated_header_keeps_last_value() {
    let req = b"GET / HTTP/1.1\r\nConnection: close\r\nConnection: keep-alive\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("connection"), Some("keep-alive"));
    assert!(parsed.keep_alive(false));
}

#[test]
fn test_parse_header_keys_lowercased_and_values_trimmed() {
    let req = b"GET / HTTP/1.1\r\n  If-Modified-Since :   Sun, 06 Nov 1994 08:49:37 GMT  \r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(
        parsed.headers.get("if-modified-since").unwrap(),
        "Sun, 06 Nov 1994 08:49:37 GMT"
    );
}

#[test]
fn test_parse_value_keeps_later_colons() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:8080\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("localhost:8080"));
}

#[test]
fn test_parse_request_path_not_decoded() {
    let req = b"GET /a%20b.html?q=rust HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/a%20b.html?q=rust");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_unknown_method_is_kept() {
    let req = b"DELETE / HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Other("DELETE".to_string()));
}

#[test]
fn test_parse_line_without_colon_is_ignored() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nConnection: keep-alive\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.header("Connection"), Some("keep-alive"));
}

#[test]
fn test_parse_short_request_line() {
    for line in ["GET", "GET /", ""] {
        let req = format!("{}\r\n\r\n", line);
        let result = parse_http_request(req.as_bytes());
        assert!(
            matches!(result, Err(ParseError::MalformedRequestLine)),
            "{:?} should be malformed",
            line
        );
    }
}

#[test]
fn test_parse_extra_request_line_tokens_tolerated() {
    let parsed = parse_head("GET /x.txt HTTP/1.1 trailing").unwrap();

    assert_eq!(parsed.path, "/x.txt");
    assert_eq!(parsed.version, "HTTP/1.1");
}

#[test]
fn test_parse_invalid_utf8() {
    let req = b"GET /\xc3\x28 HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidEncoding)));
}

#[test]
fn test_find_headers_end() {
    assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n\r\n"), Some(14));
    assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n"), None);
}
