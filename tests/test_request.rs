use lantern::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

fn request_with(headers: &[(&str, &str)]) -> Request {
    headers
        .iter()
        .fold(
            RequestBuilder::new().method(Method::GET).path("/"),
            |builder, (k, v)| builder.header(k, *v),
        )
        .build()
        .unwrap()
}

#[test]
fn test_request_header_retrieval_ignores_case() {
    let mut headers = HashMap::new();
    headers.insert("host".to_string(), "example.com".to_string());

    let req = Request {
        method: Method::GET,
        path: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
    };

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("HOST"), Some("example.com"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_keep_alive_requested() {
    let req = request_with(&[("Connection", "keep-alive")]);
    assert!(req.keep_alive(false));

    let req = request_with(&[("Connection", "Keep-Alive")]);
    assert!(req.keep_alive(false));
}

#[test]
fn test_keep_alive_absent_header_closes() {
    let req = request_with(&[]);
    assert!(!req.keep_alive(false));
}

#[test]
fn test_keep_alive_other_values_close() {
    let req = request_with(&[("Connection", "close")]);
    assert!(!req.keep_alive(false));

    let req = request_with(&[("Connection", "upgrade")]);
    assert!(!req.keep_alive(false));
}

#[test]
fn test_keep_alive_assumed_persistent() {
    assert!(request_with(&[]).keep_alive(true));
    assert!(request_with(&[("Connection", "upgrade")]).keep_alive(true));
    assert!(!request_with(&[("Connection", "Close")]).keep_alive(true));
}

#[test]
fn test_if_modified_since() {
    let req = request_with(&[("If-Modified-Since", "Sun, 06 Nov 1994 08:49:37 GMT")]);
    assert_eq!(
        req.if_modified_since(),
        Some("Sun, 06 Nov 1994 08:49:37 GMT")
    );
    assert_eq!(request_with(&[]).if_modified_since(), None);
}

#[test]
fn test_method_from_token() {
    assert_eq!(Method::from_token("GET"), Method::GET);
    assert_eq!(Method::from_token("HEAD"), Method::HEAD);
    assert_eq!(Method::from_token("POST"), Method::Other("POST".to_string()));
    assert_eq!(Method::from_token("POST").as_str(), "POST");
}

#[test]
fn test_request_builder_defaults_version() {
    let req = RequestBuilder::new()
        .method(Method::HEAD)
        .path("/a.png")
        .build()
        .unwrap();

    assert_eq!(req.version, "HTTP/1.1");
    assert!(RequestBuilder::new().path("/").build().is_err());
}
