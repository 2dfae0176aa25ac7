use bytes::Bytes;
use std::time::SystemTime;

use crate::http::date::format_http_date;

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): File served
/// - `NotModified` (304): Conditional GET hit
/// - `BadRequest` (400): Malformed request or unsupported method
/// - `Forbidden` (403): Path escapes the root or file is unreadable
/// - `NotFound` (404): No such file
/// - `UnsupportedMediaType` (415): Extension outside the allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::UnsupportedMediaType => 415,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotModified.reason_phrase(), "Not Modified");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
        }
    }
}

/// The optional parts of a response head, passed as one record.
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    /// `Server` header value
    pub server_name: String,
    /// `Content-Type`, omitted when `None`
    pub content_type: Option<&'static str>,
    /// `Last-Modified` (already formatted as an HTTP-date), omitted when `None`
    pub last_modified: Option<String>,
    /// Selects `Connection: keep-alive` over `Connection: close`
    pub keep_alive: bool,
}

/// What goes after the blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Bytes sent on the wire.
    Full(Bytes),
    /// No bytes sent, but `Content-Length` announces `len` (HEAD).
    Headless { len: u64 },
}

impl Body {
    pub fn empty() -> Self {
        Body::Full(Bytes::new())
    }

    /// Value of the `Content-Length` header.
    pub fn content_length(&self) -> u64 {
        match self {
            Body::Full(bytes) => bytes.len() as u64,
            Body::Headless { len } => *len,
        }
    }

    /// Bytes actually transmitted.
    pub fn wire_bytes(&self) -> &[u8] {
        match self {
            Body::Full(bytes) => &bytes[..],
            Body::Headless { .. } => &[],
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers are an ordered list; the writer emits them exactly in this order.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in wire order
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Body,
}

/// Builder for constructing HTTP responses.
///
/// Produces `Date`, `Server`, `Content-Type`, `Last-Modified`,
/// `Content-Length`, `Connection`, in that order.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok, options)
///     .body(Body::Full(Bytes::from_static(b"hi")))
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    options: ResponseOptions,
    body: Body,
    date: SystemTime,
}

impl ResponseBuilder {
    /// Creates a new response builder with an empty body.
    pub fn new(status: StatusCode, options: ResponseOptions) -> Self {
        Self {
            status,
            options,
            body: Body::empty(),
            date: SystemTime::now(),
        }
    }

    /// Sets the response body.
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Overrides the `Date` header timestamp (defaults to now).
    pub fn date(mut self, date: SystemTime) -> Self {
        self.date = date;
        self
    }

    /// Builds the final Response. `Content-Length` always comes from the body.
    pub fn build(self) -> Response {
        let ResponseOptions {
            server_name,
            content_type,
            last_modified,
            keep_alive,
        } = self.options;

        let mut headers = Vec::with_capacity(6);
        headers.push(("Date".to_string(), format_http_date(self.date)));
        headers.push(("Server".to_string(), server_name));

        if let Some(content_type) = content_type {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }

        if let Some(last_modified) = last_modified {
            headers.push(("Last-Modified".to_string(), last_modified));
        }

        headers.push((
            "Content-Length".to_string(),
            self.body.content_length().to_string(),
        ));

        let connection = if keep_alive { "keep-alive" } else { "close" };
        headers.push(("Connection".to_string(), connection.to_string()));

        Response {
            status: self.status,
            headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a body-less response for an error status.
    pub fn error(status: StatusCode, server_name: &str, keep_alive: bool) -> Self {
        ResponseBuilder::new(
            status,
            ResponseOptions {
                server_name: server_name.to_string(),
                keep_alive,
                ..Default::default()
            },
        )
        .build()
    }

    /// Looks up a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
