use std::collections::HashMap;

/// HTTP request methods.
///
/// The server only serves GET and HEAD. Every other token lands in `Other`
/// so the handler can reject it with 400 through an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// Any other method token, kept verbatim for logging
    Other(String),
}

/// Represents a parsed HTTP request head from a client.
///
/// Header names are stored lowercased with trimmed values. The request body,
/// if any, is never read: this server has no use for it.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The raw request target (e.g., "/index.html"), not URL-decoded
    pub path: String,
    /// HTTP version token (typically "HTTP/1.1")
    pub version: String,
    /// Request headers keyed by lowercase name
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive, as method tokens are in HTTP/1.1.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::Other(s) => s,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a header. The name is lowercased the same way the parser does it.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().trim().to_ascii_lowercase(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// `Connection: keep-alive` (any case) always keeps the connection. When the
    /// header is absent the answer is `assume_persistent`; when it carries any
    /// other value the connection closes, except that with `assume_persistent`
    /// only `close` does.
    pub fn keep_alive(&self, assume_persistent: bool) -> bool {
        match self.header("Connection") {
            Some(v) if v.eq_ignore_ascii_case("keep-alive") => true,
            Some(v) if assume_persistent => !v.eq_ignore_ascii_case("close"),
            Some(_) => false,
            None => assume_persistent,
        }
    }

    /// Raw `If-Modified-Since` value, if the client sent one.
    pub fn if_modified_since(&self) -> Option<&str> {
        self.header("If-Modified-Since")
    }
}
