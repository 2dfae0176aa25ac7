//! Per-request decision pipeline.
//!
//! The checks run in a fixed order and the first failure decides the status:
//! method, containment, existence, readability, media type, freshness, and
//! finally the method-specific body.

use bytes::Bytes;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::http::date::{format_http_date, parse_http_date, to_http_resolution};
use crate::http::error::ServeError;
use crate::http::mime;
use crate::http::path::{DocumentRoot, normalize_request_path};
use crate::http::request::{Method, Request};
use crate::http::response::{Body, Response, ResponseBuilder, ResponseOptions, StatusCode};

/// Path recorded in the access log when no request path is available.
const UNKNOWN_PATH: &str = "/";

/// Logged in place of a bare `/`.
const INDEX_PATH: &str = "/index.html";

/// Result of one request cycle.
#[derive(Debug)]
pub struct Outcome {
    pub response: Response,
    /// Whether the connection reads another request afterwards.
    pub keep_alive: bool,
    /// Request path as it appears in the access log.
    pub log_path: String,
}

/// Serves files from a document root.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    root: DocumentRoot,
    server_name: String,
    assume_keep_alive: bool,
}

impl RequestHandler {
    /// `assume_keep_alive` selects HTTP/1.1 persistence semantics when the
    /// client sends no `Connection` header; `false` closes such connections.
    pub fn new(root: DocumentRoot, server_name: impl Into<String>, assume_keep_alive: bool) -> Self {
        Self {
            root,
            server_name: server_name.into(),
            assume_keep_alive,
        }
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    /// Runs the pipeline for a parsed request.
    ///
    /// Only `ServeError::Io` is returned as an error; every other failure is
    /// turned into a response here.
    pub async fn handle(&self, request: &Request) -> Result<Outcome, ServeError> {
        let keep_alive = request.keep_alive(self.assume_keep_alive);
        let log_path = if request.path == "/" {
            INDEX_PATH.to_string()
        } else {
            request.path.clone()
        };

        info!(method = request.method.as_str(), path = %request.path, keep_alive, "Request");

        let response = match self.serve(request, keep_alive).await {
            Ok(response) => response,
            Err(e) => match e.status() {
                Some(status) => {
                    warn!(path = %request.path, status = status.as_u16(), error = %e, "Request rejected");
                    Response::error(status, &self.server_name, keep_alive)
                }
                None => return Err(e),
            },
        };

        Ok(Outcome {
            response,
            keep_alive,
            log_path,
        })
    }

    /// Builds the 400 outcome for a request that failed before dispatch.
    /// Such failures always close the connection.
    pub fn reject(&self, error: &ServeError) -> Outcome {
        let status = error.status().unwrap_or(StatusCode::BadRequest);
        let keep_alive = !error.forces_close();
        warn!(status = status.as_u16(), error = %error, "Rejecting request");

        Outcome {
            response: Response::error(status, &self.server_name, keep_alive),
            keep_alive,
            log_path: UNKNOWN_PATH.to_string(),
        }
    }

    async fn serve(&self, request: &Request, keep_alive: bool) -> Result<Response, ServeError> {
        let head_only = match &request.method {
            Method::GET => false,
            Method::HEAD => true,
            Method::Other(m) => return Err(ServeError::UnsupportedMethod(m.clone())),
        };

        let resolved = self.root.resolve(&request.path);
        if !resolved.contained {
            return Err(ServeError::PathEscape(request.path.clone()));
        }

        let metadata = match tokio::fs::metadata(&resolved.path).await {
            Ok(m) if m.is_file() => m,
            _ => return Err(ServeError::NotFound(request.path.clone())),
        };

        let mut file = match File::open(&resolved.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(ServeError::PermissionDenied(request.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let content_type = mime::content_type_for(Path::new(normalize_request_path(&request.path)));
        if !mime::is_servable(content_type) {
            return Err(ServeError::UnsupportedMediaType(content_type));
        }

        let modified = metadata.modified()?;
        let mut options = ResponseOptions {
            server_name: self.server_name.clone(),
            content_type: None,
            last_modified: Some(format_http_date(modified)),
            keep_alive,
        };

        if let Some(raw) = request.if_modified_since() {
            match parse_http_date(raw) {
                Some(since) if to_http_resolution(modified) <= since => {
                    info!(path = %request.path, "Not modified");
                    return Ok(ResponseBuilder::new(StatusCode::NotModified, options).build());
                }
                Some(_) => {}
                None => {
                    let e = ServeError::InvalidDateHeader(raw.to_string());
                    warn!(path = %request.path, error = %e, "Ignoring conditional header");
                }
            }
        }

        options.content_type = Some(content_type);

        let body = if head_only {
            Body::Headless {
                len: metadata.len(),
            }
        } else if mime::is_text(content_type) {
            let mut text = String::new();
            file.read_to_string(&mut text).await?;
            Body::Full(Bytes::from(text))
        } else {
            let mut raw = Vec::new();
            file.read_to_end(&mut raw).await?;
            Body::Full(Bytes::from(raw))
        };

        Ok(ResponseBuilder::new(StatusCode::Ok, options).body(body).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::parser::parse_head;
    use std::fs;
    use tempfile::tempdir;

    fn handler_for(dir: &Path) -> RequestHandler {
        RequestHandler::new(DocumentRoot::new(dir).unwrap(), "Lantern/test", false)
    }

    async fn dispatch(handler: &RequestHandler, head: &str) -> Result<Outcome, ServeError> {
        match parse_head(head) {
            Ok(request) => handler.handle(&request).await,
            Err(e) => Ok(handler.reject(&ServeError::from(e))),
        }
    }

    #[tokio::test]
    async fn short_request_line_closes() {
        let dir = tempdir().unwrap();
        let handler = handler_for(dir.path());

        let outcome = dispatch(&handler, "GET").await.unwrap();

        assert_eq!(outcome.response.status, StatusCode::BadRequest);
        assert!(!outcome.keep_alive);
        assert_eq!(outcome.response.header("Connection"), Some("close"));
        assert_eq!(outcome.log_path, "/");
    }

    #[tokio::test]
    async fn unsupported_method_keeps_negotiated_connection() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<p>hi</p>").unwrap();
        let handler = handler_for(dir.path());

        let outcome = dispatch(&handler, "POST / HTTP/1.1\r\nConnection: keep-alive")
            .await
            .unwrap();

        assert_eq!(outcome.response.status, StatusCode::BadRequest);
        assert!(outcome.keep_alive);
        assert_eq!(outcome.response.header("Connection"), Some("keep-alive"));
    }

    #[tokio::test]
    async fn log_path_uses_index_mapping() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "x").unwrap();
        let handler = handler_for(dir.path());

        let outcome = dispatch(&handler, "GET / HTTP/1.1").await.unwrap();

        assert_eq!(outcome.log_path, "/index.html");
    }

    #[tokio::test]
    async fn log_path_keeps_raw_request_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.css"), "body {}").unwrap();
        let handler = handler_for(dir.path());

        let outcome = dispatch(&handler, "GET //a.css HTTP/1.1").await.unwrap();

        assert_eq!(outcome.response.status, StatusCode::Ok);
        assert_eq!(outcome.log_path, "//a.css");
    }

    #[tokio::test]
    async fn invalid_utf8_text_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();
        let handler = handler_for(dir.path());

        let result = dispatch(&handler, "GET /bad.txt HTTP/1.1").await;

        assert!(matches!(result, Err(ServeError::Io(_))));
    }
}
