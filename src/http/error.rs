//! Protocol error taxonomy.
//!
//! Every protocol variant except [`ServeError::InvalidDateHeader`] is
//! recovered into a well-formed response with a fixed status. `Io` is the
//! escape hatch for unexpected filesystem failures: it closes the connection
//! but is never fatal to the process.

use crate::http::parser::ParseError;
use crate::http::response::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("path escapes the document root: {0}")]
    PathEscape(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(&'static str),

    #[error("request head exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },

    #[error("request head is not valid UTF-8")]
    InvalidEncoding,

    #[error("invalid If-Modified-Since value: {0}")]
    InvalidDateHeader(String),

    /// Filesystem failure outside the taxonomy; ends the connection.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServeError {
    /// Status code this failure is answered with, or `None` when the failure
    /// is only logged.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ServeError::MalformedRequestLine
            | ServeError::UnsupportedMethod(_)
            | ServeError::RequestTooLarge { .. }
            | ServeError::InvalidEncoding => Some(StatusCode::BadRequest),
            ServeError::PathEscape(_) | ServeError::PermissionDenied(_) => {
                Some(StatusCode::Forbidden)
            }
            ServeError::NotFound(_) => Some(StatusCode::NotFound),
            ServeError::UnsupportedMediaType(_) => Some(StatusCode::UnsupportedMediaType),
            ServeError::InvalidDateHeader(_) | ServeError::Io(_) => None,
        }
    }

    /// Whether the connection must be closed regardless of `Connection`.
    pub fn forces_close(&self) -> bool {
        matches!(
            self,
            ServeError::MalformedRequestLine
                | ServeError::RequestTooLarge { .. }
                | ServeError::InvalidEncoding
        )
    }
}

impl From<ParseError> for ServeError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::InvalidEncoding => ServeError::InvalidEncoding,
            // Incomplete never reaches the handler; the connection keeps reading.
            ParseError::MalformedRequestLine | ParseError::Incomplete => {
                ServeError::MalformedRequestLine
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_header_errors_have_no_status() {
        let e = ServeError::InvalidDateHeader("yesterday".into());
        assert_eq!(e.status(), None);
        assert!(!e.forces_close());
    }

    #[test]
    fn framing_errors_close_the_connection() {
        assert!(ServeError::RequestTooLarge { limit: 1 }.forces_close());
        assert!(ServeError::InvalidEncoding.forces_close());
        assert!(!ServeError::NotFound("/x".into()).forces_close());
    }
}
