//! MIME type detection based on file extensions.
//!
//! There is no content sniffing: the extension alone decides the type, and
//! only a fixed set of types is ever served.

use std::path::Path;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Types the server is willing to send.
pub const SERVABLE_TYPES: &[&str] = &[
    "text/html",
    "text/plain",
    "text/css",
    "application/javascript",
    "image/jpeg",
    "image/png",
    "image/gif",
];

// Extensions are matched lowercased.
const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/vnd.microsoft.icon"),
    ("webp", "image/webp"),
    ("json", "application/json"),
    ("xml", "text/xml"),
    ("csv", "text/csv"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("wasm", "application/wasm"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
];

/// Returns the MIME type for `path`, or [`DEFAULT_MIME_TYPE`] if the
/// extension is missing or unknown.
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .and_then(|ext| {
            EXTENSION_TABLE
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(DEFAULT_MIME_TYPE)
}

pub fn is_servable(mime: &str) -> bool {
    SERVABLE_TYPES.contains(&mime)
}

/// Text types are read and sent as UTF-8 text; everything else as raw bytes.
pub fn is_text(mime: &str) -> bool {
    mime.starts_with("text/")
}
