use lantern::http::mime::{DEFAULT_MIME_TYPE, content_type_for, is_servable, is_text};
use std::path::Path;

#[test]
fn test_servable_extensions() {
    let cases = [
        ("index.html", "text/html"),
        ("page.htm", "text/html"),
        ("notes.txt", "text/plain"),
        ("styles.css", "text/css"),
        ("script.js", "application/javascript"),
        ("photo.jpg", "image/jpeg"),
        ("photo.jpeg", "image/jpeg"),
        ("logo.png", "image/png"),
        ("anim.gif", "image/gif"),
    ];

    for (file, expected) in cases {
        let mime = content_type_for(Path::new(file));
        assert_eq!(mime, expected, "{}", file);
        assert!(is_servable(mime), "{} should be servable", file);
    }
}

#[test]
fn test_known_but_not_servable() {
    for file in ["data.json", "icon.svg", "doc.pdf", "archive.zip"] {
        let mime = content_type_for(Path::new(file));
        assert_ne!(mime, DEFAULT_MIME_TYPE, "{}", file);
        assert!(!is_servable(mime), "{} should not be servable", file);
    }
}

#[test]
fn test_unknown_extension_defaults_to_octet_stream() {
    assert_eq!(content_type_for(Path::new("data.exe")), DEFAULT_MIME_TYPE);
    assert_eq!(content_type_for(Path::new("README")), DEFAULT_MIME_TYPE);
    assert_eq!(content_type_for(Path::new("dir/file.unknownext")), DEFAULT_MIME_TYPE);
    assert!(!is_servable(DEFAULT_MIME_TYPE));
}

#[test]
fn test_nested_path_uses_last_extension() {
    assert_eq!(content_type_for(Path::new("assets/v1.2/app.min.js")), "application/javascript");
    assert_eq!(content_type_for(Path::new("backup.html.gz")), "application/gzip");
}

#[test]
fn test_text_types() {
    assert!(is_text("text/html"));
    assert!(is_text("text/css"));
    assert!(!is_text("application/javascript"));
    assert!(!is_text("image/png"));
}
