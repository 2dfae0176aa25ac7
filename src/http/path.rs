//! Mapping of request paths onto the document root.

use std::io;
use std::path::{Component, Path, PathBuf};

/// A request path mapped onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Canonical path when the target exists, otherwise the lexically
    /// normalized candidate.
    pub path: PathBuf,
    /// Whether `path` lies inside the document root.
    pub contained: bool,
}

/// The canonicalized directory all served files must live under.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    canonical: PathBuf,
}

impl DocumentRoot {
    /// Canonicalizes `root` once. Fails if it does not exist or is not a directory.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let canonical = std::fs::canonicalize(root.as_ref())?;
        if !canonical.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("document root {} is not a directory", canonical.display()),
            ));
        }
        Ok(Self { canonical })
    }

    pub fn path(&self) -> &Path {
        &self.canonical
    }

    /// Maps a raw request path to a file candidate.
    ///
    /// `/` becomes `/index.html`. The path is joined below the root with
    /// leading slashes stripped, `..` is folded lexically, then symlinks are
    /// resolved when the target exists. Containment compares whole path
    /// components, so `/srv/www-evil` is not inside `/srv/www`.
    pub fn resolve(&self, url_path: &str) -> Resolved {
        let relative = normalize_request_path(url_path);

        let Some(candidate) = fold_components(&self.canonical, Path::new(relative)) else {
            return Resolved {
                path: self.canonical.clone(),
                contained: false,
            };
        };

        if !candidate.starts_with(&self.canonical) {
            return Resolved {
                path: candidate,
                contained: false,
            };
        }

        match std::fs::canonicalize(&candidate) {
            Ok(real) => {
                let contained = real.starts_with(&self.canonical);
                Resolved {
                    path: real,
                    contained,
                }
            }
            // Missing (or dangling) targets stay lexical; the existence check reports them.
            Err(_) => Resolved {
                path: candidate,
                contained: true,
            },
        }
    }
}

/// Applies the `/` -> `/index.html` mapping and strips leading slashes.
pub fn normalize_request_path(url_path: &str) -> &str {
    let path = if url_path == "/" { "/index.html" } else { url_path };
    path.trim_start_matches('/')
}

/// Joins `relative` onto `base`, folding `.` and `..`. Returns `None` if a
/// `..` would climb above the filesystem root.
fn fold_components(base: &Path, relative: &Path) -> Option<PathBuf> {
    let mut out = base.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            // A rooted or prefixed component would discard the base.
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}
