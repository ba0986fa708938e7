//! Request path to source file resolution.
//!
//! A request path such as `blog/first-post` is looked up under a collection
//! root in a fixed order:
//!
//! 1. `{stem}.html`
//! 2. `{stem}.md`
//! 3. `{stem}/index.html`
//! 4. `{stem}/index.md`
//!
//! Anything that normalizes to a location outside the root is reported as
//! missing, exactly like a page that was never written.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// The kind of source file a page was resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Html,
    Markdown,
}

impl SourceKind {
    /// Detect the source kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "html" => Some(SourceKind::Html),
            "md" => Some(SourceKind::Markdown),
            _ => None,
        }
    }

    /// Get the file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceKind::Html => "html",
            SourceKind::Markdown => "md",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Html => write!(f, "html"),
            SourceKind::Markdown => write!(f, "markdown"),
        }
    }
}

/// Outcome of resolving a request path.
///
/// A missing source carries no path, so there is nothing to read by mistake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSource {
    path: Option<PathBuf>,
}

impl ResolvedSource {
    /// A source that could not be found.
    pub fn missing() -> Self {
        Self { path: None }
    }

    fn found(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Whether a source file was found.
    pub fn exists(&self) -> bool {
        self.path.is_some()
    }

    /// Path to the source file, if one was found.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Kind of the source file, if one was found.
    pub fn kind(&self) -> Option<SourceKind> {
        self.path().and_then(SourceKind::from_path)
    }
}

/// Resolve `request_path` to a source file under `root`.
///
/// Never fails: a missing root, a path escaping the root, or no matching
/// file all produce [`ResolvedSource::missing`].
pub fn resolve(root: &Path, request_path: &str) -> ResolvedSource {
    let root = match fs::canonicalize(root) {
        Ok(root) if root.is_dir() => root,
        _ => {
            log::debug!("collection root {} is not a directory", root.display());
            return ResolvedSource::missing();
        }
    };

    let stem = normalize(&root.join(request_path));
    if !stem.starts_with(&root) {
        log::debug!("request path {request_path:?} escapes {}", root.display());
        return ResolvedSource::missing();
    }

    for candidate in candidates(&root, &stem) {
        if !candidate.is_file() {
            continue;
        }
        // A symlinked file may still point outside the root
        match fs::canonicalize(&candidate) {
            Ok(target) if target.starts_with(&root) => {
                log::debug!("resolved {request_path:?} to {}", candidate.display());
                return ResolvedSource::found(candidate);
            }
            _ => {
                log::debug!("skipping {}: target outside root", candidate.display());
            }
        }
    }

    log::debug!("no source for {request_path:?} under {}", root.display());
    ResolvedSource::missing()
}

/// Candidate files for a stem, in lookup order.
fn candidates(root: &Path, stem: &Path) -> Vec<PathBuf> {
    let mut search = Vec::with_capacity(4);

    // {root}.html sits beside the root, not inside it
    if stem != root {
        search.push(with_suffix(stem, ".html"));
        search.push(with_suffix(stem, ".md"));
    }
    search.push(stem.join("index.html"));
    search.push(stem.join("index.md"));

    search
}

/// Append a suffix to the final component (`a/b` -> `a/b.md`).
///
/// Unlike `Path::with_extension`, dots already in the name are kept.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Make a path absolute and free of `.`, `..` and symlinks.
///
/// Components are resolved left to right: each existing prefix is
/// canonicalized before the next component is applied, so `link/..` lands
/// in the parent of the link's target. Once a prefix no longer exists the
/// rest is applied lexically.
pub fn normalize(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(real) = fs::canonicalize(&resolved) {
                    resolved = real;
                }
            }
            prefix_or_root => resolved.push(prefix_or_root),
        }
    }

    resolved
}
