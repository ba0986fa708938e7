//! Named collections of pages rooted at a directory.
//!
//! A collection owns the root, a unique name, the URL prefix it is mounted
//! under and the default context shared by all of its pages. It hands out
//! one [`Page`] per request.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PagesError, Result};
use crate::frontmatter::{merge, Context};
use crate::page::Page;
use crate::resolver::{normalize, SourceKind};

/// A group of pages under one root directory.
#[derive(Debug, Clone)]
pub struct PageCollection {
    root: PathBuf,
    name: String,
    mount: String,
    context: Context,
}

impl PageCollection {
    /// Create a collection rooted at `root`.
    ///
    /// Relative roots are taken from the current directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| PagesError::Io {
            path: PathBuf::from("."),
            message: format!("Failed to read current directory: {}", e),
        })?;
        Ok(Self::in_dir(&cwd, root))
    }

    /// Create a collection with a relative `root` taken from `base_dir`.
    pub fn in_dir(base_dir: &Path, root: impl AsRef<Path>) -> Self {
        let root = normalize(&base_dir.join(root.as_ref()));
        let name = root
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            root,
            name,
            mount: "/".to_string(),
            context: Context::new(),
        }
    }

    /// Set the collection name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the URL prefix, e.g. `/docs/`.
    pub fn with_mount(mut self, mount: &str) -> Self {
        self.mount = normalize_mount(mount);
        self
    }

    /// Set the default context for every page.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Look up a page, or `None` if nothing matches.
    pub fn get_page(&self, request_path: &str) -> Option<Page> {
        let page = Page::new(request_path, &self.root, self.context.clone());
        page.exists().then_some(page)
    }

    /// Look up a page with per-request context layered over the defaults.
    pub fn get_page_with(&self, request_path: &str, extra: &Context) -> Option<Page> {
        let mut context = self.context.clone();
        merge(&mut context, extra.clone());

        let page = Page::new(request_path, &self.root, context);
        page.exists().then_some(page)
    }

    /// Every request path a page can be served from, sorted.
    ///
    /// `index.md`/`index.html` map to their directory; the root index is
    /// left out.
    pub fn request_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();

        if !self.root.is_dir() {
            return paths;
        }

        for entry in WalkDir::new(&self.root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if SourceKind::from_path(path).is_none() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };

            let is_index = matches!(
                relative.file_name().and_then(|n| n.to_str()),
                Some("index.md" | "index.html")
            );
            let logical = if is_index {
                relative.parent().map(Path::to_path_buf).unwrap_or_default()
            } else {
                relative.with_extension("")
            };

            let request_path = slash_path(&logical);
            if request_path.is_empty() {
                continue;
            }
            paths.push(request_path);
        }

        paths.sort();
        paths.dedup();
        paths
    }

    /// Route list for the URL layer.
    pub fn routes(&self) -> Vec<Route> {
        vec![
            Route {
                pattern: RoutePattern::Index,
                name: self.name.clone(),
            },
            Route {
                pattern: RoutePattern::Nested,
                name: self.name.clone(),
            },
        ]
    }

    /// Map a URL to a request path in this collection.
    pub fn match_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(self.mount.as_str()).or_else(|| {
            // "/docs" for a collection mounted at "/docs/"
            (format!("{url}/") == self.mount).then_some("")
        })?;

        self.routes()
            .iter()
            .find_map(|route| route.pattern.match_path(rest))
    }

    /// URL a request path is served from.
    pub fn url_for(&self, request_path: &str) -> String {
        let request_path = request_path.trim_matches('/');
        if request_path.is_empty() {
            self.mount.clone()
        } else {
            format!("{}{}/", self.mount, request_path)
        }
    }
}

/// How a route matches the path left after the mount prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePattern {
    /// The empty path: the collection index
    Index,
    /// `^(.*)/$`: any path ending in a slash
    Nested,
}

impl RoutePattern {
    /// Pattern text as registered with a router.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePattern::Index => "",
            RoutePattern::Nested => r"^(.*)/$",
        }
    }

    /// Extract the request path from a mount-relative path.
    pub fn match_path(&self, path: &str) -> Option<String> {
        match self {
            RoutePattern::Index => path.is_empty().then(String::new),
            RoutePattern::Nested => path.strip_suffix('/').map(str::to_string),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named route served by a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub pattern: RoutePattern,
    pub name: String,
}

fn normalize_mount(mount: &str) -> String {
    let trimmed = mount.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Join path components with `/` regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
