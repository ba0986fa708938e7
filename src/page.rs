//! A single page: source lookup, cached frontmatter read, and rendering.
//!
//! Pages are built per request and hold their parsed content in an `Rc`,
//! so they stay on the thread that created them.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::Value;

use crate::error::{PagesError, Result};
use crate::frontmatter::{self, Context};
use crate::markdown::render_markdown;
use crate::resolver::{resolve, ResolvedSource, SourceKind};

/// Parsed page body and its merged render context.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    /// Source text with any frontmatter removed
    pub body: String,
    /// Defaults, caller context and frontmatter, merged
    pub context: Context,
}

/// A page looked up by request path.
#[derive(Debug)]
pub struct Page {
    request_path: String,
    name: String,
    source: ResolvedSource,
    extra_context: Context,
    content: Option<Rc<PageContent>>,
}

impl Page {
    /// Look up `request_path` under `root`.
    ///
    /// A missing page is still a `Page`; check [`Page::exists`] before reading.
    pub fn new(request_path: &str, root: &Path, extra_context: Context) -> Self {
        let name = request_path.rsplit('/').next().unwrap_or_default().to_string();

        Self {
            request_path: request_path.to_string(),
            name,
            source: resolve(root, request_path),
            extra_context,
            content: None,
        }
    }

    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    /// Last segment of the request path (empty for the root index).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists(&self) -> bool {
        self.source.exists()
    }

    /// Resolved source file, if the page exists.
    pub fn source(&self) -> Option<&Path> {
        self.source.path()
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source.kind()
    }

    pub fn extra_context(&self) -> &Context {
        &self.extra_context
    }

    /// Whether content has been read and cached.
    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }

    /// Read and parse the source, caching the result.
    ///
    /// Without `reload`, a cached read is returned as the same `Rc`.
    pub fn read(&mut self, reload: bool) -> Result<Rc<PageContent>> {
        let path = self.require_source()?.to_path_buf();

        if !reload {
            if let Some(content) = &self.content {
                return Ok(Rc::clone(content));
            }
        }

        log::debug!("reading {}", path.display());
        let content = Rc::new(self.load(&path)?);
        self.content = Some(Rc::clone(&content));
        Ok(content)
    }

    /// Cached content, reading it first if needed.
    pub fn content(&mut self) -> Result<Rc<PageContent>> {
        self.read(false)
    }

    pub fn body(&mut self) -> Result<String> {
        Ok(self.content()?.body.clone())
    }

    pub fn context(&mut self) -> Result<Context> {
        Ok(self.content()?.context.clone())
    }

    /// Page title from the `title` context key, else derived from the name.
    pub fn title(&mut self) -> Result<String> {
        let content = self.content()?;

        match content.context.get("title") {
            Some(Value::String(title)) if !title.is_empty() => Ok(title.clone()),
            Some(Value::Null) | Some(Value::String(_)) | None => Ok(title_from_name(&self.name)),
            Some(other) => Ok(other.to_string()),
        }
    }

    /// Body as HTML: markdown is rendered, HTML is returned verbatim.
    pub fn as_html(&mut self) -> Result<String> {
        let kind = self.source_kind();
        let content = self.content()?;

        match kind {
            Some(SourceKind::Markdown) => Ok(render_markdown(&content.body)),
            _ => Ok(content.body.clone()),
        }
    }

    fn require_source(&self) -> Result<&Path> {
        self.source.path().ok_or_else(|| PagesError::ReadMissing {
            request_path: self.request_path.clone(),
        })
    }

    fn load(&self, path: &Path) -> Result<PageContent> {
        let raw = fs::read_to_string(path).map_err(|e| PagesError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read page: {}", e),
        })?;

        let (body, context) = frontmatter::parse_document(&raw, &self.extra_context)?;
        Ok(PageContent { body, context })
    }
}

/// `my-cool_post` -> `My Cool Post`.
pub fn title_from_name(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");

    let mut title = String::with_capacity(spaced.len());
    let mut word_start = true;
    for ch in spaced.chars() {
        if ch.is_alphabetic() {
            if word_start {
                title.extend(ch.to_uppercase());
            } else {
                title.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            title.push(ch);
            word_start = true;
        }
    }
    title
}
