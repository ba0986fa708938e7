//! nanopages - Flat-file pages with frontmatter context
//!
//! Resolves a request path to a Markdown or HTML file under a collection
//! root, splits an optional frontmatter header off the top, and merges it
//! with default and caller context ready for a template layer.

pub mod cli;
pub mod collection;
pub mod error;
pub mod frontmatter;
pub mod manifest;
pub mod markdown;
pub mod output;
pub mod page;
pub mod registry;
pub mod resolver;

pub use collection::{PageCollection, Route, RoutePattern};
pub use error::{PagesError, Result};
pub use frontmatter::{Context, FrontmatterBlock, FrontmatterLanguage, DEFAULT_BASE_TEMPLATE};
pub use manifest::{CollectionConfig, Manifest, ManifestFormat};
pub use markdown::render_markdown;
pub use page::{Page, PageContent};
pub use registry::CollectionRegistry;
pub use resolver::{resolve, ResolvedSource, SourceKind};
