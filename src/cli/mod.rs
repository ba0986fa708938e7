pub mod completions;
pub mod list;
pub mod render;
pub mod routes;
pub mod show;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::collection::PageCollection;
use crate::error::{PagesError, Result};
use crate::frontmatter::Context;
use crate::manifest::Manifest;
use crate::page::Page;
use crate::registry::CollectionRegistry;

/// nanopages - Flat-file Markdown and HTML pages
#[derive(Parser, Debug)]
#[command(name = "nanopages")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a page body as HTML
    Render(render::RenderArgs),

    /// Show a page's title and merged context
    Show(show::ShowArgs),

    /// List every request path in each collection
    List(list::ListArgs),

    /// Print the routes each collection serves
    Routes(routes::RoutesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Where to find page collections.
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Serve a single collection from this directory
    #[arg(long, conflicts_with = "manifest")]
    pub root: Option<PathBuf>,

    /// Collection name when using --root
    #[arg(long, requires = "root")]
    pub name: Option<String>,

    /// URL prefix when using --root
    #[arg(long, default_value = "/")]
    pub mount: String,

    /// Manifest file (default: pages.yaml or pages.json in the current directory)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl SiteArgs {
    /// Build the collection registry these arguments describe.
    pub fn load_registry(&self) -> Result<CollectionRegistry> {
        if let Some(root) = &self.root {
            let mut collection = PageCollection::new(root)?.with_mount(&self.mount);
            if let Some(name) = &self.name {
                collection = collection.with_name(name.clone());
            }
            let mut registry = CollectionRegistry::new();
            registry.register(collection)?;
            return Ok(registry);
        }

        let manifest_path = match &self.manifest {
            Some(path) => path.clone(),
            None => Manifest::find(std::path::Path::new(".")).ok_or_else(|| PagesError::Config {
                message: "No pages.yaml or pages.json found".to_string(),
                help: Some("Pass --root <dir> or --manifest <file>".to_string()),
            })?,
        };

        let base_dir = manifest_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Manifest::load(&manifest_path)?.into_registry(&base_dir)
    }
}

/// Arguments naming one page by URL.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// URL of the page, e.g. /blog/cookies/ (slashes optional)
    #[arg(default_value = "/")]
    pub url: String,

    /// Extra context for this request (repeatable)
    #[arg(long = "context", short = 'c', value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub context: Vec<(String, String)>,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl PageArgs {
    /// Look up the page this request names.
    pub fn find_page(&self, registry: &CollectionRegistry) -> Result<Page> {
        let url = normalize_url(&self.url);

        let mut extra = Context::new();
        for (key, value) in &self.context {
            extra.insert(key.clone(), Value::String(value.clone()));
        }

        registry
            .resolve_url(&url)
            .and_then(|(collection, request_path)| collection.get_page_with(&request_path, &extra))
            .ok_or(PagesError::NotFound { url })
    }
}

/// `blog/cookies` -> `/blog/cookies/`.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(""), "/");
        assert_eq!(normalize_url("/"), "/");
        assert_eq!(normalize_url("about"), "/about/");
        assert_eq!(normalize_url("/blog/cookies"), "/blog/cookies/");
        assert_eq!(normalize_url("/blog/cookies/"), "/blog/cookies/");
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("user=ada=lovelace").unwrap(),
            ("user".to_string(), "ada=lovelace".to_string())
        );
        assert!(parse_key_value("no-equals").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "nanopages", "render", "blog/cookies", "--root", "pages", "-c", "user=ada",
        ])
        .unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.page.url, "blog/cookies");
                assert_eq!(args.page.site.root, Some(PathBuf::from("pages")));
                assert_eq!(args.page.context, vec![("user".to_string(), "ada".to_string())]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_root_conflicts_with_manifest() {
        let result = Cli::try_parse_from([
            "nanopages", "list", "--root", "pages", "--manifest", "pages.yaml",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_find_page_with_request_context() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("blog/cookies.md"), "# Cookies").unwrap();

        let args = PageArgs {
            url: "blog/cookies".to_string(),
            context: vec![("user".to_string(), "ada".to_string())],
            site: SiteArgs {
                root: Some(dir.path().to_path_buf()),
                mount: "/".to_string(),
                ..Default::default()
            },
        };
        let registry = args.site.load_registry().unwrap();
        let mut page = args.find_page(&registry).unwrap();

        assert_eq!(page.context().unwrap()["user"], "ada");
    }

    #[test]
    fn test_find_page_missing() {
        let dir = tempdir().unwrap();

        let args = PageArgs {
            url: "/missing/".to_string(),
            context: vec![],
            site: SiteArgs {
                root: Some(dir.path().to_path_buf()),
                mount: "/".to_string(),
                ..Default::default()
            },
        };
        let registry = args.site.load_registry().unwrap();

        match args.find_page(&registry) {
            Err(PagesError::NotFound { url }) => assert_eq!(url, "/missing/"),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn test_load_registry_from_manifest() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();
        let manifest = dir.path().join("pages.json");
        fs::write(&manifest, r#"{"collections": [{"path": "pages", "name": "site"}]}"#).unwrap();

        let site = SiteArgs {
            manifest: Some(manifest),
            ..Default::default()
        };
        let registry = site.load_registry().unwrap();

        assert!(registry.get("site").is_some());
    }
}
