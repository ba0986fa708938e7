//! Site manifest (pages.yaml / pages.json) parsing.
//!
//! The manifest lists the page collections an application serves:
//!
//! ```yaml
//! collections:
//!   - path: pages
//!     name: site
//!     mount: /
//!     context:
//!       site_title: nanopages example
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::collection::PageCollection;
use crate::error::{PagesError, Result};
use crate::frontmatter::Context;
use crate::registry::CollectionRegistry;

/// Manifest file names looked up in a project directory, in order.
pub const MANIFEST_FILENAMES: [&str; 3] = ["pages.yaml", "pages.yml", "pages.json"];

/// Manifest file format, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Detect the format from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(ManifestFormat::Yaml),
            "json" => Some(ManifestFormat::Json),
            _ => None,
        }
    }
}

/// Project manifest listing page collections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Collections in lookup order.
    pub collections: Vec<CollectionConfig>,
}

/// One collection entry in the manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionConfig {
    /// Root directory, relative to the manifest.
    pub path: PathBuf,

    /// Unique name. Defaults to the directory name.
    #[serde(default)]
    pub name: Option<String>,

    /// URL prefix.
    #[serde(default = "default_mount")]
    pub mount: String,

    /// Default context shared by every page.
    #[serde(default)]
    pub context: Context,
}

fn default_mount() -> String {
    "/".to_string()
}

impl CollectionConfig {
    /// Build the collection, resolving a relative path against `base_dir`.
    pub fn to_collection(&self, base_dir: &Path) -> PageCollection {
        let collection = PageCollection::in_dir(base_dir, &self.path)
            .with_mount(&self.mount)
            .with_context(self.context.clone());

        match &self.name {
            Some(name) => collection.with_name(name.clone()),
            None => collection,
        }
    }
}

impl Manifest {
    /// Find a manifest file in `dir`.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        MANIFEST_FILENAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Load a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ManifestFormat::from_path(path).ok_or_else(|| PagesError::Config {
            message: format!("Unknown manifest format: {}", path.display()),
            help: Some("Use a .yaml, .yml or .json manifest".to_string()),
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| PagesError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content, format)
    }

    /// Parse a manifest from a string.
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self> {
        match format {
            ManifestFormat::Json => serde_json::from_str(content).map_err(|e| PagesError::Config {
                message: format!("Invalid manifest: {}", e),
                help: Some("Check pages.json syntax".to_string()),
            }),
            ManifestFormat::Yaml => Self::parse_yaml(content),
        }
    }

    #[cfg(feature = "yaml")]
    fn parse_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PagesError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check pages.yaml syntax".to_string()),
        })
    }

    #[cfg(not(feature = "yaml"))]
    fn parse_yaml(_content: &str) -> Result<Self> {
        Err(PagesError::YamlUnavailable)
    }

    /// Build a registry, resolving collection paths against `base_dir`.
    pub fn into_registry(self, base_dir: &Path) -> Result<CollectionRegistry> {
        let mut registry = CollectionRegistry::new();
        for config in &self.collections {
            registry.register(config.to_collection(base_dir))?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_json() {
        let manifest = Manifest::parse(
            r#"{"collections": [{"path": "pages", "context": {"site_title": "Example"}}]}"#,
            ManifestFormat::Json,
        )
        .unwrap();

        assert_eq!(manifest.collections.len(), 1);
        let config = &manifest.collections[0];
        assert_eq!(config.path, PathBuf::from("pages"));
        assert_eq!(config.name, None);
        assert_eq!(config.mount, "/");
        assert_eq!(config.context["site_title"], "Example");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_parse_yaml() {
        let manifest = Manifest::parse(
            r#"
collections:
  - path: pages
    name: site
  - path: docs
    mount: /docs/
    context:
      version: 2
"#,
            ManifestFormat::Yaml,
        )
        .unwrap();

        assert_eq!(manifest.collections.len(), 2);
        assert_eq!(manifest.collections[0].name.as_deref(), Some("site"));
        assert_eq!(manifest.collections[1].mount, "/docs/");
        assert_eq!(manifest.collections[1].context["version"], 2);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_parse_empty_yaml() {
        let manifest = Manifest::parse("", ManifestFormat::Yaml).unwrap();

        assert!(manifest.collections.is_empty());
    }

    #[test]
    fn test_parse_invalid() {
        let result = Manifest::parse("{not json", ManifestFormat::Json);

        assert!(matches!(result, Err(PagesError::Config { .. })));
    }

    #[test]
    fn test_load_unknown_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pages.toml");
        fs::write(&path, "").unwrap();

        assert!(matches!(Manifest::load(&path), Err(PagesError::Config { .. })));
    }

    #[test]
    fn test_find() {
        let dir = tempdir().unwrap();
        assert_eq!(Manifest::find(dir.path()), None);

        fs::write(dir.path().join("pages.json"), "{}").unwrap();
        assert_eq!(Manifest::find(dir.path()), Some(dir.path().join("pages.json")));

        fs::write(dir.path().join("pages.yaml"), "").unwrap();
        assert_eq!(Manifest::find(dir.path()), Some(dir.path().join("pages.yaml")));
    }

    #[test]
    fn test_into_registry() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/about.md"), "# About").unwrap();
        let path = dir.path().join("pages.json");
        let manifest = r#"{"collections": [
            {"path": "pages", "name": "site", "context": {"site_title": "Example"}}
        ]}"#;
        fs::write(&path, manifest).unwrap();

        let registry = Manifest::load(&path).unwrap().into_registry(dir.path()).unwrap();
        let site = registry.get("site").unwrap();
        let mut page = site.get_page("about").unwrap();

        assert_eq!(page.context().unwrap()["site_title"], "Example");
    }

    #[test]
    fn test_into_registry_duplicate_names() {
        let dir = tempdir().unwrap();
        let manifest = Manifest::parse(
            r#"{"collections": [{"path": "a", "name": "x"}, {"path": "b", "name": "x"}]}"#,
            ManifestFormat::Json,
        )
        .unwrap();

        assert!(manifest.into_registry(dir.path()).is_err());
    }
}
