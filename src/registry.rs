//! Registry of page collections served by one application.
//!
//! The registry enforces unique collection names, lists the directories a
//! file watcher should follow, and maps URLs or changed files back to the
//! collection that owns them.

use std::path::{Path, PathBuf};

use crate::collection::PageCollection;
use crate::error::{PagesError, Result};
use crate::resolver::normalize;

/// Collections in registration order.
#[derive(Debug, Default)]
pub struct CollectionRegistry {
    collections: Vec<PageCollection>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection, rejecting a name that is already taken.
    pub fn register(&mut self, collection: PageCollection) -> Result<&PageCollection> {
        if let Some(existing) = self.get(collection.name()) {
            return Err(PagesError::Config {
                message: format!(
                    "Collection name '{}' for {} also used for {}",
                    collection.name(),
                    collection.root().display(),
                    existing.root().display()
                ),
                help: Some("Give each collection a unique name".to_string()),
            });
        }

        log::debug!(
            "registered collection '{}' at {}",
            collection.name(),
            collection.root().display()
        );
        self.collections.push(collection);
        let index = self.collections.len() - 1;
        Ok(&self.collections[index])
    }

    /// Get a collection by name.
    pub fn get(&self, name: &str) -> Option<&PageCollection> {
        self.collections.iter().find(|c| c.name() == name)
    }

    /// Remove a collection by name.
    pub fn unregister(&mut self, name: &str) -> Option<PageCollection> {
        let index = self.collections.iter().position(|c| c.name() == name)?;
        Some(self.collections.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageCollection> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn clear(&mut self) {
        self.collections.clear();
    }

    /// Root directories to watch recursively for changes.
    pub fn watch_dirs(&self) -> Vec<PathBuf> {
        self.collections.iter().map(|c| c.root().to_path_buf()).collect()
    }

    /// The collection whose root contains `path`, if any.
    pub fn owner_of(&self, path: &Path) -> Option<&PageCollection> {
        let path = normalize(path);
        self.collections.iter().find(|c| path.starts_with(c.root()))
    }

    /// First collection whose routes match `url`, with the request path.
    pub fn resolve_url(&self, url: &str) -> Option<(&PageCollection, String)> {
        self.collections
            .iter()
            .find_map(|c| c.match_url(url).map(|request_path| (c, request_path)))
    }
}

impl<'a> IntoIterator for &'a CollectionRegistry {
    type Item = &'a PageCollection;
    type IntoIter = std::slice::Iter<'a, PageCollection>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}
