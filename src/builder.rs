//! Builder for `DocumentLibrary`.

use std::sync::Arc;

use crate::config::{LibraryConfig, StoreConfig};
use crate::engine::DocumentLibrary;
use crate::error::StoreError;
use crate::store::{DocumentStore, InMemoryStore, JsonDirStore};

/// Assembles a `DocumentLibrary` from configuration, optionally with a
/// caller-supplied store.
#[derive(Default)]
pub struct LibraryBuilder {
    config: LibraryConfig,
    store: Option<Arc<dyn DocumentStore>>,
}

impl LibraryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: LibraryConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Use this store instead of the one named in the config.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.class_prefix = prefix.into();
        self
    }

    pub fn with_download_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.download_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Result<DocumentLibrary, StoreError> {
        let store = match self.store {
            Some(store) => store,
            None => open_store(&self.config.store)?,
        };
        Ok(DocumentLibrary::new(store, self.config))
    }
}

fn open_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    Ok(match config {
        StoreConfig::Memory => Arc::new(InMemoryStore::new()),
        StoreConfig::JsonDir { path } => Arc::new(JsonDirStore::open(path)?),
    })
}
