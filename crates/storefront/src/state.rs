//! Application state shared across handlers.

use std::sync::Arc;

use gehna_datastore::{DocStore, StoreError};

use crate::catalog::CatalogService;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogService,
}

impl AppState {
    /// State backed by the hosted document store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, StoreError> {
        let store = DocStore::http(&config.docstore.base_url, &config.docstore.api_key)?;
        Ok(Self::with_store(config, store))
    }

    /// State over an explicit store (tests use the in-memory backend).
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: DocStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: CatalogService::new(store),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }
}
