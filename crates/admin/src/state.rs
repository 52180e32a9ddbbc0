//! Application state shared across admin handlers.

use std::sync::Arc;

use gehna_datastore::{CategoryStore, DocStore, OrderStore, ProductStore, SearchTermStore};

use crate::config::AdminConfig;
use crate::error::AppError;
use crate::services::auth::IdentityClient;
use crate::services::catalog::AdminCatalog;
use crate::services::images::ImageClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: AdminCatalog,
    identity: IdentityClient,
    images: ImageClient,
    orders: OrderStore,
    search_terms: SearchTermStore,
}

impl AppState {
    /// State backed by the hosted document store, identity provider, and
    /// image CDN.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if any of the backing clients cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, AppError> {
        let store = DocStore::http(&config.docstore.base_url, &config.docstore.api_key)
            .map_err(AppError::from)?;
        let identity = IdentityClient::new(&config.auth)?;
        let images = ImageClient::new(&config.imagecdn);
        Ok(Self::with_clients(config, store, identity, images))
    }

    /// State over explicit clients (tests use the in-memory backend).
    #[must_use]
    pub fn with_clients(
        config: AdminConfig,
        store: DocStore,
        identity: IdentityClient,
        images: ImageClient,
    ) -> Self {
        let catalog = AdminCatalog::new(
            ProductStore::new(store.clone()),
            CategoryStore::new(store.clone()),
            images.clone(),
        );
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                identity,
                images,
                orders: OrderStore::new(store.clone()),
                search_terms: SearchTermStore::new(store),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &AdminCatalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    #[must_use]
    pub fn images(&self) -> &ImageClient {
        &self.inner.images
    }

    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    #[must_use]
    pub fn search_terms(&self) -> &SearchTermStore {
        &self.inner.search_terms
    }
}
