//! Catalog fetch layer.
//!
//! Wraps the typed stores with a 5-minute `moka` cache. Listings are cached
//! per key; product detail lookups always go to the store so an admin edit
//! shows up immediately on the detail page.

pub mod pipeline;

use std::sync::Arc;
use std::time::Duration;

use gehna_core::records::{Category, PopularSearch, Product};
use gehna_core::types::ProductId;
use gehna_datastore::{
    CategoryStore, DocStore, ProductStore, SearchTermStore, StoreError,
};
use moka::future::Cache;
use tracing::debug;

/// Cache TTL for catalog listings.
const CACHE_TTL: Duration = Duration::from_secs(300);

const PRODUCTS_KEY: &str = "products";
const CATEGORIES_KEY: &str = "categories";
const TERMS_KEY: &str = "terms";

#[derive(Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Categories(Arc<Vec<Category>>),
    Terms(Arc<Vec<PopularSearch>>),
}

/// Read-side catalog access shared across handlers.
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    products: ProductStore,
    categories: CategoryStore,
    search_terms: SearchTermStore,
    cache: Cache<String, CacheValue>,
}

impl CatalogService {
    #[must_use]
    pub fn new(store: DocStore) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogInner {
                products: ProductStore::new(store.clone()),
                categories: CategoryStore::new(store.clone()),
                search_terms: SearchTermStore::new(store),
                cache,
            }),
        }
    }

    /// The full product list, cached.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, StoreError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(PRODUCTS_KEY).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products = Arc::new(self.inner.products.list().await?);
        self.inner
            .cache
            .insert(
                PRODUCTS_KEY.to_owned(),
                CacheValue::Products(Arc::clone(&products)),
            )
            .await;
        Ok(products)
    }

    /// All categories by display rank, cached.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable.
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, StoreError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(CATEGORIES_KEY).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories = Arc::new(self.inner.categories.list().await?);
        self.inner
            .cache
            .insert(
                CATEGORIES_KEY.to_owned(),
                CacheValue::Categories(Arc::clone(&categories)),
            )
            .await;
        Ok(categories)
    }

    /// Popular search terms by rank, cached.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable.
    pub async fn popular_searches(&self) -> Result<Arc<Vec<PopularSearch>>, StoreError> {
        if let Some(CacheValue::Terms(terms)) = self.inner.cache.get(TERMS_KEY).await {
            debug!("Cache hit for popular searches");
            return Ok(terms);
        }

        let terms = Arc::new(self.inner.search_terms.list().await?);
        self.inner
            .cache
            .insert(TERMS_KEY.to_owned(), CacheValue::Terms(Arc::clone(&terms)))
            .await;
        Ok(terms)
    }

    /// A single product, fetched fresh.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn product(&self, id: &ProductId) -> Result<Product, StoreError> {
        self.inner.products.get(id).await
    }

    /// A category's products, newest first (uncached; one query per view).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable.
    pub async fn category_products(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        self.inner.products.by_category(name).await
    }

    /// Readiness probe: one uncached round trip to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.inner.categories.list().await.map(|_| ())
    }
}
