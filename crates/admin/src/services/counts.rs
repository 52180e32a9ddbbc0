//! Category product-count synchronization.
//!
//! `productCount` on a category is a denormalized cache. Product mutations
//! nudge it incrementally; every nudge is best-effort (logged, never
//! surfaced, never retried) and runs *after* the product write it belongs
//! to, so a failed nudge leaves a drifted count rather than a failed
//! mutation. [`CountSync::reconcile`] repairs any drift from a full scan
//! and is safe to run at any time.

use gehna_datastore::{CategoryStore, ProductStore, StoreError};
use tracing::{info, warn};

/// Keeps category `productCount` fields in step with the product collection.
#[derive(Clone)]
pub struct CountSync {
    products: ProductStore,
    categories: CategoryStore,
}

impl CountSync {
    #[must_use]
    pub const fn new(products: ProductStore, categories: CategoryStore) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// A product was created under `category_name`.
    pub async fn record_product_created(&self, category_name: &str) {
        self.adjust(category_name, 1).await;
    }

    /// A product was deleted from `category_name`.
    pub async fn record_product_deleted(&self, category_name: &str) {
        self.adjust(category_name, -1).await;
    }

    /// A product moved categories. Two independent writes; if the first
    /// lands and the second fails the counts drift until reconciliation.
    pub async fn record_category_change(&self, old_name: &str, new_name: &str) {
        self.adjust(old_name, -1).await;
        self.adjust(new_name, 1).await;
    }

    /// Apply a delta to the category matching `name` (trimmed, exact).
    ///
    /// Blank names and unknown categories are logged no-ops. When several
    /// categories share the name, the first document wins. The count never
    /// goes below zero.
    async fn adjust(&self, name: &str, delta: i64) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            warn!("skipping count adjustment for blank category name");
            return;
        }

        let category = match self.categories.find_by_name(trimmed).await {
            Ok(Some(category)) => category,
            Ok(None) => {
                warn!(category = trimmed, "count adjustment for unknown category");
                return;
            }
            Err(error) => {
                warn!(category = trimmed, %error, "count lookup failed");
                return;
            }
        };

        let current = i64::from(category.product_count);
        let next = u32::try_from((current + delta).max(0)).unwrap_or(0);

        if let Err(error) = self.categories.set_product_count(&category.id, next).await {
            warn!(category = trimmed, %error, "count write failed");
        }
    }

    /// Recompute every category's count from a full product scan.
    ///
    /// Idempotent; returns the `(name, count)` pairs that were written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either collection cannot be read. Individual
    /// count writes are still best-effort.
    pub async fn reconcile(&self) -> Result<Vec<(String, u32)>, StoreError> {
        let products = self.products.list().await?;
        let categories = self.categories.list().await?;

        let mut written = Vec::with_capacity(categories.len());
        for category in &categories {
            let count = products
                .iter()
                .filter(|product| product.category.trim() == category.name)
                .count();
            let count = u32::try_from(count).unwrap_or(u32::MAX);

            match self.categories.set_product_count(&category.id, count).await {
                Ok(()) => written.push((category.name.clone(), count)),
                Err(error) => {
                    warn!(category = %category.name, %error, "reconcile write failed");
                }
            }
        }

        info!(categories = written.len(), "category counts reconciled");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gehna_datastore::DocStore;
    use serde_json::json;

    async fn seed_category(store: &DocStore, name: &str, count: u32) -> String {
        store
            .insert(
                "categories",
                json!({"name": name, "slug": name.to_lowercase(), "productCount": count}),
            )
            .await
            .expect("insert category")
    }

    fn sync(store: &DocStore) -> CountSync {
        CountSync::new(
            ProductStore::new(store.clone()),
            CategoryStore::new(store.clone()),
        )
    }

    #[tokio::test]
    async fn test_delete_decrements_three_to_two() {
        let store = DocStore::memory();
        let id = seed_category(&store, "Rings", 3).await;

        sync(&store).record_product_deleted("Rings").await;

        let doc = store.get("categories", &id).await.expect("get");
        assert_eq!(doc.fields["productCount"], json!(2));
    }

    #[tokio::test]
    async fn test_count_floors_at_zero() {
        let store = DocStore::memory();
        let id = seed_category(&store, "Rings", 0).await;

        sync(&store).record_product_deleted("Rings").await;

        let doc = store.get("categories", &id).await.expect("get");
        assert_eq!(doc.fields["productCount"], json!(0));
    }

    #[tokio::test]
    async fn test_blank_and_unknown_names_are_noops() {
        let store = DocStore::memory();
        let id = seed_category(&store, "Rings", 5).await;

        let counts = sync(&store);
        counts.record_product_created("   ").await;
        counts.record_product_created("Bracelets").await;

        let doc = store.get("categories", &id).await.expect("get");
        assert_eq!(doc.fields["productCount"], json!(5));
    }

    #[tokio::test]
    async fn test_category_change_moves_one_count() {
        let store = DocStore::memory();
        let rings = seed_category(&store, "Rings", 2).await;
        let chains = seed_category(&store, "Chains", 7).await;

        sync(&store).record_category_change("Rings", "Chains").await;

        assert_eq!(
            store.get("categories", &rings).await.expect("get").fields["productCount"],
            json!(1)
        );
        assert_eq!(
            store.get("categories", &chains).await.expect("get").fields["productCount"],
            json!(8)
        );
    }

    #[tokio::test]
    async fn test_reconcile_repairs_drift() {
        let store = DocStore::memory();
        let id = seed_category(&store, "Rings", 99).await;
        for name in ["Gold Ring", "Silver Ring"] {
            store
                .insert(
                    "products",
                    json!({"name": name, "price": 500, "category": "Rings"}),
                )
                .await
                .expect("insert product");
        }

        let written = sync(&store).reconcile().await.expect("reconcile");
        assert_eq!(written, vec![("Rings".to_owned(), 2)]);

        let doc = store.get("categories", &id).await.expect("get");
        assert_eq!(doc.fields["productCount"], json!(2));

        // idempotent
        let again = sync(&store).reconcile().await.expect("reconcile");
        assert_eq!(again, vec![("Rings".to_owned(), 2)]);
    }
}
