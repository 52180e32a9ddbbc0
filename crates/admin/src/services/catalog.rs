//! Admin catalog mutations.
//!
//! Every product/category write flows through [`AdminCatalog`] so the two
//! side effects a bare store write would miss always happen: orphaned CDN
//! images get deleted and category product counts get nudged. Image deletes
//! run *before* the metadata write (a failed delete only leaks a CDN asset,
//! never dangles a stored reference) and are best-effort; count nudges run
//! *after* and are best-effort too.

use gehna_core::records::{Category, ImageRef, Product};
use gehna_core::types::{CategoryId, ProductId};
use gehna_datastore::{CategoryStore, ProductStore, StoreError};
use tracing::warn;

use super::counts::CountSync;
use super::images::{ImageClient, public_id_from_url};

/// Coordinates catalog writes with the image CDN and count sync.
#[derive(Clone)]
pub struct AdminCatalog {
    products: ProductStore,
    categories: CategoryStore,
    images: ImageClient,
    counts: CountSync,
}

impl AdminCatalog {
    #[must_use]
    pub fn new(products: ProductStore, categories: CategoryStore, images: ImageClient) -> Self {
        let counts = CountSync::new(products.clone(), categories.clone());
        Self {
            products,
            categories,
            images,
            counts,
        }
    }

    #[must_use]
    pub const fn products(&self) -> &ProductStore {
        &self.products
    }

    #[must_use]
    pub const fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    #[must_use]
    pub const fn counts(&self) -> &CountSync {
        &self.counts
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Create a product and bump its category's count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the product write fails. The count nudge
    /// never fails the call.
    pub async fn create_product(&self, product: &Product) -> Result<ProductId, StoreError> {
        let id = self.products.create(product).await?;
        self.counts.record_product_created(&product.category).await;
        Ok(id)
    }

    /// Overwrite a product, deleting images it no longer references and
    /// moving its category count if the category changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, other variants if
    /// the write fails.
    pub async fn update_product(&self, product: &Product) -> Result<(), StoreError> {
        let existing = self.products.get(&product.id).await?;

        let removed = existing
            .images
            .iter()
            .filter(|old| !product.images.iter().any(|new| new.url == old.url));
        for image in removed {
            self.destroy_image(image).await;
        }

        self.products.update(product).await?;

        if existing.category != product.category {
            self.counts
                .record_category_change(&existing.category, &product.category)
                .await;
        }
        Ok(())
    }

    /// Delete a product, its CDN images, and its category count entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        let existing = self.products.get(id).await?;

        for image in &existing.images {
            self.destroy_image(image).await;
        }

        self.products.delete(id).await?;
        self.counts
            .record_product_deleted(&existing.category)
            .await;
        Ok(())
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub async fn create_category(&self, category: &Category) -> Result<CategoryId, StoreError> {
        self.categories.create(category).await
    }

    /// Overwrite a category, deleting its old CDN image when it was
    /// replaced or removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, other variants if
    /// the write fails.
    pub async fn update_category(&self, category: &Category) -> Result<(), StoreError> {
        let existing = self.categories.get(&category.id).await?;

        if let Some(old_image) = &existing.image {
            let kept = category
                .image
                .as_ref()
                .is_some_and(|new| new.url == old_image.url);
            if !kept {
                self.destroy_image(old_image).await;
            }
        }

        self.categories.update(category).await
    }

    /// Delete a category and its CDN image. Products keep their denormalized
    /// category name; counts are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), StoreError> {
        let existing = self.categories.get(id).await?;

        if let Some(image) = &existing.image {
            self.destroy_image(image).await;
        }

        self.categories.delete(id).await
    }

    /// Best-effort CDN delete. Legacy entries without a stored identifier
    /// fall back to deriving one from the URL.
    async fn destroy_image(&self, image: &ImageRef) {
        let public_id = image
            .public_id
            .clone()
            .or_else(|| public_id_from_url(&image.url));

        let Some(public_id) = public_id else {
            warn!(url = %image.url, "image has no CDN identifier, skipping delete");
            return;
        };

        if let Err(error) = self.images.destroy(&public_id).await {
            warn!(%public_id, %error, "image delete failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageCdnConfig;
    use gehna_datastore::DocStore;
    use rust_decimal::Decimal;
    use secrecy::SecretString;
    use serde_json::json;

    fn unreachable_image_client() -> ImageClient {
        let config = ImageCdnConfig {
            cloud_name: "test".to_owned(),
            upload_preset: "unsigned_uploads".to_owned(),
            api_key: "key".to_owned(),
            api_secret: SecretString::from("secret"),
        };
        // no CDN listening here; deletes fail and are swallowed
        ImageClient::with_base_url(&config, "http://127.0.0.1:9")
    }

    fn catalog(store: &DocStore) -> AdminCatalog {
        AdminCatalog::new(
            ProductStore::new(store.clone()),
            CategoryStore::new(store.clone()),
            unreachable_image_client(),
        )
    }

    fn sample_product(category: &str) -> Product {
        Product {
            id: ProductId::new(""),
            name: "Gold Ring".to_owned(),
            description: String::new(),
            price: Decimal::from(1500),
            original_price: Decimal::from(1500),
            images: vec![ImageRef {
                url: "https://cdn.example/v1/catalog/ring.jpg".to_owned(),
                public_id: Some("catalog/ring".to_owned()),
            }],
            category: category.to_owned(),
            tags: Vec::new(),
            in_stock: true,
            stock_quantity: 2,
            rating: None,
            customizable: false,
            created_at: None,
            updated_at: None,
        }
    }

    async fn seed_category(store: &DocStore, name: &str, count: u32) -> String {
        store
            .insert(
                "categories",
                json!({"name": name, "slug": name.to_lowercase(), "productCount": count}),
            )
            .await
            .expect("insert category")
    }

    async fn stored_count(store: &DocStore, id: &str) -> serde_json::Value {
        store.get("categories", id).await.expect("get").fields["productCount"].clone()
    }

    #[tokio::test]
    async fn test_create_product_bumps_count() {
        let store = DocStore::memory();
        let rings = seed_category(&store, "Rings", 0).await;

        catalog(&store)
            .create_product(&sample_product("Rings"))
            .await
            .expect("create");

        assert_eq!(stored_count(&store, &rings).await, json!(1));
    }

    #[tokio::test]
    async fn test_delete_product_survives_unreachable_cdn() {
        let store = DocStore::memory();
        let rings = seed_category(&store, "Rings", 1).await;

        let admin = catalog(&store);
        let id = admin
            .create_product(&sample_product("Rings"))
            .await
            .expect("create");
        admin.delete_product(&id).await.expect("delete");

        assert!(admin.products().get(&id).await.is_err());
        assert_eq!(stored_count(&store, &rings).await, json!(1));
    }

    #[tokio::test]
    async fn test_category_change_moves_count() {
        let store = DocStore::memory();
        let rings = seed_category(&store, "Rings", 0).await;
        let chains = seed_category(&store, "Chains", 0).await;

        let admin = catalog(&store);
        let id = admin
            .create_product(&sample_product("Rings"))
            .await
            .expect("create");

        let mut updated = admin.products().get(&id).await.expect("get");
        updated.category = "Chains".to_owned();
        admin.update_product(&updated).await.expect("update");

        assert_eq!(stored_count(&store, &rings).await, json!(0));
        assert_eq!(stored_count(&store, &chains).await, json!(1));
    }

    #[tokio::test]
    async fn test_update_keeping_images_writes_through() {
        let store = DocStore::memory();
        seed_category(&store, "Rings", 0).await;

        let admin = catalog(&store);
        let id = admin
            .create_product(&sample_product("Rings"))
            .await
            .expect("create");

        let mut updated = admin.products().get(&id).await.expect("get");
        updated.name = "Rose Gold Ring".to_owned();
        admin.update_product(&updated).await.expect("update");

        let stored = admin.products().get(&id).await.expect("get");
        assert_eq!(stored.name, "Rose Gold Ring");
        assert_eq!(stored.images.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_category_keeps_counts_elsewhere() {
        let store = DocStore::memory();
        let rings = seed_category(&store, "Rings", 3).await;
        let chains = seed_category(&store, "Chains", 2).await;

        let admin = catalog(&store);
        admin
            .delete_category(&CategoryId::new(chains.clone()))
            .await
            .expect("delete");

        assert!(store.get("categories", &chains).await.is_err());
        assert_eq!(stored_count(&store, &rings).await, json!(3));
    }
}
