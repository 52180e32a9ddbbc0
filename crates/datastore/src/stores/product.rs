//! Product collection store.

use gehna_core::records::Product;
use gehna_core::types::ProductId;
use serde_json::json;

use crate::client::DocStore;
use crate::error::StoreError;

use super::{decode_all, decode_one, now_timestamp};

const COLLECTION: &str = "products";

/// Typed access to the `products` collection.
#[derive(Clone)]
pub struct ProductStore {
    store: DocStore,
}

impl ProductStore {
    #[must_use]
    pub const fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// All products, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store call fails.
    pub async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let documents = self.store.list(COLLECTION).await?;
        Ok(decode_all(COLLECTION, documents, |id, fields| {
            Product::decode(ProductId::new(id), fields)
        }))
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Decode`] for a document that fails validation.
    pub async fn get(&self, id: &ProductId) -> Result<Product, StoreError> {
        let document = self.store.get(COLLECTION, id.as_str()).await?;
        decode_one(COLLECTION, &document, |id, fields| {
            Product::decode(ProductId::new(id), fields)
        })
    }

    /// Products of one category (exact name match), newest first.
    ///
    /// Products without a creation date sort last.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store call fails.
    pub async fn by_category(&self, category_name: &str) -> Result<Vec<Product>, StoreError> {
        let documents = self
            .store
            .find_by_field(COLLECTION, "category", &json!(category_name))
            .await?;
        let mut products = decode_all(COLLECTION, documents, |id, fields| {
            Product::decode(ProductId::new(id), fields)
        });
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// Insert a new product, stamping `createdAt`/`updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    pub async fn create(&self, product: &Product) -> Result<ProductId, StoreError> {
        let mut fields = product.fields();
        let now = now_timestamp();
        fields["createdAt"] = now.clone();
        fields["updatedAt"] = now;
        let id = self.store.insert(COLLECTION, fields).await?;
        Ok(ProductId::new(id))
    }

    /// Overwrite a product, restamping `updatedAt` and keeping `createdAt`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut fields = product.fields();
        if let Some(created_at) = product.created_at {
            fields["createdAt"] = serde_json::Value::String(created_at.to_rfc3339());
        }
        fields["updatedAt"] = now_timestamp();
        self.store
            .update(COLLECTION, product.id.as_str(), fields)
            .await
    }

    /// Delete a product document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        self.store.delete(COLLECTION, id.as_str()).await
    }
}
