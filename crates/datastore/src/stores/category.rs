//! Category collection store.

use gehna_core::records::Category;
use gehna_core::types::CategoryId;
use serde_json::json;

use crate::client::{DocStore, SortDirection};
use crate::error::StoreError;

use super::{decode_all, decode_one, now_timestamp};

const COLLECTION: &str = "categories";

/// Typed access to the `categories` collection.
#[derive(Clone)]
pub struct CategoryStore {
    store: DocStore,
}

impl CategoryStore {
    #[must_use]
    pub const fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// All categories by display rank, ties in document order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store call fails.
    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let documents = self
            .store
            .list_ordered(COLLECTION, "order", SortDirection::Ascending)
            .await?;
        Ok(decode_all(COLLECTION, documents, |id, fields| {
            Category::decode(CategoryId::new(id), fields)
        }))
    }

    /// A single category by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Decode`] for a document that fails validation.
    pub async fn get(&self, id: &CategoryId) -> Result<Category, StoreError> {
        let document = self.store.get(COLLECTION, id.as_str()).await?;
        decode_one(COLLECTION, &document, |id, fields| {
            Category::decode(CategoryId::new(id), fields)
        })
    }

    /// Look up a category by exact (trimmed) name.
    ///
    /// A blank name, or zero matches, resolves to `None`. When several
    /// documents share the name the first one wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store call fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let documents = self
            .store
            .find_by_field(COLLECTION, "name", &json!(trimmed))
            .await?;
        let Some(document) = documents.first() else {
            return Ok(None);
        };
        decode_one(COLLECTION, document, |id, fields| {
            Category::decode(CategoryId::new(id), fields)
        })
        .map(Some)
    }

    /// Overwrite a category's denormalized product count.
    ///
    /// Read-modify-write at the document level; last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn set_product_count(
        &self,
        id: &CategoryId,
        count: u32,
    ) -> Result<(), StoreError> {
        let mut document = self.store.get(COLLECTION, id.as_str()).await?;
        document.fields["productCount"] = json!(count);
        self.store
            .update(COLLECTION, id.as_str(), document.fields)
            .await
    }

    /// Insert a new category, stamping `createdAt`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    pub async fn create(&self, category: &Category) -> Result<CategoryId, StoreError> {
        let mut fields = category.fields();
        fields["createdAt"] = now_timestamp();
        let id = self.store.insert(COLLECTION, fields).await?;
        Ok(CategoryId::new(id))
    }

    /// Overwrite a category.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn update(&self, category: &Category) -> Result<(), StoreError> {
        let mut fields = category.fields();
        if let Some(created_at) = category.created_at {
            fields["createdAt"] = serde_json::Value::String(created_at.to_rfc3339());
        }
        self.store
            .update(COLLECTION, category.id.as_str(), fields)
            .await
    }

    /// Delete a category document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: &CategoryId) -> Result<(), StoreError> {
        self.store.delete(COLLECTION, id.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, order: i64) -> Category {
        Category {
            id: CategoryId::new(""),
            name: name.to_owned(),
            slug: gehna_core::text::slugify(name),
            image: None,
            product_count: 0,
            order,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_rank() {
        let categories = CategoryStore::new(DocStore::memory());
        categories.create(&sample("Earrings", 2)).await.expect("create");
        categories.create(&sample("Rings", 1)).await.expect("create");

        let listed = categories.list().await.expect("list");
        let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rings", "Earrings"]);
    }

    #[tokio::test]
    async fn test_find_by_name_trims_and_misses() {
        let categories = CategoryStore::new(DocStore::memory());
        categories.create(&sample("Rings", 1)).await.expect("create");

        let found = categories.find_by_name("  Rings ").await.expect("query");
        assert_eq!(found.map(|c| c.name), Some("Rings".to_owned()));
        assert!(categories.find_by_name("rings").await.expect("query").is_none());
        assert!(categories.find_by_name("   ").await.expect("query").is_none());
    }

    #[tokio::test]
    async fn test_set_product_count_overwrites() {
        let categories = CategoryStore::new(DocStore::memory());
        let id = categories.create(&sample("Rings", 1)).await.expect("create");
        categories.set_product_count(&id, 7).await.expect("set");
        let stored = categories.get(&id).await.expect("get");
        assert_eq!(stored.product_count, 7);
    }
}
