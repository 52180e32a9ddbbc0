//! Popular-search collection store.

use gehna_core::records::PopularSearch;
use gehna_core::types::SearchTermId;

use crate::client::{DocStore, SortDirection};
use crate::error::StoreError;

use super::{decode_all, decode_one};

const COLLECTION: &str = "popularSearches";

/// Typed access to the `popularSearches` collection.
#[derive(Clone)]
pub struct SearchTermStore {
    store: DocStore,
}

impl SearchTermStore {
    #[must_use]
    pub const fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// All terms by rank, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store call fails.
    pub async fn list(&self) -> Result<Vec<PopularSearch>, StoreError> {
        let documents = self
            .store
            .list_ordered(COLLECTION, "order", SortDirection::Ascending)
            .await?;
        Ok(decode_all(COLLECTION, documents, |id, fields| {
            PopularSearch::decode(SearchTermId::new(id), fields)
        }))
    }

    /// A single term by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn get(&self, id: &SearchTermId) -> Result<PopularSearch, StoreError> {
        let document = self.store.get(COLLECTION, id.as_str()).await?;
        decode_one(COLLECTION, &document, |id, fields| {
            PopularSearch::decode(SearchTermId::new(id), fields)
        })
    }

    /// Insert a new term.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    pub async fn create(&self, term: &PopularSearch) -> Result<SearchTermId, StoreError> {
        let id = self.store.insert(COLLECTION, term.fields()).await?;
        Ok(SearchTermId::new(id))
    }

    /// Overwrite a term.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn update(&self, term: &PopularSearch) -> Result<(), StoreError> {
        self.store
            .update(COLLECTION, term.id.as_str(), term.fields())
            .await
    }

    /// Delete a term document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: &SearchTermId) -> Result<(), StoreError> {
        self.store.delete(COLLECTION, id.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_orders_ascending() {
        let terms = SearchTermStore::new(DocStore::memory());
        for (term, order) in [("bridal", 3), ("gold ring", 1), ("kundan", 2)] {
            terms
                .create(&PopularSearch {
                    id: SearchTermId::new(""),
                    term: term.to_owned(),
                    order,
                })
                .await
                .expect("create");
        }

        let listed = terms.list().await.expect("list");
        let ranked: Vec<_> = listed.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(ranked, vec!["gold ring", "kundan", "bridal"]);
    }
}
