//! Wishlist container.
//!
//! A membership set of product ids. The set invariant lives inside the
//! container, so callers never need their own duplicate check before
//! adding. Insertion order is kept for display.

use gehna_core::types::ProductId;
use serde::{Deserialize, Serialize};

/// Session-persisted wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.ids.contains(product_id)
    }

    /// Add a product id. Idempotent.
    pub fn add(&mut self, product_id: ProductId) {
        if !self.contains(&product_id) {
            self.ids.push(product_id);
        }
    }

    /// Remove a product id. Idempotent.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.ids.retain(|id| id != product_id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::default();
        wishlist.add(ProductId::new("p1"));
        wishlist.add(ProductId::new("p1"));
        wishlist.add(ProductId::new("p2"));

        assert_eq!(wishlist.len(), 2);
        assert!(wishlist.contains(&ProductId::new("p1")));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut wishlist = Wishlist::default();
        wishlist.add(ProductId::new("p1"));
        wishlist.remove(&ProductId::new("p1"));
        wishlist.remove(&ProductId::new("p1"));

        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut wishlist = Wishlist::default();
        for id in ["c", "a", "b"] {
            wishlist.add(ProductId::new(id));
        }
        let order: Vec<_> = wishlist.ids().iter().map(ProductId::as_str).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
