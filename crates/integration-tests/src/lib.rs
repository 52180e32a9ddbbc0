//! Cross-crate integration tests.
//!
//! Everything runs against the in-memory document store backend and an
//! image CDN client pointed at an unreachable address, so the suite needs
//! no external services:
//!
//! ```bash
//! cargo test -p gehna-integration-tests
//! ```
//!
//! Shared fixtures live here; the scenarios are under `tests/`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use gehna_datastore::DocStore;
use serde_json::json;

/// Seed a small catalog: three categories, five products, two search terms.
///
/// Counts are deliberately left at zero so count-sync tests can observe
/// reconciliation from a known-wrong state.
///
/// # Panics
///
/// Panics if the in-memory store rejects a write (it never does).
pub async fn seed_catalog(store: &DocStore) {
    for (name, order) in [("Necklaces", 1), ("Rings", 2), ("Earrings", 3)] {
        store
            .insert(
                "categories",
                json!({
                    "name": name,
                    "slug": name.to_lowercase(),
                    "productCount": 0,
                    "order": order,
                }),
            )
            .await
            .expect("insert category");
    }

    let products = [
        json!({
            "name": "Kundan Choker", "price": 4999, "originalPrice": 6499,
            "category": "Necklaces", "tags": ["kundan", "bridal"],
            "stockQuantity": 2, "createdAt": "2024-05-01T00:00:00Z",
        }),
        json!({
            "name": "Pearl Necklace", "price": 2999,
            "category": "Necklaces", "tags": ["pearl"],
            "stockQuantity": 4, "createdAt": "2024-05-03T00:00:00Z",
        }),
        json!({
            "name": "Gold Ring", "price": 1500,
            "category": "Rings", "tags": ["gold"], "rating": 4.5,
            "stockQuantity": 6, "createdAt": "2024-04-20T00:00:00Z",
        }),
        json!({
            "name": "Silver Ring", "price": 800,
            "category": "Rings", "description": "Oxidized silver band",
            "stockQuantity": 0, "inStock": false,
            "createdAt": "2024-04-25T00:00:00Z",
        }),
        json!({
            "name": "Jhumka Earrings", "price": 1200,
            "category": "Earrings", "tags": ["jhumka"],
            "stockQuantity": 3,
        }),
    ];
    for fields in products {
        store
            .insert("products", fields)
            .await
            .expect("insert product");
    }

    for (term, order) in [("gold ring", 1), ("bridal", 2)] {
        store
            .insert("popularSearches", json!({"term": term, "order": order}))
            .await
            .expect("insert search term");
    }
}
