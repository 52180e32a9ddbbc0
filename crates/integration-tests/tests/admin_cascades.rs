//! Admin mutation cascades with an unreachable image CDN.
//!
//! Image deletes are best-effort; every scenario here runs against a CDN
//! client pointed at a dead address to prove the catalog writes still land.

use gehna_admin::config::ImageCdnConfig;
use gehna_admin::services::catalog::AdminCatalog;
use gehna_admin::services::images::ImageClient;
use gehna_core::records::{Category, ImageRef, Product};
use gehna_core::types::{CategoryId, ProductId};
use gehna_datastore::{CategoryStore, DocStore, ProductStore};
use gehna_integration_tests::seed_catalog;
use rust_decimal::Decimal;
use secrecy::SecretString;

fn admin(store: &DocStore) -> AdminCatalog {
    let config = ImageCdnConfig {
        cloud_name: "test".to_owned(),
        upload_preset: "unsigned_uploads".to_owned(),
        api_key: "key".to_owned(),
        api_secret: SecretString::from("secret"),
    };
    AdminCatalog::new(
        ProductStore::new(store.clone()),
        CategoryStore::new(store.clone()),
        ImageClient::with_base_url(&config, "http://127.0.0.1:9"),
    )
}

fn new_product(category: &str) -> Product {
    Product {
        id: ProductId::new(""),
        name: "Temple Pendant".to_owned(),
        description: "Antique temple pendant".to_owned(),
        price: Decimal::from(3500),
        original_price: Decimal::from(3500),
        images: vec![ImageRef {
            url: "https://cdn.example/v11/catalog/pendant.jpg".to_owned(),
            public_id: Some("catalog/pendant".to_owned()),
        }],
        category: category.to_owned(),
        tags: vec!["temple".to_owned()],
        in_stock: true,
        stock_quantity: 1,
        rating: None,
        customizable: false,
        created_at: None,
        updated_at: None,
    }
}

async fn count_of(store: &DocStore, name: &str) -> u32 {
    CategoryStore::new(store.clone())
        .find_by_name(name)
        .await
        .expect("query")
        .expect("seeded")
        .product_count
}

#[tokio::test]
async fn test_product_lifecycle_keeps_counts_in_step() {
    let store = DocStore::memory();
    seed_catalog(&store).await;
    let admin = admin(&store);
    admin.counts().reconcile().await.expect("reconcile");

    let id = admin
        .create_product(&new_product("Necklaces"))
        .await
        .expect("create");
    assert_eq!(count_of(&store, "Necklaces").await, 3);

    let mut moved = admin.products().get(&id).await.expect("get");
    moved.category = "Earrings".to_owned();
    admin.update_product(&moved).await.expect("update");
    assert_eq!(count_of(&store, "Necklaces").await, 2);
    assert_eq!(count_of(&store, "Earrings").await, 2);

    admin.delete_product(&id).await.expect("delete");
    assert_eq!(count_of(&store, "Earrings").await, 1);
    assert!(admin.products().get(&id).await.is_err());
}

#[tokio::test]
async fn test_image_swap_survives_dead_cdn() {
    let store = DocStore::memory();
    seed_catalog(&store).await;
    let admin = admin(&store);

    let id = admin
        .create_product(&new_product("Rings"))
        .await
        .expect("create");

    // Replace the only image; the old one's delete fails silently
    let mut updated = admin.products().get(&id).await.expect("get");
    updated.images = vec![ImageRef {
        url: "https://cdn.example/v12/catalog/pendant-2.jpg".to_owned(),
        public_id: Some("catalog/pendant-2".to_owned()),
    }];
    admin.update_product(&updated).await.expect("update");

    let stored = admin.products().get(&id).await.expect("get");
    assert_eq!(stored.images.len(), 1);
    assert_eq!(
        stored.images[0].public_id.as_deref(),
        Some("catalog/pendant-2")
    );
}

#[tokio::test]
async fn test_category_image_replacement_and_delete() {
    let store = DocStore::memory();
    let admin = admin(&store);

    let id = admin
        .create_category(&Category {
            id: CategoryId::new(""),
            name: "Bangles".to_owned(),
            slug: "bangles".to_owned(),
            image: Some(ImageRef {
                url: "https://cdn.example/v3/categories/bangles.jpg".to_owned(),
                public_id: Some("categories/bangles".to_owned()),
            }),
            product_count: 0,
            order: 4,
            created_at: None,
        })
        .await
        .expect("create");

    // Removing the image writes through even though the CDN delete fails
    let mut updated = admin.categories().get(&id).await.expect("get");
    updated.image = None;
    admin.update_category(&updated).await.expect("update");
    assert!(admin.categories().get(&id).await.expect("get").image.is_none());

    admin.delete_category(&id).await.expect("delete");
    assert!(admin.categories().get(&id).await.is_err());
}
