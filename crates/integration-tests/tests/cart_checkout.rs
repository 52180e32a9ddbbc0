//! Cart and wishlist session flows ending in a WhatsApp order link.

use gehna_core::types::ProductId;
use gehna_datastore::DocStore;
use gehna_integration_tests::seed_catalog;
use gehna_storefront::cart::CartItem;
use gehna_storefront::catalog::CatalogService;
use gehna_storefront::session_state::{
    MemorySnapshots, load_cart, load_wishlist, save_cart, save_wishlist,
};
use gehna_storefront::whatsapp;

async fn seeded_catalog() -> (DocStore, CatalogService) {
    let store = DocStore::memory();
    seed_catalog(&store).await;
    let catalog = CatalogService::new(store.clone());
    (store, catalog)
}

async fn find_id(catalog: &CatalogService, name: &str) -> ProductId {
    catalog
        .products()
        .await
        .expect("list")
        .iter()
        .find(|p| p.name == name)
        .expect("seeded")
        .id
        .clone()
}

#[tokio::test]
async fn test_cart_add_merges_and_persists_across_loads() {
    let (_store, catalog) = seeded_catalog().await;
    let port = MemorySnapshots::default();
    let id = find_id(&catalog, "Gold Ring").await;

    // Two adds of the same product merge into one line of quantity 2
    for _ in 0..2 {
        let product = catalog.product(&id).await.expect("get");
        let mut cart = load_cart(&port).await.expect("load");
        cart.add(CartItem::from_product(&product));
        save_cart(&port, &cart).await.expect("save");
    }

    let cart = load_cart(&port).await.expect("reload");
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.total_items(), 2);
}

#[tokio::test]
async fn test_cart_snapshot_survives_price_change() {
    let (store, catalog) = seeded_catalog().await;
    let port = MemorySnapshots::default();
    let id = find_id(&catalog, "Gold Ring").await;

    let product = catalog.product(&id).await.expect("get");
    let price_at_add = product.price;
    let mut cart = load_cart(&port).await.expect("load");
    cart.add(CartItem::from_product(&product));
    save_cart(&port, &cart).await.expect("save");

    // Admin raises the price after the fact
    let mut doc = store.get("products", id.as_str()).await.expect("get");
    doc.fields["price"] = serde_json::json!(9999);
    store
        .update("products", id.as_str(), doc.fields)
        .await
        .expect("update");

    let cart = load_cart(&port).await.expect("reload");
    assert_eq!(cart.items()[0].price, price_at_add);
}

#[tokio::test]
async fn test_checkout_message_reflects_cart() {
    let (_store, catalog) = seeded_catalog().await;
    let port = MemorySnapshots::default();

    let choker = find_id(&catalog, "Kundan Choker").await;
    let ring = find_id(&catalog, "Gold Ring").await;

    let mut cart = load_cart(&port).await.expect("load");
    cart.add(CartItem::from_product(
        &catalog.product(&choker).await.expect("get"),
    ));
    cart.add(CartItem::from_product(
        &catalog.product(&ring).await.expect("get"),
    ));
    cart.update_quantity(&ring, 3);
    save_cart(&port, &cart).await.expect("save");

    let cart = load_cart(&port).await.expect("reload");
    let message = whatsapp::cart_order(&cart);
    assert!(message.contains("1. *Kundan Choker*"));
    assert!(message.contains("2. *Gold Ring*"));
    assert!(message.contains("\u{20b9}1500 \u{d7} 3 = \u{20b9}4500"));
    assert!(message.contains("*Total Amount: \u{20b9}9499*"));

    let url = whatsapp::order_url("919024684467", &message);
    assert!(url.starts_with("https://wa.me/919024684467?text="));
    assert!(!url.contains(' '));
}

#[tokio::test]
async fn test_quantity_clamps_and_removal_is_explicit() {
    let (_store, catalog) = seeded_catalog().await;
    let port = MemorySnapshots::default();
    let id = find_id(&catalog, "Jhumka Earrings").await;

    let mut cart = load_cart(&port).await.expect("load");
    cart.add(CartItem::from_product(
        &catalog.product(&id).await.expect("get"),
    ));

    // Zero clamps to one instead of removing the line
    cart.update_quantity(&id, 0);
    assert_eq!(cart.items()[0].quantity, 1);

    cart.remove(&id);
    assert!(cart.is_empty());
    save_cart(&port, &cart).await.expect("save");
    assert!(load_cart(&port).await.expect("reload").is_empty());
}

#[tokio::test]
async fn test_wishlist_skips_deleted_products() {
    let (_store, catalog) = seeded_catalog().await;
    let port = MemorySnapshots::default();
    let keep = find_id(&catalog, "Pearl Necklace").await;

    let mut wishlist = load_wishlist(&port).await.expect("load");
    wishlist.add(keep.clone());
    wishlist.add(keep.clone()); // idempotent
    wishlist.add(ProductId::new("gone"));
    save_wishlist(&port, &wishlist).await.expect("save");

    let wishlist = load_wishlist(&port).await.expect("reload");
    assert_eq!(wishlist.len(), 2);

    // Resolution against the catalog drops ids that no longer exist
    let products = catalog.products().await.expect("list");
    let resolved: Vec<_> = wishlist
        .ids()
        .iter()
        .filter_map(|id| products.iter().find(|p| &p.id == id))
        .collect();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].name, "Pearl Necklace");
}
