//! Starter catalog seeding.
//!
//! Inserts a small set of categories, products, and popular search terms.
//! Running it twice creates duplicates; it is meant for fresh stores.

use gehna_core::records::{Category, ImageRef, PopularSearch, Product};
use gehna_core::text::slugify;
use gehna_core::types::{CategoryId, ProductId, SearchTermId};
use gehna_datastore::{CategoryStore, ProductStore, SearchTermStore};
use rust_decimal::Decimal;

/// Seed the document store with a starter catalog.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::docstore_from_env()?;
    let categories = CategoryStore::new(store.clone());
    let products = ProductStore::new(store.clone());
    let search_terms = SearchTermStore::new(store);

    let category_names = ["Necklaces", "Earrings", "Rings", "Bangles"];
    for (index, name) in category_names.iter().enumerate() {
        let id = categories
            .create(&category(name, index as i64 + 1))
            .await?;
        tracing::info!(category = name, id = %id, "category created");
    }

    for product in starter_products() {
        let id = products.create(&product).await?;
        tracing::info!(product = %product.name, id = %id, "product created");
    }

    for (index, term) in ["gold necklace", "bridal set", "pearl earrings"]
        .iter()
        .enumerate()
    {
        let id = search_terms
            .create(&PopularSearch {
                id: SearchTermId::new(""),
                term: (*term).to_owned(),
                order: index as i64 + 1,
            })
            .await?;
        tracing::info!(term, id = %id, "popular search created");
    }

    tracing::info!("seeding complete; run `gehna-cli counts reconcile` to sync counts");
    Ok(())
}

fn category(name: &str, order: i64) -> Category {
    Category {
        id: CategoryId::new(""),
        name: name.to_owned(),
        slug: slugify(name),
        image: None,
        product_count: 0,
        order,
        created_at: None,
    }
}

fn starter_products() -> Vec<Product> {
    vec![
        product(
            "Kundan Bridal Necklace",
            "Handcrafted kundan necklace with pearl drops",
            24999,
            29999,
            "Necklaces",
            &["kundan", "bridal"],
            2,
        ),
        product(
            "Gold Jhumka Earrings",
            "Classic 22k gold-plated jhumkas",
            3499,
            3499,
            "Earrings",
            &["jhumka", "gold"],
            5,
        ),
        product(
            "Rose Gold Solitaire Ring",
            "Rose gold band with a solitaire zircon",
            1899,
            2499,
            "Rings",
            &["rose-gold", "solitaire"],
            8,
        ),
        product(
            "Antique Meenakari Bangles",
            "Pair of meenakari bangles in antique finish",
            5999,
            6999,
            "Bangles",
            &["meenakari", "antique"],
            3,
        ),
    ]
}

fn product(
    name: &str,
    description: &str,
    price: i64,
    original_price: i64,
    category: &str,
    tags: &[&str],
    stock_quantity: u32,
) -> Product {
    Product {
        id: ProductId::new(""),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::from(price),
        original_price: Decimal::from(original_price),
        images: Vec::<ImageRef>::new(),
        category: category.to_owned(),
        tags: tags.iter().map(|&t| t.to_owned()).collect(),
        in_stock: stock_quantity > 0,
        stock_quantity,
        rating: None,
        customizable: false,
        created_at: None,
        updated_at: None,
    }
}
