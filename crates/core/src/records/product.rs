//! Product record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::ProductId;

use super::{
    DecodeError, ImageRef, bool_field, count_field, decimal_field, decimal_to_value, object,
    required_str, str_field, string_array, timestamp_field,
};

/// A catalog product.
///
/// `category` is the denormalized category *name* (not a foreign key) and
/// `images` is ordered - the first entry is the main image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub images: Vec<ImageRef>,
    pub category: String,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: u32,
    /// Only populated by historical documents; drives the "popular" sort.
    pub rating: Option<Decimal>,
    pub customizable: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Decode a raw product document.
    ///
    /// Rejects documents without a name or price. Everything else is
    /// migrated: a missing `inStock` flag derives from `stockQuantity`,
    /// a missing `originalPrice` falls back to `price`, and malformed
    /// image entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the document is not an object, the name
    /// is missing/blank, or the price cannot be interpreted as a number.
    pub fn decode(id: ProductId, doc: &Value) -> Result<Self, DecodeError> {
        object(doc)?;

        let name = required_str(doc, "name")?;
        let price = decimal_field(doc, "price")?.ok_or(DecodeError::MissingField("price"))?;
        let original_price = decimal_field(doc, "originalPrice")?.unwrap_or(price);
        let stock_quantity = count_field(doc, "stockQuantity");
        let in_stock = bool_field(doc, "inStock").unwrap_or(stock_quantity > 0);

        Ok(Self {
            id,
            name,
            description: str_field(doc, "description").unwrap_or_default(),
            price,
            original_price,
            images: ImageRef::decode_list(doc, "images"),
            category: str_field(doc, "category").unwrap_or_default(),
            tags: string_array(doc, "tags"),
            in_stock,
            stock_quantity,
            rating: decimal_field(doc, "rating").unwrap_or_default(),
            customizable: bool_field(doc, "customizable").unwrap_or(false),
            created_at: timestamp_field(doc, "createdAt"),
            updated_at: timestamp_field(doc, "updatedAt"),
        })
    }

    /// Encode the writable fields for the document store.
    ///
    /// Timestamps are excluded; the data-access layer stamps `createdAt` /
    /// `updatedAt` at write time.
    #[must_use]
    pub fn fields(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "price": decimal_to_value(self.price),
            "originalPrice": decimal_to_value(self.original_price),
            "images": self.images.iter().map(ImageRef::encode).collect::<Vec<_>>(),
            "category": self.category,
            "tags": self.tags,
            "inStock": self.in_stock,
            "stockQuantity": self.stock_quantity,
            "customizable": self.customizable,
        })
    }

    /// Whether the product can currently be ordered.
    ///
    /// `inStock` and `stockQuantity` are both stored and both authoritative;
    /// availability is their conjunction so neither stale flag alone can
    /// sell an out-of-stock piece.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.in_stock && self.stock_quantity > 0
    }

    /// URL of the main (first) image, if any.
    #[must_use]
    pub fn main_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_doc() -> Value {
        json!({
            "name": "Kundan Choker",
            "description": "Handcrafted kundan choker with pearls",
            "price": 4999,
            "originalPrice": 6499,
            "images": ["https://cdn.example/v7/choker.jpg"],
            "category": "Necklaces",
            "tags": ["kundan", "bridal"],
            "inStock": true,
            "stockQuantity": 3,
            "customizable": true,
            "createdAt": "2024-05-01T08:30:00Z",
            "updatedAt": "2024-05-02T08:30:00Z",
        })
    }

    #[test]
    fn test_decode_full_document() {
        let product = Product::decode(ProductId::new("p1"), &full_doc()).expect("decode");
        assert_eq!(product.name, "Kundan Choker");
        assert_eq!(product.price, Decimal::from(4999));
        assert_eq!(product.original_price, Decimal::from(6499));
        assert_eq!(product.category, "Necklaces");
        assert_eq!(product.tags, vec!["kundan", "bridal"]);
        assert!(product.is_available());
        assert_eq!(product.main_image(), Some("https://cdn.example/v7/choker.jpg"));
    }

    #[test]
    fn test_decode_rejects_missing_name_or_price() {
        assert!(Product::decode(ProductId::new("p1"), &json!({"price": 100})).is_err());
        assert!(Product::decode(ProductId::new("p1"), &json!({"name": "Ring"})).is_err());
        assert!(Product::decode(ProductId::new("p1"), &json!("not an object")).is_err());
    }

    #[test]
    fn test_decode_migrates_missing_fields() {
        let doc = json!({"name": "Plain Band", "price": 799, "stockQuantity": 2});
        let product = Product::decode(ProductId::new("p2"), &doc).expect("decode");
        // originalPrice falls back to price, inStock derives from quantity
        assert_eq!(product.original_price, product.price);
        assert!(product.in_stock);
        assert!(product.images.is_empty());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_availability_requires_both_fields() {
        let doc = json!({"name": "Band", "price": 799, "inStock": true, "stockQuantity": 0});
        let product = Product::decode(ProductId::new("p3"), &doc).expect("decode");
        assert!(!product.is_available());
    }

    #[test]
    fn test_fields_round_trip() {
        let product = Product::decode(ProductId::new("p1"), &full_doc()).expect("decode");
        let reencoded = product.fields();
        let back = Product::decode(ProductId::new("p1"), &reencoded).expect("re-decode");
        assert_eq!(back.name, product.name);
        assert_eq!(back.price, product.price);
        assert_eq!(back.images, product.images);
        assert_eq!(back.stock_quantity, product.stock_quantity);
    }
}
