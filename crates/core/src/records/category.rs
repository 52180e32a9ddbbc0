//! Category record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::text::slugify;
use crate::types::CategoryId;

use super::{DecodeError, ImageRef, count_field, object, rank_field, required_str, str_field,
    timestamp_field};

/// A catalog category.
///
/// `product_count` is a denormalized cache maintained by the admin-side
/// count synchronization; it is never authoritative. `order` is the display
/// rank, ties broken by document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image: Option<ImageRef>,
    pub product_count: u32,
    pub order: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Decode a raw category document.
    ///
    /// A missing slug is migrated by slugifying the name; a negative count
    /// clamps to 0.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the document is not an object or the
    /// name is missing/blank.
    pub fn decode(id: CategoryId, doc: &Value) -> Result<Self, DecodeError> {
        object(doc)?;

        let name = required_str(doc, "name")?;
        let slug = match str_field(doc, "slug") {
            Some(s) if !s.is_empty() => s,
            _ => slugify(&name),
        };

        let image = doc
            .get("imageUrl")
            .and_then(ImageRef::decode);

        Ok(Self {
            id,
            name,
            slug,
            image,
            product_count: count_field(doc, "productCount"),
            order: rank_field(doc, "order"),
            created_at: timestamp_field(doc, "createdAt"),
        })
    }

    /// Encode the writable fields for the document store.
    #[must_use]
    pub fn fields(&self) -> Value {
        json!({
            "name": self.name,
            "slug": self.slug,
            "imageUrl": self.image.as_ref().map_or(Value::Null, ImageRef::encode),
            "productCount": self.product_count,
            "order": self.order,
        })
    }
}
