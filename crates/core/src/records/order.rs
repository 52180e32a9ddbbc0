//! Order record (admin bookkeeping).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::{OrderId, OrderStatus};

use super::{DecodeError, decimal_field, decimal_to_value, object, required_str, str_field,
    timestamp_field};

/// One line of an order: a snapshot, not a product reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    /// Line total (price × quantity).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    fn decode(value: &Value) -> Option<Self> {
        let name = value.get("name")?.as_str()?.to_owned();
        let price = decimal_field(value, "price").ok()??;
        let quantity = value
            .get("quantity")
            .and_then(Value::as_i64)
            .map_or(1, |q| u32::try_from(q.max(1)).unwrap_or(1));
        Some(Self {
            name,
            price,
            quantity,
        })
    }

    fn encode(&self) -> Value {
        json!({
            "name": self.name,
            "price": decimal_to_value(self.price),
            "quantity": self.quantity,
        })
    }
}

/// A manually recorded order.
///
/// Storefront checkouts leave the system as WhatsApp messages; an `Order`
/// document only exists when the shop owner transcribes one in the admin
/// panel. Lines embed `{name, price, quantity}` snapshots with no foreign
/// key back to the product collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub products: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub order_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl Order {
    /// Decode a raw order document.
    ///
    /// An unknown status string is migrated to `Pending`; a missing total
    /// is recomputed from the lines. Malformed lines are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the document is not an object or the
    /// customer name/phone is missing.
    pub fn decode(id: OrderId, doc: &Value) -> Result<Self, DecodeError> {
        object(doc)?;

        let customer_name = required_str(doc, "customerName")?;
        let customer_phone = required_str(doc, "customerPhone")?;

        let products: Vec<OrderLine> = doc
            .get("products")
            .and_then(Value::as_array)
            .map(|lines| lines.iter().filter_map(OrderLine::decode).collect())
            .unwrap_or_default();

        let line_sum: Decimal = products.iter().map(OrderLine::total).sum();
        let total_amount = decimal_field(doc, "totalAmount")?.unwrap_or(line_sum);

        let status = str_field(doc, "status")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            id,
            customer_name,
            customer_phone,
            products,
            total_amount,
            status,
            order_date: timestamp_field(doc, "orderDate"),
            notes: str_field(doc, "notes").filter(|n| !n.is_empty()),
        })
    }

    /// Encode the writable fields for the document store.
    ///
    /// `orderDate` is excluded; the data-access layer stamps it on create.
    #[must_use]
    pub fn fields(&self) -> Value {
        json!({
            "customerName": self.customer_name,
            "customerPhone": self.customer_phone,
            "products": self.products.iter().map(OrderLine::encode).collect::<Vec<_>>(),
            "totalAmount": decimal_to_value(self.total_amount),
            "status": self.status.to_string(),
            "notes": self.notes.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Value {
        json!({
            "customerName": "Priya Sharma",
            "customerPhone": "+91 98765 43210",
            "products": [
                {"name": "Jhumka Earrings", "price": 1200, "quantity": 2},
                {"name": "Nose Pin", "price": 350, "quantity": 1},
            ],
            "totalAmount": 2750,
            "status": "Shipped",
            "orderDate": "2024-06-10T12:00:00Z",
            "notes": "Gift wrap",
        })
    }

    #[test]
    fn test_decode_full_document() {
        let order = Order::decode(OrderId::new("o1"), &sample_doc()).expect("decode");
        assert_eq!(order.customer_name, "Priya Sharma");
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.total_amount, Decimal::from(2750));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.notes.as_deref(), Some("Gift wrap"));
    }

    #[test]
    fn test_decode_recomputes_missing_total() {
        let mut doc = sample_doc();
        doc.as_object_mut().expect("object").remove("totalAmount");
        let order = Order::decode(OrderId::new("o2"), &doc).expect("decode");
        assert_eq!(order.total_amount, Decimal::from(2 * 1200 + 350));
    }

    #[test]
    fn test_decode_migrates_unknown_status() {
        let mut doc = sample_doc();
        doc["status"] = json!("Teleported");
        let order = Order::decode(OrderId::new("o3"), &doc).expect("decode");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_decode_requires_customer() {
        assert!(Order::decode(OrderId::new("o4"), &json!({"customerPhone": "1"})).is_err());
    }
}
