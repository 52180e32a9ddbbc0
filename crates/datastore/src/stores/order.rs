//! Order collection store.

use gehna_core::records::Order;
use gehna_core::types::OrderId;

use crate::client::{DocStore, SortDirection};
use crate::error::StoreError;

use super::{decode_all, decode_one, now_timestamp};

const COLLECTION: &str = "orders";

/// Typed access to the `orders` collection.
#[derive(Clone)]
pub struct OrderStore {
    store: DocStore,
}

impl OrderStore {
    #[must_use]
    pub const fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store call fails.
    pub async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let documents = self
            .store
            .list_ordered(COLLECTION, "orderDate", SortDirection::Descending)
            .await?;
        Ok(decode_all(COLLECTION, documents, |id, fields| {
            Order::decode(OrderId::new(id), fields)
        }))
    }

    /// A single order by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Decode`] for a document that fails validation.
    pub async fn get(&self, id: &OrderId) -> Result<Order, StoreError> {
        let document = self.store.get(COLLECTION, id.as_str()).await?;
        decode_one(COLLECTION, &document, |id, fields| {
            Order::decode(OrderId::new(id), fields)
        })
    }

    /// Insert a new order, stamping `orderDate`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    pub async fn create(&self, order: &Order) -> Result<OrderId, StoreError> {
        let mut fields = order.fields();
        fields["orderDate"] = now_timestamp();
        let id = self.store.insert(COLLECTION, fields).await?;
        Ok(OrderId::new(id))
    }

    /// Overwrite an order, keeping its original `orderDate`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn update(&self, order: &Order) -> Result<(), StoreError> {
        let mut fields = order.fields();
        if let Some(order_date) = order.order_date {
            fields["orderDate"] = serde_json::Value::String(order_date.to_rfc3339());
        }
        self.store.update(COLLECTION, order.id.as_str(), fields).await
    }

    /// Delete an order document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: &OrderId) -> Result<(), StoreError> {
        self.store.delete(COLLECTION, id.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gehna_core::records::OrderLine;
    use gehna_core::types::OrderStatus;
    use rust_decimal::Decimal;

    fn sample(customer: &str) -> Order {
        Order {
            id: OrderId::new(""),
            customer_name: customer.to_owned(),
            customer_phone: "+911234567890".to_owned(),
            products: vec![OrderLine {
                name: "Ring".to_owned(),
                price: Decimal::from(500),
                quantity: 1,
            }],
            total_amount: Decimal::from(500),
            status: OrderStatus::Pending,
            order_date: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_stamps_order_date() {
        let orders = OrderStore::new(DocStore::memory());
        let id = orders.create(&sample("Priya")).await.expect("create");
        let stored = orders.get(&id).await.expect("get");
        assert!(stored.order_date.is_some());
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let orders = OrderStore::new(DocStore::memory());
        orders.create(&sample("First")).await.expect("create");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        orders.create(&sample("Second")).await.expect("create");

        let listed = orders.list().await.expect("list");
        let names: Vec<_> = listed.iter().map(|o| o.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}
