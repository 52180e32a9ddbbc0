//! Shopping cart container.
//!
//! The cart is pure session state: items carry a denormalized snapshot of
//! the product (name, price, main image) taken at add time, so a later
//! price change does not rewrite an existing cart.

use gehna_core::records::Product;
use gehna_core::types::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a product as a new cart line (quantity 1).
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.main_image().map(ToOwned::to_owned),
            quantity: 1,
        }
    }

    /// Line total (price × quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Session-persisted shopping cart.
///
/// Holds at most one line per product id; adding an existing product
/// increments its quantity instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line. If the product is already in the cart its quantity is
    /// incremented by the incoming quantity.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Set a line's quantity, clamped to at least 1.
    ///
    /// Removal only happens through [`Cart::remove`]; unknown ids are a
    /// no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| &line.product_id == product_id)
        {
            line.quantity = quantity.max(1);
        }
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|line| &line.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Grand total, computed on demand.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Decimal::from(price),
            image: None,
            quantity: 1,
        }
    }

    #[test]
    fn test_add_twice_increments_quantity() {
        let mut cart = Cart::default();
        cart.add(item("p1", 500));
        cart.add(item("p1", 500));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let mut cart = Cart::default();
        cart.add(item("p1", 500));
        cart.update_quantity(&ProductId::new("p1"), 0);

        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::default();
        cart.add(item("p1", 500));
        cart.update_quantity(&ProductId::new("p2"), 5);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::default();
        cart.add(item("p1", 500));
        cart.add(item("p2", 300));
        cart.update_quantity(&ProductId::new("p2"), 3);

        assert_eq!(cart.total_price(), Decimal::from(500 + 3 * 300));
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add(item("p1", 500));
        cart.add(item("p2", 300));

        cart.remove(&ProductId::new("p1"));
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }
}
