//! WhatsApp deep-link order composition.
//!
//! Checkout does not touch a payment provider; the storefront hands the
//! shopper a prefilled `wa.me` link and the conversation takes over from
//! there. Message bodies use WhatsApp's `*bold*` markup and plain rupee
//! amounts (no digit grouping), matching what the shop owner expects to
//! read on their phone.

use gehna_core::records::Product;
use rust_decimal::Decimal;

use crate::cart::Cart;

/// Build the `wa.me` deep link for a message.
#[must_use]
pub fn order_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

/// Single-product inquiry message.
#[must_use]
pub fn product_inquiry(product: &Product) -> String {
    format!(
        "Hi! I'm interested in ordering:\n\n\
         *{}*\n\
         Price: \u{20b9}{}\n\
         Category: {}\n\n\
         Please confirm availability and delivery details.",
        product.name,
        plain_amount(product.price),
        product.category,
    )
}

/// Numbered cart order message with per-line totals and a grand total.
///
/// Lines carry the snapshot image URL so the shop owner can tap through
/// to see what was ordered.
#[must_use]
pub fn cart_order(cart: &Cart) -> String {
    let mut message = String::from("Hi! I'd like to place an order \u{1f64f}\n\n");
    message.push_str("*My Order Details:*\n\n");

    for (index, item) in cart.items().iter().enumerate() {
        message.push_str(&format!("{}. *{}*\n", index + 1, item.name));
        message.push_str(&format!(
            "   Price: \u{20b9}{} \u{d7} {} = \u{20b9}{}\n",
            plain_amount(item.price),
            item.quantity,
            plain_amount(item.line_total()),
        ));
        if let Some(image) = &item.image {
            message.push_str(&format!("   \u{1f517} View Image: {image}\n"));
        }
        message.push('\n');
    }

    message.push_str(&format!(
        "\u{1f9fe} *Total Amount: \u{20b9}{}*\n\n",
        plain_amount(cart.total_price())
    ));
    message.push_str("Please confirm availability and delivery details.\n");
    message.push_str("Thank you! \u{1f60a}");
    message
}

/// Rupee amount without grouping, trailing zeros trimmed.
fn plain_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use gehna_core::types::ProductId;
    use serde_json::json;

    fn product() -> Product {
        Product::decode(
            ProductId::new("p1"),
            &json!({"name": "Kundan Choker", "price": 4999, "category": "Necklaces"}),
        )
        .expect("decode")
    }

    #[test]
    fn test_product_inquiry_contents() {
        let message = product_inquiry(&product());
        assert!(message.starts_with("Hi! I'm interested in ordering:"));
        assert!(message.contains("*Kundan Choker*"));
        assert!(message.contains("Price: \u{20b9}4999"));
        assert!(message.contains("Category: Necklaces"));
        assert!(message.ends_with("Please confirm availability and delivery details."));
    }

    #[test]
    fn test_cart_order_numbers_lines_and_totals() {
        let mut cart = Cart::default();
        cart.add(CartItem {
            product_id: ProductId::new("p1"),
            name: "Jhumka Earrings".to_owned(),
            price: Decimal::from(1200),
            image: Some("https://cdn.example/v1/jhumka.jpg".to_owned()),
            quantity: 2,
        });
        cart.add(CartItem {
            product_id: ProductId::new("p2"),
            name: "Nose Pin".to_owned(),
            price: Decimal::from(350),
            image: None,
            quantity: 1,
        });

        let message = cart_order(&cart);
        assert!(message.contains("1. *Jhumka Earrings*"));
        assert!(message.contains("\u{20b9}1200 \u{d7} 2 = \u{20b9}2400"));
        assert!(message.contains("View Image: https://cdn.example/v1/jhumka.jpg"));
        assert!(message.contains("2. *Nose Pin*"));
        assert!(message.contains("*Total Amount: \u{20b9}2750*"));
        assert!(message.ends_with("Thank you! \u{1f60a}"));
    }

    #[test]
    fn test_order_url_is_encoded() {
        let url = order_url("919024684467", "Hi! I'd like to order");
        assert!(url.starts_with("https://wa.me/919024684467?text="));
        assert!(!url.contains(' '));
        assert!(url.contains("Hi%21"));
    }
}
