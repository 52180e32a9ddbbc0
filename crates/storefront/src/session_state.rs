//! Session persistence for cart and wishlist.
//!
//! The containers themselves are pure; this module is the seam that loads
//! and stores their snapshots. Handlers talk to [`SnapshotPort`] so tests
//! can swap the real session for [`MemorySnapshots`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tower_sessions::Session;

use crate::cart::Cart;
use crate::wishlist::Wishlist;

/// Session keys for persisted snapshots.
pub mod session_keys {
    pub const CART: &str = "gehna.cart";
    pub const WISHLIST: &str = "gehna.wishlist";
}

/// Load/store serialized snapshots under a key.
pub trait SnapshotPort {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send;

    fn store<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl SnapshotPort for Session {
    type Error = tower_sessions::session::Error;

    async fn load<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, Self::Error> {
        self.get(key).await
    }

    async fn store<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.insert(key, value).await
    }
}

/// In-memory snapshot port for tests.
#[derive(Clone, Default)]
pub struct MemorySnapshots {
    data: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl SnapshotPort for MemorySnapshots {
    type Error = serde_json::Error;

    async fn load<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, Self::Error> {
        self.data
            .read()
            .await
            .get(key)
            .cloned()
            .map(serde_json::from_value)
            .transpose()
    }

    async fn store<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), Self::Error> {
        let encoded = serde_json::to_value(value)?;
        self.data.write().await.insert(key.to_owned(), encoded);
        Ok(())
    }
}

/// Load the session cart, defaulting to empty.
///
/// # Errors
///
/// Returns the port's error if the snapshot cannot be read.
pub async fn load_cart<P: SnapshotPort>(port: &P) -> Result<Cart, P::Error> {
    Ok(port.load(session_keys::CART).await?.unwrap_or_default())
}

/// Persist the session cart.
///
/// # Errors
///
/// Returns the port's error if the snapshot cannot be written.
pub async fn save_cart<P: SnapshotPort>(port: &P, cart: &Cart) -> Result<(), P::Error> {
    port.store(session_keys::CART, cart).await
}

/// Load the session wishlist, defaulting to empty.
///
/// # Errors
///
/// Returns the port's error if the snapshot cannot be read.
pub async fn load_wishlist<P: SnapshotPort>(port: &P) -> Result<Wishlist, P::Error> {
    Ok(port.load(session_keys::WISHLIST).await?.unwrap_or_default())
}

/// Persist the session wishlist.
///
/// # Errors
///
/// Returns the port's error if the snapshot cannot be written.
pub async fn save_wishlist<P: SnapshotPort>(port: &P, wishlist: &Wishlist) -> Result<(), P::Error> {
    port.store(session_keys::WISHLIST, wishlist).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use gehna_core::types::ProductId;

    #[tokio::test]
    async fn test_cart_round_trip() {
        let port = MemorySnapshots::default();

        let mut cart = load_cart(&port).await.expect("load");
        assert!(cart.is_empty());

        cart.add(crate::cart::CartItem {
            product_id: ProductId::new("p1"),
            name: "Ring".to_owned(),
            price: rust_decimal::Decimal::from(500),
            image: None,
            quantity: 1,
        });
        save_cart(&port, &cart).await.expect("save");

        let reloaded = load_cart(&port).await.expect("reload");
        assert_eq!(reloaded, cart);
    }

    #[tokio::test]
    async fn test_wishlist_round_trip() {
        let port = MemorySnapshots::default();

        let mut wishlist = load_wishlist(&port).await.expect("load");
        wishlist.add(ProductId::new("p1"));
        save_wishlist(&port, &wishlist).await.expect("save");

        let reloaded = load_wishlist(&port).await.expect("reload");
        assert!(reloaded.contains(&ProductId::new("p1")));
    }
}
