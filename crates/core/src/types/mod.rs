//! Shared primitive types.

mod id;
mod money;
mod status;

pub use id::{CategoryId, OrderId, ProductId, SearchTermId};
pub use money::{discount_percent, format_inr};
pub use status::OrderStatus;
