//! Gehna Jewels Storefront - public catalog and ordering surface.
//!
//! Serves the customer-facing JSON API on port 3000:
//!
//! - Catalog browsing, search, filtering, and pagination over the hosted
//!   document store (read-only, behind a 5-minute cache).
//! - Session-persisted cart and wishlist.
//! - WhatsApp checkout: the cart leaves the system as a prefilled
//!   `wa.me` deep link, no payment processing here.
//!
//! The storefront never writes to the catalog; all mutations live in the
//! admin binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session_state;
pub mod state;
pub mod whatsapp;
pub mod wishlist;
