//! Gehna Jewels Admin - catalog management panel.
//!
//! Serves the admin JSON API on port 3001:
//!
//! - Session-gated email/password sign-in against the external identity
//!   provider.
//! - CRUD for products, categories, popular search terms, and orders.
//! - Image CDN uploads, plus the best-effort delete cascades that keep the
//!   CDN tidy when catalog entries change.
//! - Denormalized category product counts, kept in step incrementally and
//!   repairable with a full reconciliation pass.
//!
//! This binary owns every catalog mutation; the storefront only reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
