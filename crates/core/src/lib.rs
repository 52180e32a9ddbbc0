//! Gehna Core - Shared types library.
//!
//! This crate provides common types used across all Gehna Jewels components:
//! - `storefront` - Public-facing catalog, cart, and wishlist site
//! - `admin` - Shop owner administration panel
//! - `cli` - Command-line tools for seeding and count reconciliation
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients, no document-store access. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money formatting, and
//!   order status
//! - [`records`] - Document records with a validating decode step from raw
//!   document-store JSON
//! - [`text`] - Slug and text helpers shared by storefront and admin

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod text;
pub mod types;

pub use records::*;
pub use types::*;
