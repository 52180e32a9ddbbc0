//! Gehna Datastore - document-store access layer.
//!
//! The catalog lives in a hosted document database reached over HTTP; this
//! crate is the only place that knows the wire shapes. It exposes:
//!
//! - [`DocStore`] - the raw client with the four query shapes the system
//!   uses (list, get by id, where-field-equals, ordered-by-field) plus
//!   insert/update/delete. Backed by either the hosted HTTP API or an
//!   in-memory store for tests and seeding.
//! - Typed stores ([`ProductStore`], [`CategoryStore`], [`OrderStore`],
//!   [`SearchTermStore`]) that wrap the raw client, stamp server-side
//!   timestamps, and run the validating decode from `gehna-core`. Documents
//!   that fail to decode are skipped and logged, never fatal to a listing.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod error;
pub mod stores;

pub use client::{DocStore, Document, SortDirection};
pub use error::StoreError;
pub use stores::{CategoryStore, OrderStore, ProductStore, SearchTermStore};
