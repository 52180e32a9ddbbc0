//! Admin-side services: identity provider, image CDN, count sync, catalog
//! mutations.

pub mod auth;
pub mod catalog;
pub mod counts;
pub mod images;
