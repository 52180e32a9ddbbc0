//! Typed stores over the raw document client.
//!
//! Each store owns one collection, stamps server-side timestamps at write
//! time, and runs the validating decode on the way out. A malformed document
//! never breaks a listing: it is skipped with a warning. A malformed
//! document fetched *by id* is a hard [`StoreError::Decode`].

use chrono::Utc;
use gehna_core::records::DecodeError;
use serde_json::Value;

use crate::client::Document;
use crate::error::StoreError;

mod category;
mod order;
mod product;
mod search_term;

pub use category::CategoryStore;
pub use order::OrderStore;
pub use product::ProductStore;
pub use search_term::SearchTermStore;

/// Current time as the store's timestamp wire format.
fn now_timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

/// Decode a listing, dropping documents that fail validation.
fn decode_all<T, F>(collection: &'static str, documents: Vec<Document>, decode: F) -> Vec<T>
where
    F: Fn(String, &Value) -> Result<T, DecodeError>,
{
    documents
        .into_iter()
        .filter_map(|document| match decode(document.id.clone(), &document.fields) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(
                    collection,
                    id = %document.id,
                    %error,
                    "skipping malformed document"
                );
                None
            }
        })
        .collect()
}

/// Decode a single fetched document, surfacing validation failure.
fn decode_one<T, F>(
    collection: &'static str,
    document: &Document,
    decode: F,
) -> Result<T, StoreError>
where
    F: Fn(String, &Value) -> Result<T, DecodeError>,
{
    decode(document.id.clone(), &document.fields).map_err(|source| StoreError::Decode {
        collection: collection.to_owned(),
        id: document.id.clone(),
        source,
    })
}
