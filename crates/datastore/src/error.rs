//! Datastore error types.

use gehna_core::records::DecodeError;
use thiserror::Error;

/// Errors from the document store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No document with the requested id.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A single requested document failed the validating decode.
    #[error("invalid document {collection}/{id}: {source}")]
    Decode {
        collection: String,
        id: String,
        #[source]
        source: DecodeError,
    },

    /// Failed to parse the store's response body.
    #[error("parse error: {0}")]
    Parse(String),
}

impl StoreError {
    /// Whether this error is a missing document rather than a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
