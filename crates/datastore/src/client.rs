//! Raw document-store client.
//!
//! The hosted store is a plain collections/documents REST API; the in-memory
//! backend mirrors its observable behavior (insertion order, opaque ids) so
//! tests and the seeder run against the same interface.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;

use crate::error::StoreError;

/// A raw document: opaque id plus a JSON object of fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// Sort direction for ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Document-store client.
///
/// Enum-dispatched over the two backends so call sites stay monomorphic and
/// cheaply cloneable.
#[derive(Clone)]
pub enum DocStore {
    Http(HttpBackend),
    Memory(MemoryBackend),
}

impl DocStore {
    /// Client for the hosted store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the API key is not a valid header value or
    /// the HTTP client fails to build.
    pub fn http(base_url: &str, api_key: &SecretString) -> Result<Self, StoreError> {
        HttpBackend::new(base_url, api_key).map(Self::Http)
    }

    /// Empty in-memory store for tests and seeding.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryBackend::default())
    }

    /// All documents of a collection, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable or answers with a
    /// non-success status.
    pub async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Http(backend) => backend.list(collection).await,
            Self::Memory(backend) => Ok(backend.list(collection).await),
        }
    }

    /// A single document by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no such document exists.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        match self {
            Self::Http(backend) => backend.get(collection, id).await,
            Self::Memory(backend) => backend.get(collection, id).await,
        }
    }

    /// Documents whose `field` equals `value` exactly, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable or answers with a
    /// non-success status.
    pub async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Http(backend) => backend.find_by_field(collection, field, value).await,
            Self::Memory(backend) => Ok(backend.find_by_field(collection, field, value).await),
        }
    }

    /// All documents of a collection, ordered by `field`.
    ///
    /// Documents missing the field sort as null (first ascending, last
    /// descending). Ties keep document order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unreachable or answers with a
    /// non-success status.
    pub async fn list_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Http(backend) => backend.list_ordered(collection, field, direction).await,
            Self::Memory(backend) => Ok(backend.list_ordered(collection, field, direction).await),
        }
    }

    /// Insert a new document, returning its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the write.
    pub async fn insert(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        match self {
            Self::Http(backend) => backend.insert(collection, fields).await,
            Self::Memory(backend) => Ok(backend.insert(collection, fields).await),
        }
    }

    /// Overwrite the fields of an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no such document exists.
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> Result<(), StoreError> {
        match self {
            Self::Http(backend) => backend.update(collection, id, fields).await,
            Self::Memory(backend) => backend.update(collection, id, fields).await,
        }
    }

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no such document exists.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Http(backend) => backend.delete(collection, id).await,
            Self::Memory(backend) => backend.delete(collection, id).await,
        }
    }
}

/// HTTP backend against the hosted store.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    fn new(base_url: &str, api_key: &SecretString) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| StoreError::Parse(format!("invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/collections/{collection}/documents", self.base_url)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let response = self.client.get(self.documents_url(collection)).send().await?;
        Self::read_documents(response).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        }
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let encoded = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let url = format!(
            "{}?field={}&equals={}",
            self.documents_url(collection),
            urlencoding::encode(field),
            urlencoding::encode(&encoded)
        );
        let response = self.client.get(&url).send().await?;
        Self::read_documents(response).await
    }

    async fn list_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!(
            "{}?orderBy={}&direction={}",
            self.documents_url(collection),
            urlencoding::encode(field),
            direction.as_param()
        );
        let response = self.client.get(&url).send().await?;
        Self::read_documents(response).await
    }

    async fn insert(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.documents_url(collection))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        #[derive(Deserialize)]
        struct Created {
            id: String,
        }
        let created: Created = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(created.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        }
        Self::check_status(response).await.map(|_| ())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        }
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_documents(response: reqwest::Response) -> Result<Vec<Document>, StoreError> {
        #[derive(Deserialize)]
        struct Listing {
            documents: Vec<Document>,
        }
        let response = Self::check_status(response).await?;
        let listing: Listing = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(listing.documents)
    }
}

/// In-memory backend. Preserves insertion order per collection.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryBackend {
    async fn list(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        self.collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })
    }

    async fn find_by_field(&self, collection: &str, field: &str, value: &Value) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn list_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> Vec<Document> {
        let mut docs = self.list(collection).await;
        docs.sort_by(|a, b| {
            let left = a.fields.get(field).unwrap_or(&Value::Null);
            let right = b.fields.get(field).unwrap_or(&Value::Null);
            let ordering = compare_values(left, right);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        docs
    }

    async fn insert(&self, collection: &str, fields: Value) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        id
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })?;
        doc.fields = fields;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })?;
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        if docs.len() == before {
            return Err(StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        }
        Ok(())
    }
}

fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        // Mixed or structured values: fall back to type rank then text
        (a, b) => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| a.to_string().cmp(&b.to_string())),
    }
}

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
