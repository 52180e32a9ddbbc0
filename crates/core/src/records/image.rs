//! CDN image references.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Reference to an image hosted on the CDN collaborator.
///
/// New uploads store the CDN's own resource identifier (`public_id`) next to
/// the delivery URL so deletion never has to reverse-engineer the URL
/// scheme. Legacy documents carry bare URL strings; those decode with
/// `public_id: None` and deletion falls back to deriving the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

impl ImageRef {
    /// Reference from a bare URL (legacy documents).
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_id: None,
        }
    }

    /// Decode one element of an `images` array.
    ///
    /// Accepts either a bare URL string or a `{url, publicId}` object;
    /// anything else decodes as `None` and the caller drops it.
    #[must_use]
    pub fn decode(value: &Value) -> Option<Self> {
        match value {
            Value::String(url) if !url.is_empty() => Some(Self::from_url(url.clone())),
            Value::Object(map) => {
                let url = map.get("url")?.as_str()?;
                if url.is_empty() {
                    return None;
                }
                let public_id = map
                    .get("publicId")
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned);
                Some(Self {
                    url: url.to_owned(),
                    public_id,
                })
            }
            _ => None,
        }
    }

    /// Encode for the document store.
    ///
    /// References without an identifier encode back to the legacy bare-URL
    /// shape so round-tripping an old document leaves it untouched.
    #[must_use]
    pub fn encode(&self) -> Value {
        match &self.public_id {
            Some(public_id) => json!({"url": self.url, "publicId": public_id}),
            None => Value::String(self.url.clone()),
        }
    }

    /// Decode a whole `images` field, dropping malformed entries.
    #[must_use]
    pub fn decode_list(doc: &Value, field: &str) -> Vec<Self> {
        doc.get(field)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Self::decode).collect())
            .unwrap_or_default()
    }
}
