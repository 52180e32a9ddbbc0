//! Popular search term record.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::SearchTermId;

use super::{DecodeError, object, rank_field, str_field};

/// A curated search term surfaced on the storefront search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularSearch {
    pub id: SearchTermId,
    pub term: String,
    pub order: i64,
}

impl PopularSearch {
    /// Decode a raw popular-search document.
    ///
    /// A missing or blank term is migrated to "Untitled" so a half-written
    /// document still renders rather than breaking the search page.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the document is not an object.
    pub fn decode(id: SearchTermId, doc: &Value) -> Result<Self, DecodeError> {
        object(doc)?;

        let term = match str_field(doc, "term") {
            Some(t) if !t.trim().is_empty() => t.trim().to_owned(),
            _ => "Untitled".to_owned(),
        };

        Ok(Self {
            id,
            term,
            order: rank_field(doc, "order"),
        })
    }

    /// Encode the writable fields for the document store.
    #[must_use]
    pub fn fields(&self) -> Value {
        json!({
            "term": self.term.trim(),
            "order": self.order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_trims_term() {
        let doc = json!({"term": "  gold ring ", "order": 2});
        let search = PopularSearch::decode(SearchTermId::new("s1"), &doc).expect("decode");
        assert_eq!(search.term, "gold ring");
        assert_eq!(search.order, 2);
    }

    #[test]
    fn test_decode_defaults_blank_term() {
        let doc = json!({"order": 1});
        let search = PopularSearch::decode(SearchTermId::new("s2"), &doc).expect("decode");
        assert_eq!(search.term, "Untitled");
    }
}
