//! Raw documents as returned by the content store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw document from the content store
///
/// `data` keeps the store's field payload unparsed; typed projections in
/// `content` pull required fields out of it and fail fast when one is
/// missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Store-internal document id (used for adjacency queries)
    pub id: String,

    /// URL-friendly unique name (the post slug)
    #[serde(default)]
    pub uid: Option<String>,

    /// Document type ("post")
    #[serde(rename = "type")]
    pub doc_type: String,

    /// First publication timestamp
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Last publication timestamp (differs from first after an edit)
    #[serde(default)]
    pub last_publication_date: Option<DateTime<Utc>>,

    /// Unshaped field payload
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One page of query results plus the continuation cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Documents in store return order
    pub results: Vec<Document>,

    /// Opaque URL for the next page; `None` when the store is exhausted
    #[serde(default)]
    pub next_page: Option<String>,
}
