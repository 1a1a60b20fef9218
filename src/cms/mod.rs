//! Content store client
//!
//! Read-only client for a Prismic-style headless CMS: predicate queries
//! with cursor pagination, lookup by uid, and raw fetches against a
//! previously returned cursor URL. This crate never writes to the store.

mod document;

pub use document::{Document, QueryResponse};

use thiserror::Error;

/// Content store request and decode errors
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("content store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content store returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to decode content store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A query predicate in the store's bracket syntax
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Exact match on a document path, e.g. `at("document.type", "post")`
    At { path: String, value: String },
}

impl Predicate {
    /// Match documents where `path` equals `value`
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::At {
            path: path.into(),
            value: value.into(),
        }
    }

    fn render(&self) -> String {
        match self {
            Predicate::At { path, value } => format!(r#"[at({}, "{}")]"#, path, value),
        }
    }
}

/// Options accepted by [`CmsClient::query`]
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Field allowlist, e.g. `post.title`
    pub fetch: Vec<String>,
    /// Results per page
    pub page_size: Option<usize>,
    /// Position results immediately after this document id
    pub after: Option<String>,
    /// Sort expression, e.g. `[document.first_publication_date]`
    pub orderings: Option<String>,
    /// Revision pin (preview ref)
    pub r#ref: Option<String>,
}

/// Read-only client for the content store API
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_url: String,
    access_token: Option<String>,
}

impl CmsClient {
    /// Create a client for the given API endpoint
    pub fn new(api_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Run a predicate query against the document search endpoint
    pub async fn query(
        &self,
        predicate: &Predicate,
        options: &QueryOptions,
    ) -> Result<QueryResponse, CmsError> {
        let url = format!("{}/documents/search", self.api_url);
        let mut request = self.http.get(&url).query(&[("q", predicate.render())]);

        if !options.fetch.is_empty() {
            request = request.query(&[("fetch", options.fetch.join(","))]);
        }
        if let Some(page_size) = options.page_size {
            request = request.query(&[("pageSize", page_size.to_string())]);
        }
        if let Some(after) = &options.after {
            request = request.query(&[("after", after.clone())]);
        }
        if let Some(orderings) = &options.orderings {
            request = request.query(&[("orderings", orderings.clone())]);
        }
        if let Some(r#ref) = options.r#ref.as_ref() {
            request = request.query(&[("ref", r#ref.clone())]);
        }
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.clone())]);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Look up one document of `doc_type` by its uid
    ///
    /// An absent document is `Ok(None)`, not an error; the caller maps it
    /// to a not-found page.
    pub async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        options: &QueryOptions,
    ) -> Result<Option<Document>, CmsError> {
        let predicate = Predicate::at(format!("my.{}.uid", doc_type), uid);
        let mut options = options.clone();
        options.page_size = Some(1);

        let response = self.query(&predicate, &options).await?;
        Ok(response.results.into_iter().next())
    }

    /// Fetch a results page from a cursor URL returned by an earlier query
    pub async fn fetch_page(&self, cursor_url: &str) -> Result<QueryResponse, CmsError> {
        let response = self.http.get(cursor_url).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<QueryResponse, CmsError> {
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status,
                url: response.url().to_string(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post_doc(id: &str, uid: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "uid": uid,
            "type": "post",
            "first_publication_date": "2021-03-15T10:00:00+00:00",
            "last_publication_date": "2021-03-15T10:00:00+00:00",
            "data": {"title": "Title", "subtitle": "Sub", "author": "Ana"}
        })
    }

    #[tokio::test]
    async fn test_query_sends_predicate_and_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("q", r#"[at(document.type, "post")]"#))
            .and(query_param("pageSize", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [post_doc("a", "one"), post_doc("b", "two")],
                "next_page": format!("{}/api/v2/documents/search?after=b", server.uri()),
            })))
            .mount(&server)
            .await;

        let client = CmsClient::new(format!("{}/api/v2", server.uri()), None);
        let options = QueryOptions {
            page_size: Some(2),
            ..Default::default()
        };
        let resp = client
            .query(&Predicate::at("document.type", "post"), &options)
            .await
            .unwrap();

        assert_eq!(resp.results.len(), 2);
        assert!(resp.next_page.is_some());
    }

    #[tokio::test]
    async fn test_get_by_uid_absent_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [],
                "next_page": null,
            })))
            .mount(&server)
            .await;

        let client = CmsClient::new(format!("{}/api/v2", server.uri()), None);
        let doc = client
            .get_by_uid("post", "missing-post", &QueryOptions::default())
            .await
            .unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn test_fetch_page_follows_cursor_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("after", "b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [post_doc("c", "three")],
                "next_page": null,
            })))
            .mount(&server)
            .await;

        let client = CmsClient::new(format!("{}/api/v2", server.uri()), None);
        let cursor = format!("{}/api/v2/documents/search?after=b", server.uri());
        let resp = client.fetch_page(&cursor).await.unwrap();

        assert_eq!(resp.results.len(), 1);
        assert!(resp.next_page.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = CmsClient::new(format!("{}/api/v2", server.uri()), None);
        let err = client
            .query(&Predicate::at("document.type", "post"), &QueryOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CmsError::Status { .. }));
    }
}
