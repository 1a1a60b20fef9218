//! Listing pagination state
//!
//! Holds the summaries shown so far plus the store's continuation cursor.
//! `load_more` is append-only: prior items and their order are never
//! touched, and a failed fetch leaves the whole state unchanged so the
//! affordance stays available for retry.

use crate::cms::{CmsClient, CmsError};
use crate::content::post::PostSummary;
use crate::helpers::DateFormat;

/// In-memory pagination state for the post listing
#[derive(Debug, Clone)]
pub struct PostFeed {
    posts: Vec<PostSummary>,
    next_page: Option<String>,
    in_flight: bool,
}

impl PostFeed {
    /// Build a feed from the first page of summaries and its cursor
    pub fn new(posts: Vec<PostSummary>, next_page: Option<String>) -> Self {
        Self {
            posts,
            next_page,
            in_flight: false,
        }
    }

    /// Summaries in store return order
    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// Whether a "load more" affordance should be shown
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// The current continuation cursor, if any
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Fetch the next page and append it
    ///
    /// Does nothing when no cursor is held or another call is still in
    /// flight. A fetch or projection failure is logged and leaves the
    /// feed untouched.
    pub async fn load_more(&mut self, client: &CmsClient, fmt: &DateFormat) {
        if self.in_flight {
            tracing::debug!("load_more already in flight, dropping call");
            return;
        }
        let Some(cursor) = self.next_page.clone() else {
            tracing::debug!("load_more called with no cursor, nothing to fetch");
            return;
        };

        self.in_flight = true;
        match self.fetch_next(client, fmt, &cursor).await {
            Ok((mut posts, next_page)) => {
                self.posts.append(&mut posts);
                self.next_page = next_page;
            }
            Err(e) => {
                tracing::warn!("failed to load more posts: {}", e);
            }
        }
        self.in_flight = false;
    }

    async fn fetch_next(
        &self,
        client: &CmsClient,
        fmt: &DateFormat,
        cursor: &str,
    ) -> Result<(Vec<PostSummary>, Option<String>), LoadError> {
        let response = client.fetch_page(cursor).await?;
        let posts = response
            .results
            .iter()
            .map(|doc| PostSummary::from_document(doc, fmt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((posts, response.next_page))
    }
}

#[derive(thiserror::Error, Debug)]
enum LoadError {
    #[error(transparent)]
    Cms(#[from] CmsError),
    #[error(transparent)]
    Projection(#[from] crate::content::post::ProjectionError),
}
