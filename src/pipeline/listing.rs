//! Listing pipeline: first page of post summaries plus the cursor

use anyhow::Result;

use crate::cms::{CmsClient, Predicate, QueryOptions};
use crate::config::SiteConfig;
use crate::content::{PostFeed, PostSummary};

/// Fetch page 1 of post summaries in the store's default ordering
pub async fn build(client: &CmsClient, config: &SiteConfig) -> Result<PostFeed> {
    let post_type = &config.cms.post_type;
    let options = QueryOptions {
        fetch: vec![
            format!("{}.title", post_type),
            format!("{}.subtitle", post_type),
            format!("{}.author", post_type),
        ],
        page_size: Some(config.pagination.page_size),
        ..Default::default()
    };

    let response = client
        .query(&Predicate::at("document.type", post_type), &options)
        .await?;

    let fmt = config.date_format();
    let posts = response
        .results
        .iter()
        .map(|doc| PostSummary::from_document(doc, &fmt))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "listing: {} posts, more={}",
        posts.len(),
        response.next_page.is_some()
    );

    Ok(PostFeed::new(posts, response.next_page))
}
