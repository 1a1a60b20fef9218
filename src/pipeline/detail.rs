//! Detail pipeline: one post, its reading time, and its neighbors

use anyhow::Result;
use serde::Serialize;

use crate::cms::{CmsClient, CmsError, Document, Predicate, QueryOptions};
use crate::config::SiteConfig;
use crate::content::{estimate_minutes, AdjacentPostRef, PostDetail};

/// Everything the post page renders
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub post: PostDetail,
    /// Publication date, display-formatted
    pub formatted_date: String,
    /// Estimated reading time in minutes
    pub reading_minutes: u32,
    /// Chronologically previous post, if any
    pub prev: Option<AdjacentPostRef>,
    /// Chronologically next post, if any
    pub next: Option<AdjacentPostRef>,
    /// "Edited on" marker; present only when the document was edited
    /// after first publication. Formats the first publication date, which
    /// is what the product has always shown.
    pub edited_on: Option<String>,
}

/// Build the detail view for a slug; `None` means not found (404)
///
/// A preview session passes its revision ref, pinning the document
/// fetch to the previewed (possibly unpublished) content.
pub async fn build(
    client: &CmsClient,
    config: &SiteConfig,
    slug: &str,
    preview_ref: Option<&str>,
) -> Result<Option<PostView>> {
    let post_type = &config.cms.post_type;

    let options = QueryOptions {
        r#ref: preview_ref.map(str::to_string),
        ..Default::default()
    };
    let Some(doc) = client.get_by_uid(post_type, slug, &options).await? else {
        tracing::debug!("post not found: {}", slug);
        return Ok(None);
    };

    let post = PostDetail::from_document(&doc)?;
    let fmt = config.date_format();

    // Strictly sequential: detail fetch, then previous, then next
    let prev_doc = adjacent(client, post_type, &doc.id, Direction::Desc).await?;
    let next_doc = adjacent(client, post_type, &doc.id, Direction::Asc).await?;
    let prev = AdjacentPostRef::from_document(prev_doc.as_ref())?;
    let next = AdjacentPostRef::from_document(next_doc.as_ref())?;

    let edited_on = post
        .was_edited()
        .then(|| fmt.format_opt(&post.first_publication_date));

    Ok(Some(PostView {
        formatted_date: fmt.format_opt(&post.first_publication_date),
        reading_minutes: estimate_minutes(&post.content),
        prev,
        next,
        edited_on,
        post,
    }))
}

enum Direction {
    Asc,
    Desc,
}

/// One time-ordered query for the single document positioned after `id`
async fn adjacent(
    client: &CmsClient,
    post_type: &str,
    id: &str,
    direction: Direction,
) -> Result<Option<Document>, CmsError> {
    let orderings = match direction {
        Direction::Asc => "[document.first_publication_date]",
        Direction::Desc => "[document.first_publication_date desc]",
    };
    let options = QueryOptions {
        fetch: vec![format!("{}.title", post_type)],
        page_size: Some(1),
        after: Some(id.to_string()),
        orderings: Some(orderings.to_string()),
        ..Default::default()
    };

    let response = client
        .query(&Predicate::at("document.type", post_type), &options)
        .await?;
    Ok(response.results.into_iter().next())
}
