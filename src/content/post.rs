//! Post view models
//!
//! Projections from raw store documents are explicit and typed: a missing
//! required field is an error at shaping time, never an undefined-shaped
//! value propagated into a template.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cms::Document;
use crate::helpers::DateFormat;

/// Raised when a store document lacks a field a view model requires
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("document {uid:?} is missing required field `{field}`")]
    MissingField { uid: Option<String>, field: String },
}

/// One post entry on the listing page
///
/// `first_publication_date` holds the locale-formatted display string; the
/// raw timestamp is not carried past projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub first_publication_date: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Project a raw document into a summary, formatting its date
    pub fn from_document(doc: &Document, fmt: &DateFormat) -> Result<Self, ProjectionError> {
        Ok(Self {
            uid: require_uid(doc)?,
            first_publication_date: fmt.format_opt(&doc.first_publication_date),
            title: require_str(doc, "title")?,
            subtitle: require_str(doc, "subtitle")?,
            author: require_str(doc, "author")?,
        })
    }
}

/// Rendering shape of a rich-text block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Paragraph,
    ListItem,
    OListItem,
    Preformatted,
    #[serde(untagged)]
    Other(String),
}

impl BlockKind {
    fn from_type(s: &str) -> Self {
        match s {
            "paragraph" => BlockKind::Paragraph,
            "list-item" => BlockKind::ListItem,
            "o-list-item" => BlockKind::OListItem,
            "preformatted" => BlockKind::Preformatted,
            other => BlockKind::Other(other.to_string()),
        }
    }

    /// Whether the block renders as a list item rather than a paragraph
    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockKind::ListItem | BlockKind::OListItem)
    }
}

/// One rich-text block inside a section body
///
/// `spans` are opaque formatting ranges; they pass through projection
/// verbatim and are never reinterpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub text: String,
    pub kind: BlockKind,
    pub spans: Vec<Value>,
}

/// A heading plus its body blocks, in authoring order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: Vec<Block>,
}

/// The full post document shaped for the detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<chrono::DateTime<chrono::Utc>>,
    pub last_publication_date: Option<chrono::DateTime<chrono::Utc>>,
    pub title: String,
    pub subtitle: String,
    pub banner_url: String,
    pub author: String,
    pub content: Vec<Section>,
}

impl PostDetail {
    /// Project a raw document into the detail model
    pub fn from_document(doc: &Document) -> Result<Self, ProjectionError> {
        let banner_url = doc
            .data
            .pointer("/banner/url")
            .and_then(Value::as_str)
            .ok_or_else(|| missing(doc, "banner.url"))?
            .to_string();

        let content = doc
            .data
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| missing(doc, "content"))?
            .iter()
            .map(|section| project_section(doc, section))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            uid: require_uid(doc)?,
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            title: require_str(doc, "title")?,
            subtitle: require_str(doc, "subtitle")?,
            banner_url,
            author: require_str(doc, "author")?,
            content,
        })
    }

    /// Whether the document was edited after first publication
    pub fn was_edited(&self) -> bool {
        match (self.first_publication_date, self.last_publication_date) {
            (Some(first), Some(last)) => first != last,
            _ => false,
        }
    }
}

/// A chronological neighbor of the current post, when one exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjacentPostRef {
    pub uid: String,
    pub title: String,
}

impl AdjacentPostRef {
    /// Project a neighbor document; `None` in means `None` out
    pub fn from_document(doc: Option<&Document>) -> Result<Option<Self>, ProjectionError> {
        doc.map(|doc| {
            Ok(Self {
                uid: require_uid(doc)?,
                title: require_str(doc, "title")?,
            })
        })
        .transpose()
    }
}

fn project_section(doc: &Document, section: &Value) -> Result<Section, ProjectionError> {
    let heading = section
        .get("heading")
        .and_then(Value::as_str)
        .ok_or_else(|| missing(doc, "content.heading"))?
        .to_string();

    let body = section
        .get("body")
        .and_then(Value::as_array)
        .ok_or_else(|| missing(doc, "content.body"))?
        .iter()
        .map(|block| project_block(doc, block))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Section { heading, body })
}

fn project_block(doc: &Document, block: &Value) -> Result<Block, ProjectionError> {
    let text = block
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| missing(doc, "content.body.text"))?
        .to_string();

    let kind = block
        .get("type")
        .and_then(Value::as_str)
        .map(BlockKind::from_type)
        .ok_or_else(|| missing(doc, "content.body.type"))?;

    let spans = block
        .get("spans")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(Block { text, kind, spans })
}

fn require_uid(doc: &Document) -> Result<String, ProjectionError> {
    doc.uid.clone().ok_or_else(|| missing(doc, "uid"))
}

fn require_str(doc: &Document, field: &str) -> Result<String, ProjectionError> {
    doc.data
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| missing(doc, field))
}

fn missing(doc: &Document, field: &str) -> ProjectionError {
    ProjectionError::MissingField {
        uid: doc.uid.clone(),
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{DateFormat, Locale};
    use chrono::TimeZone;

    fn doc(data: serde_json::Value) -> Document {
        Document {
            id: "X1".to_string(),
            uid: Some("a-post".to_string()),
            doc_type: "post".to_string(),
            first_publication_date: Some(
                chrono::Utc.with_ymd_and_hms(2021, 3, 15, 10, 0, 0).unwrap(),
            ),
            last_publication_date: Some(
                chrono::Utc.with_ymd_and_hms(2021, 3, 15, 10, 0, 0).unwrap(),
            ),
            data,
        }
    }

    #[test]
    fn test_summary_projection_formats_date() {
        let doc = doc(serde_json::json!({
            "title": "Como utilizar Hooks",
            "subtitle": "Pensando em sincronização",
            "author": "Joseph Oliveira"
        }));
        let fmt = DateFormat::new("dd MMM yyyy", Locale::PtBr);
        let summary = PostSummary::from_document(&doc, &fmt).unwrap();

        assert_eq!(summary.uid, "a-post");
        assert_eq!(summary.first_publication_date, "15 mar 2021");
        assert_eq!(summary.title, "Como utilizar Hooks");
    }

    #[test]
    fn test_summary_projection_fails_fast_on_missing_field() {
        let doc = doc(serde_json::json!({"title": "No author here", "subtitle": "s"}));
        let fmt = DateFormat::new("dd MMM yyyy", Locale::PtBr);
        let err = PostSummary::from_document(&doc, &fmt).unwrap_err();
        assert!(err.to_string().contains("author"));
    }

    #[test]
    fn test_detail_projection_preserves_spans_and_order() {
        let doc = doc(serde_json::json!({
            "title": "T", "subtitle": "S", "author": "A",
            "banner": {"url": "https://images.example/banner.png"},
            "content": [
                {"heading": "Primeira", "body": [
                    {"text": "um paragrafo", "type": "paragraph",
                     "spans": [{"start": 0, "end": 2, "type": "strong"}]},
                    {"text": "um item", "type": "list-item", "spans": []}
                ]},
                {"heading": "Segunda", "body": []}
            ]
        }));

        let detail = PostDetail::from_document(&doc).unwrap();
        assert_eq!(detail.banner_url, "https://images.example/banner.png");
        assert_eq!(detail.content.len(), 2);
        assert_eq!(detail.content[0].heading, "Primeira");
        assert_eq!(detail.content[1].heading, "Segunda");

        let blocks = &detail.content[0].body;
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert!(!blocks[0].kind.is_list_item());
        assert_eq!(blocks[0].spans.len(), 1);
        assert_eq!(blocks[1].kind, BlockKind::ListItem);
        assert!(blocks[1].kind.is_list_item());
    }

    #[test]
    fn test_detail_projection_requires_banner() {
        let doc = doc(serde_json::json!({
            "title": "T", "subtitle": "S", "author": "A",
            "content": []
        }));
        let err = PostDetail::from_document(&doc).unwrap_err();
        assert!(err.to_string().contains("banner.url"));
    }

    #[test]
    fn test_edit_marker_only_when_dates_differ() {
        let mut d = doc(serde_json::json!({
            "title": "T", "subtitle": "S", "author": "A",
            "banner": {"url": "u"}, "content": []
        }));
        let detail = PostDetail::from_document(&d).unwrap();
        assert!(!detail.was_edited());

        d.last_publication_date =
            Some(chrono::Utc.with_ymd_and_hms(2021, 4, 1, 9, 30, 0).unwrap());
        let detail = PostDetail::from_document(&d).unwrap();
        assert!(detail.was_edited());
    }

    #[test]
    fn test_unknown_block_type_is_kept() {
        assert_eq!(
            BlockKind::from_type("image"),
            BlockKind::Other("image".to_string())
        );
        assert_eq!(BlockKind::from_type("o-list-item"), BlockKind::OListItem);
    }
}
