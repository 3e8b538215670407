use serde::{Deserialize, Serialize};

use super::Document;

/// Document type name of blog posts.
pub const POST_TYPE: &str = "post";

/// Prefix of every post document id.
pub const POST_ID_PREFIX: &str = "post-";

/// Post record - a blog post as authored, before it becomes a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Publish date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub reading_time: Option<String>,
    /// `None` falls back to the schema's initial value (not a draft).
    #[serde(default)]
    pub draft: Option<bool>,
    /// Markdown body.
    pub content: String,
}

impl Post {
    /// Deterministic document id, so re-running a write replaces the record.
    pub fn document_id(&self) -> String {
        format!("{POST_ID_PREFIX}{}", self.slug)
    }

    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }

    /// Map the record into its storage shape.
    pub fn to_document(&self) -> PostDocument {
        PostDocument {
            id: self.document_id(),
            doc_type: POST_TYPE.to_string(),
            title: self.title.clone(),
            slug: Slug::new(&self.slug),
            description: self.description.clone(),
            date: self.date.clone(),
            tags: self.tags.clone(),
            reading_time: self.reading_time.clone(),
            draft: self.is_draft(),
            content: self.content.clone(),
        }
    }
}

/// Slug object as stored: `{ "_type": "slug", "current": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(rename = "_type")]
    pub slug_type: String,
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            slug_type: "slug".to_string(),
            current: current.into(),
        }
    }
}

/// Post document - the storage shape of a [`Post`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<String>,
    pub draft: bool,
    pub content: String,
}

impl TryFrom<PostDocument> for Document {
    type Error = serde_json::Error;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        serde_json::from_value(serde_json::to_value(doc)?)
    }
}

impl TryFrom<Document> for PostDocument {
    type Error = serde_json::Error;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        serde_json::from_value(serde_json::to_value(doc)?)
    }
}
