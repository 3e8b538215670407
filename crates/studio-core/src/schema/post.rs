use serde_json::{Map, Value};

use super::{FieldDef, FieldOptions, FieldType, Preview, PreviewConfig, SchemaType};
use crate::domain::POST_TYPE;

/// Title prefix of draft posts in listings.
pub const DRAFT_PREFIX: &str = "[DRAFT] ";

/// The blog post document type.
pub fn post_schema() -> SchemaType {
    SchemaType::document(POST_TYPE, "Blog Post")
        .field_def(FieldDef::new("title", "Title", FieldType::String).required())
        .field_def(
            FieldDef::new("slug", "Slug", FieldType::Slug)
                .options(FieldOptions {
                    source: Some("title".to_string()),
                    max_length: Some(96),
                    ..Default::default()
                })
                .required(),
        )
        .field_def(
            FieldDef::new("description", "Description", FieldType::Text)
                .rows(3)
                .required(),
        )
        .field_def(
            FieldDef::new("date", "Publish Date", FieldType::Date)
                .options(FieldOptions {
                    date_format: Some("YYYY-MM-DD".to_string()),
                    ..Default::default()
                })
                .required(),
        )
        .field_def(
            FieldDef::new("tags", "Tags", FieldType::Array)
                .of(FieldType::String)
                .options(FieldOptions {
                    layout: Some("tags".to_string()),
                    ..Default::default()
                }),
        )
        .field_def(
            FieldDef::new("readingTime", "Reading Time", FieldType::String)
                .description("e.g., \"5 min read\""),
        )
        .field_def(
            FieldDef::new("draft", "Draft", FieldType::Boolean)
                .description("If true, post is hidden from listing but accessible by direct URL")
                .initial_value(false),
        )
        .field_def(
            FieldDef::new("content", "Content", FieldType::Text)
                .description("Markdown content for the blog post")
                .required(),
        )
        .with_preview(PreviewConfig {
            select: [("title", "title"), ("date", "date"), ("draft", "draft")]
                .into_iter()
                .map(|(alias, path)| (alias.to_string(), path.to_string()))
                .collect(),
            prepare: prepare_post,
        })
}

fn prepare_post(selection: &Map<String, Value>) -> Preview {
    let title = selection
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let draft = selection
        .get("draft")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Preview {
        title: if draft {
            format!("{DRAFT_PREFIX}{title}")
        } else {
            title.to_string()
        },
        subtitle: selection
            .get("date")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
