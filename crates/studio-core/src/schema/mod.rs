//! Schema declarations - the document types the studio renders and validates.
//!
//! A [`SchemaType`] is pure data: field list, per-field rules, options, and a
//! preview rule. It serializes to the shape the studio consumes and doubles as
//! the validator the simulated content store runs on commit.

mod post;
mod validate;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::Document;

pub use post::{DRAFT_PREFIX, post_schema};

/// All document types registered with the studio.
pub fn schema_types() -> Vec<SchemaType> {
    vec![post_schema()]
}

/// A document type declaration.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaType {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub fields: Vec<FieldDef>,
    pub preview: PreviewConfig,
}

impl SchemaType {
    /// Declare a document type with no fields.
    pub fn document(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            kind: "document".to_string(),
            fields: Vec::new(),
            preview: PreviewConfig::default(),
        }
    }

    pub fn field_def(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of fields carrying a `required` rule, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name.as_str())
    }

    /// Initial values keyed by field name.
    pub fn initial_values(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter_map(|f| f.initial_value.clone().map(|v| (f.name.clone(), v)))
            .collect()
    }

    /// Fill absent fields with their initial values. Present fields are kept.
    pub fn apply_initial_values(&self, doc: &mut Document) {
        for (name, value) in self.initial_values() {
            doc.fields.entry(name).or_insert(value);
        }
    }

    /// Render the listing preview of a document.
    pub fn preview(&self, doc: &Document) -> Preview {
        let selection: Map<String, Value> = self
            .preview
            .select
            .iter()
            .map(|(alias, path)| {
                let value = match path.as_str() {
                    "_id" => Value::String(doc.id.clone()),
                    _ => doc.field(path).cloned().unwrap_or(Value::Null),
                };
                (alias.clone(), value)
            })
            .collect();

        (self.preview.prepare)(&selection)
    }
}

/// Primitive field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Slug,
    Text,
    Date,
    Array,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Slug => "slug",
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::Array => "array",
            FieldType::Boolean => "boolean",
        }
    }
}

/// Member type of an array field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayMember {
    #[serde(rename = "type")]
    pub member_type: FieldType,
}

/// Per-field options. Only the ones relevant to the field type are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptions {
    /// Field a slug is generated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    /// Array input layout, e.g. `tags`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

/// Validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    Required,
}

/// A field declaration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub of: Vec<ArrayMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<Rule>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, title: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            field_type,
            description: None,
            rows: None,
            options: None,
            of: Vec::new(),
            initial_value: None,
            validation: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.validation.push(Rule::Required);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn of(mut self, member_type: FieldType) -> Self {
        self.of.push(ArrayMember { member_type });
        self
    }

    pub fn initial_value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.validation.contains(&Rule::Required)
    }

    pub fn date_format(&self) -> Option<&str> {
        self.options.as_ref()?.date_format.as_deref()
    }
}

/// Listing preview of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Maps the selected values to a [`Preview`].
pub type PrepareFn = fn(&Map<String, Value>) -> Preview;

/// Preview rule: which fields to select, and how to present them.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewConfig {
    /// Alias to field name.
    pub select: BTreeMap<String, String>,
    #[serde(skip)]
    pub prepare: PrepareFn,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            select: BTreeMap::from([("title".to_string(), "_id".to_string())]),
            prepare: prepare_title,
        }
    }
}

fn prepare_title(selection: &Map<String, Value>) -> Preview {
    Preview {
        title: selection
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        subtitle: None,
    }
}
