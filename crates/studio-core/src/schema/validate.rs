//! Document validation against a [`SchemaType`].

use chrono::NaiveDate;
use serde_json::Value;

use super::{FieldDef, FieldType, SchemaType};
use crate::domain::Document;
use crate::error::{FieldViolation, ValidationError, ViolationKind};

/// Date format used when a date field declares none.
const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

impl SchemaType {
    /// Check a document against every field rule.
    ///
    /// All violations are collected; the document is valid only if there are none.
    /// Fields the schema does not declare are ignored.
    pub fn validate(&self, doc: &Document) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if doc.doc_type != self.name {
            violations.push(FieldViolation::new(
                "_type",
                ViolationKind::WrongDocumentType {
                    expected: self.name.clone(),
                    found: doc.doc_type.clone(),
                },
            ));
        }

        for field in &self.fields {
            if let Some(kind) = check_field(field, doc.field(&field.name)) {
                violations.push(FieldViolation::new(field.name.clone(), kind));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                document_id: doc.id.clone(),
                violations,
            })
        }
    }
}

fn check_field(field: &FieldDef, value: Option<&Value>) -> Option<ViolationKind> {
    let value = match value {
        None | Some(Value::Null) => {
            return field.is_required().then_some(ViolationKind::Missing);
        }
        Some(value) => value,
    };

    if field.is_required() && is_blank(field.field_type, value) {
        return Some(ViolationKind::Missing);
    }

    check_type(field, value)
}

fn check_type(field: &FieldDef, value: &Value) -> Option<ViolationKind> {
    let expected = field.field_type.as_str();
    let invalid = Some(ViolationKind::InvalidType { expected });

    match field.field_type {
        FieldType::String | FieldType::Text if !value.is_string() => invalid,
        FieldType::Boolean if !value.is_boolean() => invalid,
        FieldType::String | FieldType::Text | FieldType::Boolean => None,
        FieldType::Slug => match value.get("current") {
            Some(Value::String(_)) | None if value.is_object() => None,
            _ => invalid,
        },
        FieldType::Array => {
            let Some(items) = value.as_array() else {
                return invalid;
            };
            let strings_only = field
                .of
                .iter()
                .all(|member| member.member_type == FieldType::String);
            (strings_only && !items.iter().all(Value::is_string))
                .then_some(ViolationKind::InvalidType {
                    expected: "array of strings",
                })
        }
        FieldType::Date => {
            let Some(raw) = value.as_str() else {
                return invalid;
            };
            let format = field.date_format().unwrap_or(DEFAULT_DATE_FORMAT);
            parse_date(raw, format)
                .is_none()
                .then(|| ViolationKind::InvalidDate {
                    format: format.to_string(),
                })
        }
    }
}

/// Present but carrying nothing: empty string, slug without `current`.
fn is_blank(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::String | FieldType::Text | FieldType::Date => {
            value.as_str().is_some_and(|s| s.trim().is_empty())
        }
        FieldType::Slug => {
            value.is_object()
                && value
                    .get("current")
                    .and_then(Value::as_str)
                    .is_none_or(|s| s.trim().is_empty())
        }
        FieldType::Array | FieldType::Boolean => false,
    }
}

/// Parse a date written in the studio's moment-style format.
///
/// The input must match the format exactly: zero-padded fields, four-digit unsigned year.
fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    let chrono_format = format
        .replace("YYYY", "%Y")
        .replace("MM", "%m")
        .replace("DD", "%d");
    let date = NaiveDate::parse_from_str(raw, &chrono_format).ok()?;
    (date.format(&chrono_format).to_string() == raw).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::post_schema;
    use serde_json::json;

    fn valid_post() -> Document {
        serde_json::from_value(json!({
            "_id": "post-hello-world",
            "_type": "post",
            "title": "Hello, World!",
            "slug": {"_type": "slug", "current": "hello-world"},
            "description": "Welcome",
            "date": "2026-01-07",
            "tags": ["personal", "meta"],
            "readingTime": "3 min read",
            "draft": false,
            "content": "# Hello"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_post_passes() {
        assert!(post_schema().validate(&valid_post()).is_ok());
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        let schema = post_schema();
        for field in ["title", "slug", "description", "date", "content"] {
            let mut doc = valid_post();
            doc.remove_field(field);

            let err = schema.validate(&doc).unwrap_err();
            assert_eq!(err.violations.len(), 1, "field {field}");
            assert_eq!(err.violations[0].field, field);
            assert_eq!(err.violations[0].kind, ViolationKind::Missing);
        }
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let mut doc = valid_post();
        doc.set_field("title", "  ");
        doc.set_field("slug", json!({"_type": "slug"}));
        doc.set_field("content", Value::Null);
        doc.set_field("date", "");

        let err = post_schema().validate(&doc).unwrap_err();
        assert_eq!(err.violations.len(), 4);
        assert!(
            err.violations
                .iter()
                .all(|v| v.kind == ViolationKind::Missing)
        );
        for field in ["title", "slug", "content", "date"] {
            assert!(err.has_field(field), "field {field}");
        }
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let mut doc = valid_post();
        doc.remove_field("tags");
        doc.remove_field("readingTime");
        doc.remove_field("draft");

        assert!(post_schema().validate(&doc).is_ok());
    }

    #[test]
    fn test_type_mismatches_are_reported() {
        let mut doc = valid_post();
        doc.set_field("draft", "no");
        doc.set_field("tags", json!(["ok", 3]));
        doc.set_field("slug", "hello-world");

        let err = post_schema().validate(&doc).unwrap_err();
        assert_eq!(err.violations.len(), 3);
        assert!(err.violations.contains(&FieldViolation::new(
            "draft",
            ViolationKind::InvalidType { expected: "boolean" }
        )));
        assert!(err.has_field("tags"));
        assert!(err.violations.contains(&FieldViolation::new(
            "slug",
            ViolationKind::InvalidType { expected: "slug" }
        )));
    }

    #[test]
    fn test_date_must_match_format() {
        let mut doc = valid_post();
        doc.set_field("date", "07/01/2026");

        let err = post_schema().validate(&doc).unwrap_err();
        assert_eq!(
            err.violations[0].kind,
            ViolationKind::InvalidDate {
                format: "YYYY-MM-DD".to_string()
            }
        );

        doc.set_field("date", "2026-02-30");
        assert!(post_schema().validate(&doc).is_err());
    }

    #[test]
    fn test_date_fields_must_be_zero_padded_four_digit_year() {
        let schema = post_schema();
        for raw in ["2026-1-7", "26-01-07", "+2026-01-07", "2026-01-07 ", "02026-01-07"] {
            let mut doc = valid_post();
            doc.set_field("date", raw);

            let err = schema.validate(&doc).unwrap_err();
            assert_eq!(
                err.violations,
                [FieldViolation::new(
                    "date",
                    ViolationKind::InvalidDate {
                        format: "YYYY-MM-DD".to_string()
                    }
                )],
                "date {raw:?}"
            );
        }

        let mut doc = valid_post();
        doc.set_field("date", "2024-02-29");
        assert!(schema.validate(&doc).is_ok());
    }

    #[test]
    fn test_wrong_document_type() {
        let mut doc = valid_post();
        doc.doc_type = "page".to_string();

        let err = post_schema().validate(&doc).unwrap_err();
        assert!(err.has_field("_type"));
    }
}
