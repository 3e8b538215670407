//! Domain-level error types.

use std::fmt;

use thiserror::Error;

/// Why a single field failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Required field is absent, null, or blank.
    Missing,
    /// Value has the wrong JSON shape for the declared field type.
    InvalidType { expected: &'static str },
    /// Value is a string but not a calendar date in the declared format.
    InvalidDate { format: String },
    /// Document `_type` does not match the schema it was checked against.
    WrongDocumentType { expected: String, found: String },
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: required", self.field),
            ViolationKind::InvalidType { expected } => {
                write!(f, "{}: expected {}", self.field, expected)
            }
            ViolationKind::InvalidDate { format } => {
                write!(f, "{}: expected a date formatted {}", self.field, format)
            }
            ViolationKind::WrongDocumentType { expected, found } => {
                write!(f, "{}: expected '{}', found '{}'", self.field, expected, found)
            }
        }
    }
}

/// Schema validation failure - every violation found in one document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Document {document_id} failed validation: {}", join(.violations))]
pub struct ValidationError {
    pub document_id: String,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Whether the named field is among the violations.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Content store errors - a failed commit or lookup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Commit rejected by content store (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Connection to content store failed: {0}")]
    Connection(String),

    #[error("Failed to decode content store response: {0}")]
    Decode(String),

    #[error("Failed to serialize document: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
