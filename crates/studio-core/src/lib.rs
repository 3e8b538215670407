//! # Studio Core
//!
//! The domain layer of the blog content studio: the post record and its
//! document shape, the schema the studio validates against, and the content
//! client port the migration writes through.
//! This crate contains no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod schema;

pub use error::{StoreError, ValidationError};
