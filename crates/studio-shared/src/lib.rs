//! # Studio Shared
//!
//! Wire types of the content platform's HTTP data API.
//! Mutations and documents stay generic so this crate has no domain dependency.

pub mod dto;
pub mod response;

pub use response::{ApiErrorBody, ApiErrorResponse};
