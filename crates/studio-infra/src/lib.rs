//! # Studio Infrastructure
//!
//! Concrete implementations of the content client port defined in `studio-core`.
//!
//! ## Feature Flags
//!
//! - `http` (default) - Client for the platform's HTTP data API via reqwest
//! - `minimal` - No external dependencies, in-memory store only

pub mod content;

// Re-exports - In-Memory
pub use content::InMemoryContentStore;

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use content::{ContentApiConfig, HttpContentClient};
