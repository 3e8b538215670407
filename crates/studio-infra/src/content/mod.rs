//! Content client implementations - HTTP data API and in-memory store.

mod memory;

#[cfg(feature = "http")]
mod http;

pub use memory::InMemoryContentStore;

#[cfg(feature = "http")]
pub use http::{ContentApiConfig, HttpContentClient};
