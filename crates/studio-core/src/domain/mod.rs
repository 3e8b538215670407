//! Domain entities - the content records and their storage shape.

mod document;
mod post;

pub use document::Document;
pub use post::{POST_ID_PREFIX, POST_TYPE, Post, PostDocument, Slug};
