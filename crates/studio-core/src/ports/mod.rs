//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod content;

pub use content::{CommitResult, ContentClient, Mutation, MutationResult, Operation, Transaction};
