use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Document;
use crate::error::StoreError;

/// A single write inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutation {
    /// Create the document, or replace it wholesale if the id exists.
    CreateOrReplace(Document),
}

impl Mutation {
    pub fn document(&self) -> &Document {
        match self {
            Mutation::CreateOrReplace(doc) => doc,
        }
    }
}

/// Batch of mutations committed with all-or-nothing semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    id: Option<String>,
    mutations: Vec<Mutation>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-chosen transaction id instead of a store-assigned one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn create_or_replace(&mut self, doc: Document) -> &mut Self {
        self.mutations.push(Mutation::CreateOrReplace(doc));
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn into_parts(self) -> (Option<String>, Vec<Mutation>) {
        (self.id, self.mutations)
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Ids of the documents touched, in mutation order.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.mutations.iter().map(|m| m.document().id.as_str())
    }
}

/// What a committed mutation did to its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub id: String,
    pub operation: Operation,
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResult {
    pub transaction_id: String,
    pub results: Vec<MutationResult>,
}

impl CommitResult {
    pub fn count(&self, operation: Operation) -> usize {
        self.results
            .iter()
            .filter(|r| r.operation == operation)
            .count()
    }
}

/// Content client - transactional write access to a content store.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Start an empty transaction.
    fn transaction(&self) -> Transaction {
        Transaction::new()
    }

    /// Commit every mutation of the transaction, or none of them.
    async fn commit(&self, transaction: Transaction) -> Result<CommitResult, StoreError>;

    /// Fetch a document by id.
    async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_accumulates_in_order() {
        let mut tx = Transaction::new().with_id("tx-1");
        tx.create_or_replace(Document::new("post-a", "post"))
            .create_or_replace(Document::new("post-b", "post"));

        assert_eq!(tx.id(), Some("tx-1"));
        assert_eq!(tx.len(), 2);
        assert_eq!(tx.document_ids().collect::<Vec<_>>(), ["post-a", "post-b"]);
    }

    #[test]
    fn test_mutation_wire_shape() {
        let mut doc = Document::new("post-a", "post");
        doc.set_field("title", "A");

        let value = serde_json::to_value(Mutation::CreateOrReplace(doc)).unwrap();
        assert_eq!(
            value,
            json!({"createOrReplace": {"_id": "post-a", "_type": "post", "title": "A"}})
        );
    }

    #[test]
    fn test_commit_result_counts() {
        let result: CommitResult = serde_json::from_value(json!({
            "transactionId": "abc",
            "results": [
                {"id": "post-a", "operation": "create"},
                {"id": "post-b", "operation": "update"},
                {"id": "post-c", "operation": "create"}
            ]
        }))
        .unwrap();

        assert_eq!(result.count(Operation::Create), 2);
        assert_eq!(result.count(Operation::Update), 1);
    }
}
