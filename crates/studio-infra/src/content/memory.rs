//! In-memory content store - the simulated collaborator used for dry runs and tests.
//!
//! Commits are all-or-nothing: every mutation is validated before any is
//! applied, and the whole batch lands under one write lock.
//! Note: Data is lost on process restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use studio_core::StoreError;
use studio_core::domain::Document;
use studio_core::ports::{CommitResult, ContentClient, Mutation, MutationResult, Operation, Transaction};
use studio_core::schema::SchemaType;

/// In-memory content store using a BTreeMap with async RwLock.
pub struct InMemoryContentStore {
    documents: RwLock<BTreeMap<String, Document>>,
    schemas: HashMap<String, SchemaType>,
    rejection: Mutex<Option<String>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            schemas: HashMap::new(),
            rejection: Mutex::new(None),
        }
    }

    /// Validate documents of this type on commit.
    pub fn with_schema(mut self, schema: SchemaType) -> Self {
        self.schemas.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_schemas(self, schemas: impl IntoIterator<Item = SchemaType>) -> Self {
        schemas.into_iter().fold(self, Self::with_schema)
    }

    /// Reject every following commit with the given reason.
    pub fn reject_commits(&self, reason: impl Into<String>) {
        *self.rejection.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.into());
    }

    /// Accept commits again.
    pub fn accept_commits(&self) {
        *self.rejection.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Stored ids, sorted.
    pub async fn document_ids(&self) -> Vec<String> {
        self.documents.read().await.keys().cloned().collect()
    }

    /// Copy of every stored document, keyed by id.
    pub async fn snapshot(&self) -> BTreeMap<String, Document> {
        self.documents.read().await.clone()
    }

    fn rejection(&self) -> Option<String> {
        self.rejection
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn validate(&self, mutation: &Mutation) -> Result<(), StoreError> {
        let doc = mutation.document();
        match self.schemas.get(&doc.doc_type) {
            Some(schema) => schema.validate(doc).map_err(StoreError::from),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentClient for InMemoryContentStore {
    async fn commit(&self, transaction: Transaction) -> Result<CommitResult, StoreError> {
        let (id, mutations) = transaction.into_parts();
        let transaction_id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        if let Some(reason) = self.rejection() {
            tracing::warn!(transaction_id = %transaction_id, %reason, "Commit rejected");
            return Err(StoreError::Rejected {
                status: 409,
                message: reason,
            });
        }

        for mutation in &mutations {
            self.validate(mutation)?;
        }

        let mut documents = self.documents.write().await;
        let results = mutations
            .into_iter()
            .map(|mutation| match mutation {
                Mutation::CreateOrReplace(doc) => {
                    let id = doc.id.clone();
                    let operation = match documents.insert(id.clone(), doc) {
                        Some(_) => Operation::Update,
                        None => Operation::Create,
                    };
                    MutationResult { id, operation }
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            transaction_id = %transaction_id,
            mutations = results.len(),
            stored = documents.len(),
            "Transaction committed"
        );

        Ok(CommitResult {
            transaction_id,
            results,
        })
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::domain::Post;
    use studio_core::schema::post_schema;

    fn post(slug: &str, draft: Option<bool>) -> Document {
        let post = Post {
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            description: "Description".to_string(),
            date: "2026-01-09".to_string(),
            tags: None,
            reading_time: None,
            draft,
            content: "Body".to_string(),
        };
        Document::try_from(post.to_document()).unwrap()
    }

    fn batch(docs: impl IntoIterator<Item = Document>) -> Transaction {
        let mut tx = Transaction::new();
        for doc in docs {
            tx.create_or_replace(doc);
        }
        tx
    }

    #[tokio::test]
    async fn test_commit_and_get() {
        let store = InMemoryContentStore::new().with_schema(post_schema());
        let result = store
            .commit(batch([post("a", None), post("b", Some(true))]))
            .await
            .unwrap();

        assert_eq!(result.count(Operation::Create), 2);
        assert_eq!(store.document_ids().await, ["post-a", "post-b"]);

        let stored = store.get_document("post-b").await.unwrap().unwrap();
        assert_eq!(stored.field("draft"), Some(&serde_json::json!(true)));
        assert!(store.get_document("post-c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recommit_replaces_instead_of_duplicating() {
        let store = InMemoryContentStore::new().with_schema(post_schema());

        store.commit(batch([post("a", None), post("b", None)])).await.unwrap();
        let first = store.snapshot().await;

        let result = store
            .commit(batch([post("a", None), post("b", None)]))
            .await
            .unwrap();

        assert_eq!(result.count(Operation::Update), 2);
        assert_eq!(store.snapshot().await, first);
    }

    #[tokio::test]
    async fn test_rejected_commit_applies_nothing() {
        let store = InMemoryContentStore::new();
        store.reject_commits("unauthorized");

        let err = store.commit(batch([post("a", None)])).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));
        assert!(store.is_empty().await);

        store.accept_commits();
        store.commit(batch([post("a", None)])).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_one_invalid_document_fails_the_batch() {
        let store = InMemoryContentStore::new().with_schema(post_schema());
        let mut invalid = post("broken", None);
        invalid.remove_field("title");

        let err = store
            .commit(batch([post("a", None), invalid, post("c", None)]))
            .await
            .unwrap_err();

        match err {
            StoreError::Validation(e) => {
                assert_eq!(e.document_id, "post-broken");
                assert!(e.has_field("title"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unregistered_types_are_not_validated() {
        let store = InMemoryContentStore::new();
        let result = store
            .commit(batch([Document::new("settings", "siteSettings")]))
            .await
            .unwrap();

        assert_eq!(result.results.len(), 1);
    }

    #[tokio::test]
    async fn test_caller_transaction_id_is_kept() {
        let store = InMemoryContentStore::new();
        let result = store
            .commit(batch([post("a", None)]).with_id("migration-1"))
            .await
            .unwrap();

        assert_eq!(result.transaction_id, "migration-1");
    }

    #[tokio::test]
    async fn test_empty_transaction_is_a_noop() {
        let store = InMemoryContentStore::new();
        let result = store.commit(store.transaction()).await.unwrap();

        assert!(result.results.is_empty());
        assert!(store.is_empty().await);
    }
}
