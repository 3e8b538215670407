//! The migration procedure: one transaction, one create-or-replace per post.

use std::io::{self, Write};

use studio_core::StoreError;
use studio_core::domain::{Document, Post};
use studio_core::ports::{ContentClient, Operation};
use studio_core::schema::DRAFT_PREFIX;

/// Migration failures.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    CommitRejected(#[from] StoreError),

    #[error("Failed to build document for '{slug}': {source}")]
    Document {
        slug: String,
        source: serde_json::Error,
    },

    #[error("Failed to write console output: {0}")]
    Console(#[from] io::Error),
}

/// Summary of a committed migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub processed: usize,
    pub drafts: usize,
    pub transaction_id: String,
    pub created: usize,
    pub updated: usize,
}

/// Write every post in a single transaction.
///
/// Progress lines go to `out`. The records are trusted as-is; validation is
/// left to the content store, which rejects the whole batch on failure.
pub async fn migrate_posts<C>(
    client: &C,
    posts: &[Post],
    out: &mut impl Write,
) -> Result<MigrationReport, MigrationError>
where
    C: ContentClient + ?Sized,
{
    writeln!(out, "Starting migration of blog posts to the content store...")?;
    writeln!(out, "Found {} posts to migrate", posts.len())?;
    writeln!(out)?;

    let mut transaction = client.transaction();
    let mut drafts = 0;

    for post in posts {
        let doc = Document::try_from(post.to_document()).map_err(|source| {
            MigrationError::Document {
                slug: post.slug.clone(),
                source,
            }
        })?;

        let marker = if post.is_draft() {
            drafts += 1;
            DRAFT_PREFIX
        } else {
            ""
        };
        writeln!(out, "  → {marker}{}", post.title)?;
        tracing::debug!(document_id = %doc.id, draft = post.is_draft(), "Queued document");

        transaction.create_or_replace(doc);
    }

    let result = client.commit(transaction).await?;

    tracing::info!(
        transaction_id = %result.transaction_id,
        documents = result.results.len(),
        "Migration committed"
    );

    // Committed: console errors from here on are not migration failures.
    if let Err(e) = write_success(out) {
        tracing::warn!(error = %e, "Failed to write completion message");
    }

    Ok(MigrationReport {
        processed: posts.len(),
        drafts,
        created: result.count(Operation::Create),
        updated: result.count(Operation::Update),
        transaction_id: result.transaction_id,
    })
}

fn write_success(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "✅ Migration complete! All posts imported successfully.")?;
    writeln!(out)?;
    writeln!(out, "Refresh the studio to see your posts.")
}
