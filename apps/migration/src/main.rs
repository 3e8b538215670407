//! Migration CLI tool - imports the blog posts into the content store.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use studio_core::domain::Document;
use studio_core::ports::ContentClient;
use studio_core::schema::{post_schema, schema_types};
use studio_infra::{HttpContentClient, InMemoryContentStore};

mod config;
mod migrate;
mod posts;
mod telemetry;

use config::{LogFormat, MigrationConfig};
use migrate::migrate_posts;

#[derive(Debug, Parser)]
#[command(name = "migrate-posts", version, about = "Import the blog posts into the content store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write every post in one transaction (the default).
    Run {
        /// Validate the batch against an in-memory store instead of the remote API.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the registered schema types as JSON.
    Schema,
    /// List the posts with their document ids.
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    telemetry::init_telemetry(LogFormat::from_env());

    let command = cli.command.unwrap_or(Command::Run { dry_run: false });
    let result = execute(command, &|name| std::env::var(name).ok()).await;

    ExitCode::from(exit_status(result))
}

/// Report the outcome and map it to the process exit status: 0 on success, 1 on any failure.
fn exit_status(result: anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Migration failed");
            eprintln!("\n❌ Migration failed: {e:#}");
            1
        }
    }
}

/// Run one command. Only the remote run reads the content API settings.
async fn execute(command: Command, env: &dyn Fn(&str) -> Option<String>) -> anyhow::Result<()> {
    match command {
        Command::Run { dry_run: true } => {
            tracing::info!("Dry run against in-memory store");
            let store = InMemoryContentStore::new().with_schemas(schema_types());
            run(&store).await
        }
        Command::Run { dry_run: false } => {
            let api = MigrationConfig::from_lookup(env)?.content_api()?;
            tracing::info!(
                project_id = %api.project_id,
                dataset = %api.dataset,
                "Migrating to content store"
            );
            run(&HttpContentClient::new(api)).await
        }
        Command::Schema => {
            let json = serde_json::to_string_pretty(&schema_types())
                .context("Failed to serialize schema")?;
            println!("{json}");
            Ok(())
        }
        Command::List => {
            let schema = post_schema();
            for post in posts::posts() {
                let doc = Document::try_from(post.to_document())
                    .with_context(|| format!("Failed to build document for '{}'", post.slug))?;
                let preview = schema.preview(&doc);
                println!(
                    "{:<48} {} ({})",
                    doc.id,
                    preview.title,
                    preview.subtitle.unwrap_or_default()
                );
            }
            Ok(())
        }
    }
}

async fn run(client: &dyn ContentClient) -> anyhow::Result<()> {
    let posts = posts::posts();
    let report = migrate_posts(client, &posts, &mut io::stdout().lock()).await?;

    tracing::info!(
        processed = report.processed,
        drafts = report.drafts,
        created = report.created,
        updated = report.updated,
        transaction_id = %report.transaction_id,
        "Migration finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_dataset(name: &str) -> Option<String> {
        (name == "SANITY_DATASET").then(|| "not/valid".to_string())
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(Ok(())), 0);
        assert_eq!(exit_status(Err(anyhow::anyhow!("commit rejected"))), 1);
    }

    #[tokio::test]
    async fn test_remote_run_without_token_fails_with_status_1() {
        let result = execute(Command::Run { dry_run: false }, &|_| None).await;

        let err = result.as_ref().unwrap_err();
        assert!(err.to_string().contains("SANITY_AUTH_TOKEN"));
        assert_eq!(exit_status(result), 1);
    }

    #[tokio::test]
    async fn test_remote_run_rejects_invalid_dataset() {
        let result = execute(Command::Run { dry_run: false }, &bad_dataset).await;
        assert_eq!(exit_status(result), 1);
    }

    #[tokio::test]
    async fn test_local_commands_ignore_api_settings() {
        for command in [Command::Schema, Command::List, Command::Run { dry_run: true }] {
            let result = execute(command, &bad_dataset).await;
            assert_eq!(exit_status(result), 0);
        }
    }
}
