//! Uploaded document commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::api::DocumentClient;
use crate::cli::output::{print_done, print_formatted, OutputFormat};
use crate::config::Config;
use crate::documents::{DocumentOperation, FileSelection, UploadedFile};
use crate::state::DELETE_SUCCESS_MESSAGE;
use crate::storage::{FileStore, SqliteFileStore};

#[derive(Subcommand, Debug)]
pub enum DocsCommands {
    /// List uploaded documents
    List,

    /// Upload a PDF file
    Upload {
        /// Path to the PDF
        path: PathBuf,
    },

    /// Delete an uploaded document and its context
    Delete {
        /// Document name as shown by `docs list`
        name: String,
    },
}

#[derive(Serialize)]
struct DocsListResult {
    documents: Vec<String>,
    total_count: usize,
}

#[derive(Debug, Serialize)]
struct DocsChangeResult {
    name: String,
    message: String,
    documents: Vec<String>,
}

pub async fn run(command: DocsCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    let store = SqliteFileStore::open().context("Failed to open document store")?;

    match command {
        DocsCommands::List => list(&store, format),
        DocsCommands::Upload { path } => {
            let client = client_from_config()?;
            let result = upload(&client, &store, &path).await?;
            report(&result, format, quiet)
        }
        DocsCommands::Delete { name } => {
            let client = client_from_config()?;
            let result = delete(&client, &store, &name).await?;
            report(&result, format, quiet)
        }
    }
}

fn client_from_config() -> Result<DocumentClient> {
    let config = Config::load()?;
    Ok(DocumentClient::new(&config.api)?)
}

fn names(files: &[UploadedFile]) -> Vec<String> {
    files.iter().map(|f| f.name.clone()).collect()
}

fn list(store: &dyn FileStore, format: OutputFormat) -> Result<()> {
    let documents = names(&store.load().context("Failed to read file list")?);
    let result = DocsListResult {
        total_count: documents.len(),
        documents,
    };

    print_formatted(&result, format, |r| {
        if r.documents.is_empty() {
            return "No hay archivos PDF cargados.".to_string();
        }
        let mut out = String::new();
        for name in &r.documents {
            out.push_str(&format!("  {}\n", name));
        }
        out.push_str(&format!("\n{} documento(s)", r.total_count));
        out
    })
}

fn report(result: &DocsChangeResult, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => print_formatted(result, format, |_| String::new()),
        OutputFormat::Text => {
            print_done(&format!("{}: {}", result.name, result.message), quiet);
            Ok(())
        }
    }
}

/// Validate, send, then record the upload in the store
async fn upload(
    client: &DocumentClient,
    store: &dyn FileStore,
    path: &Path,
) -> Result<DocsChangeResult> {
    let selection = FileSelection::from_path(path)?;
    selection.validate()?;

    let bytes = tokio::fs::read(&selection.path)
        .await
        .with_context(|| format!("Failed to read {}", selection.path.display()))?;

    tracing::info!("Uploading {} ({} bytes)", selection.name, bytes.len());
    let response = client.upload_pdf(&selection.name, bytes).await?;

    let documents = record(store, DocumentOperation::Upload { name: selection.name.clone() })?;

    Ok(DocsChangeResult {
        name: selection.name,
        message: response.message,
        documents,
    })
}

/// Ask the backend to drop the document, then forget it locally
async fn delete(client: &DocumentClient, store: &dyn FileStore, name: &str) -> Result<DocsChangeResult> {
    tracing::info!("Deleting {}", name);
    client.delete_pdf(name).await?;

    let documents = record(store, DocumentOperation::Delete { name: name.to_string() })?;

    Ok(DocsChangeResult {
        name: name.to_string(),
        message: DELETE_SUCCESS_MESSAGE.to_string(),
        documents,
    })
}

fn record(store: &dyn FileStore, op: DocumentOperation) -> Result<Vec<String>> {
    let mut files = store.load().context("Failed to read file list")?;
    op.apply(&mut files);
    store.save(&files).context("Failed to save file list")?;
    Ok(names(&files))
}
