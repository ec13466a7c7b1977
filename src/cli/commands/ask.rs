//! One-shot question against the uploaded documents

use anyhow::Result;
use serde::Serialize;
use tokio::sync::watch;

use crate::api::DocumentClient;
use crate::cli::output::{print_formatted, OutputFormat};
use crate::config::Config;

#[derive(Serialize)]
struct AskResult {
    prompt: String,
    answer: String,
}

pub async fn run(prompt: &str, format: OutputFormat) -> Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        anyhow::bail!("Question must not be empty");
    }

    let config = Config::load()?;
    let client = DocumentClient::new(&config.api)?;

    // Partial text is only used by the window; the CLI prints the final answer
    let (partial_tx, _partial_rx) = watch::channel(String::new());
    let answer = client.query(prompt, partial_tx).await?;

    let result = AskResult {
        prompt: prompt.to_string(),
        answer,
    };
    print_formatted(&result, format, |r| r.answer.clone())
}
