//! HTTP client for the remote document API.
//!
//! The backend exposes three endpoints under a common base URL
//! (`http://127.0.0.1:8000/jorgito` by default):
//!
//! - `POST upload/`: multipart body with the PDF in field `file`,
//!   answers `{"message": "..."}`
//! - `POST delete/?doc_name=<name>`: no body, any 2xx means deleted
//! - `POST query/`: JSON `{"input_text": "..."}`, answers with a streamed
//!   plain-text reply
//!
//! Every non-2xx status becomes `DocumentError::RemoteRejection`; failures to
//! connect or to decode a body become `DocumentError::Transport`.

use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;

use crate::config::ApiConfig;
use crate::documents::{DocumentError, PDF_MIME};

/// User agent for API requests
const USER_AGENT: &str = concat!("SeguChamba/", env!("CARGO_PKG_VERSION"));

/// Body of a successful upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    input_text: &'a str,
}

/// Document API client
#[derive(Clone)]
pub struct DocumentClient {
    client: reqwest::Client,
    base_url: String,
}

impl DocumentClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, DocumentError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self::with_client(builder.build()?, &config.base_url))
    }

    /// Wrap an existing HTTP client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Upload a PDF under `name`
    pub async fn upload_pdf(&self, name: &str, bytes: Vec<u8>) -> Result<UploadResponse, DocumentError> {
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part("file", part);

        tracing::debug!("Uploading {} ({} bytes)", name, size);

        let response = self
            .client
            .post(self.endpoint("upload/"))
            .multipart(form)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Delete the document stored under `name`
    pub async fn delete_pdf(&self, name: &str) -> Result<(), DocumentError> {
        tracing::debug!("Deleting {}", name);

        let response = self
            .client
            .post(self.endpoint("delete/"))
            .query(&[("doc_name", name)])
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    /// Ask a question about the uploaded documents.
    ///
    /// The answer is streamed; every received chunk publishes the text so far
    /// on `partial_tx`. Returns the complete answer.
    pub async fn query(
        &self,
        prompt: &str,
        partial_tx: watch::Sender<String>,
    ) -> Result<String, DocumentError> {
        let response = self
            .client
            .post(self.endpoint("query/"))
            .json(&QueryRequest { input_text: prompt })
            .send()
            .await?;

        let response = ensure_success(response).await?;

        // Chunks may split UTF-8 sequences, so decode the whole buffer each time
        let mut stream = response.bytes_stream();
        let mut received: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            received.extend_from_slice(&chunk);
            let _ = partial_tx.send(String::from_utf8_lossy(&received).into_owned());
        }

        Ok(String::from_utf8_lossy(&received).trim_end().to_string())
    }
}

/// Turn a non-2xx response into `RemoteRejection`
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DocumentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Document API returned {}: {}", status, body);
    Err(DocumentError::RemoteRejection { status, body })
}
