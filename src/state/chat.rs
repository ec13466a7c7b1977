//! Chat page state: questions about the uploaded documents

use eframe::egui;
use tokio::sync::watch;

use crate::api::DocumentClient;
use crate::documents::DocumentError;
use crate::state::StateEvent;
use crate::task::InFlight;

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    Error,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Chat page state
pub struct ChatState {
    /// Prompt being typed
    pub input: String,
    /// Conversation so far
    pub transcript: Vec<ChatMessage>,
    /// Query in flight, if any
    pending: InFlight<(), Result<String, DocumentError>>,
    /// Partial answer published while the reply streams in
    partial_rx: Option<watch::Receiver<String>>,
    client: DocumentClient,
}

impl ChatState {
    pub fn new(client: DocumentClient) -> Self {
        Self {
            input: String::new(),
            transcript: Vec::new(),
            pending: InFlight::default(),
            partial_rx: None,
            client,
        }
    }

    /// Check if a query is in progress
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Send the typed prompt. Ignored when empty or while a query runs.
    pub fn send(&mut self) -> Option<StateEvent> {
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() || self.is_busy() {
            return None;
        }

        self.input.clear();
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            text: prompt.clone(),
        });
        // Filled in as the answer streams
        self.transcript.push(ChatMessage {
            role: ChatRole::Assistant,
            text: String::new(),
        });

        let (partial_tx, partial_rx) = watch::channel(String::new());
        self.partial_rx = Some(partial_rx);

        tracing::info!("Sending query ({} chars)", prompt.len());

        let client = self.client.clone();
        self.pending
            .spawn((), async move { client.query(&prompt, partial_tx).await });

        Some(StateEvent::StatusMessage("Consultando documentos...".to_string()))
    }

    /// Forget the conversation
    pub fn clear(&mut self) {
        if !self.is_busy() {
            self.transcript.clear();
        }
    }

    fn set_answer(&mut self, text: String) {
        if let Some(last) = self.transcript.last_mut() {
            if last.role == ChatRole::Assistant {
                last.text = text;
            }
        }
    }

    /// Poll the running query for streamed text and completion
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let mut events = Vec::new();

        if let Some(rx) = &mut self.partial_rx {
            if rx.has_changed().unwrap_or(false) {
                let partial = rx.borrow_and_update().clone();
                self.set_answer(partial);
            }
        }

        for ((), joined) in self.pending.drain_finished() {
            self.partial_rx = None;
            match joined.unwrap_or_else(|e| Err(DocumentError::Task(e.to_string()))) {
                Ok(answer) => {
                    events.push(StateEvent::LogInfo(format!(
                        "Query answered ({} chars)",
                        answer.len()
                    )));
                    self.set_answer(answer);
                    events.push(StateEvent::StatusMessage("Listo".to_string()));
                }
                Err(err) => {
                    events.push(StateEvent::LogError(format!("Query failed: {}", err)));
                    if self
                        .transcript
                        .last()
                        .is_some_and(|m| m.role == ChatRole::Assistant && m.text.is_empty())
                    {
                        self.transcript.pop();
                    }
                    let message = query_error_message(&err);
                    self.transcript.push(ChatMessage {
                        role: ChatRole::Error,
                        text: message.clone(),
                    });
                    events.push(StateEvent::StatusMessage(message));
                }
            }
        }

        if self.is_busy() {
            ctx.request_repaint();
        }

        events
    }
}

fn query_error_message(err: &DocumentError) -> String {
    match err {
        DocumentError::RemoteRejection { status, .. } => {
            format!("El servidor no pudo responder ({})", status.as_u16())
        }
        _ => format!("No se pudo contactar al servidor: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chat(base_url: &str) -> ChatState {
        ChatState::new(DocumentClient::with_client(reqwest::Client::new(), base_url))
    }

    async fn settle(state: &mut ChatState, ctx: &egui::Context) {
        for _ in 0..500 {
            state.poll(ctx);
            if !state.is_busy() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("query never finished");
    }

    #[test]
    fn test_empty_prompt_is_ignored() {
        let mut state = chat("http://127.0.0.1:1/jorgito");
        state.input = "   ".to_string();
        assert!(state.send().is_none());
        assert!(state.transcript.is_empty());
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn test_answer_fills_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jorgito/query/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Tres documentos cargados. "))
            .mount(&server)
            .await;

        let mut state = chat(&format!("{}/jorgito", server.uri()));
        let ctx = egui::Context::default();

        state.input = "¿Cuántos documentos hay?".to_string();
        assert!(state.send().is_some());
        assert!(state.input.is_empty());
        assert!(state.is_busy());

        // A second send while busy is ignored
        state.input = "otra".to_string();
        assert!(state.send().is_none());

        settle(&mut state, &ctx).await;

        assert_eq!(
            state.transcript,
            vec![
                ChatMessage {
                    role: ChatRole::User,
                    text: "¿Cuántos documentos hay?".to_string()
                },
                ChatMessage {
                    role: ChatRole::Assistant,
                    text: "Tres documentos cargados.".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_server_error_replaces_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jorgito/query/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut state = chat(&format!("{}/jorgito", server.uri()));
        let ctx = egui::Context::default();

        state.input = "hola".to_string();
        state.send();
        settle(&mut state, &ctx).await;

        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[1].role, ChatRole::Error);
        assert_eq!(state.transcript[1].text, "El servidor no pudo responder (500)");
    }

    #[tokio::test]
    async fn test_clear_keeps_running_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jorgito/query/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("respuesta")
                    .set_delay(Duration::from_millis(100)),
            )
            .mount(&server)
            .await;

        let mut state = chat(&format!("{}/jorgito", server.uri()));
        let ctx = egui::Context::default();

        state.input = "hola".to_string();
        state.send();
        state.clear();
        assert_eq!(state.transcript.len(), 2);

        settle(&mut state, &ctx).await;
        state.clear();
        assert!(state.transcript.is_empty());
    }
}
