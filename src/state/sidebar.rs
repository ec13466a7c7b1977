//! Sidebar state: settings popup and the uploaded document list

use std::collections::VecDeque;

use eframe::egui;

use crate::api::DocumentClient;
use crate::documents::{
    DocumentError, DocumentOperation, FileSelection, OperationStatus, UploadedFile,
};
use crate::state::{Notice, StateEvent};
use crate::storage::FileStore;
use crate::task::InFlight;

/// Notice shown after the backend confirms a delete
pub const DELETE_SUCCESS_MESSAGE: &str = "Archivo y contexto eliminados con éxito";

/// Sidebar state
pub struct SidebarState {
    /// Whether the settings popup is open
    pub popup_visible: bool,
    /// Documents the backend confirmed, in upload order
    files: Vec<UploadedFile>,
    /// Status of the document operations
    status: OperationStatus,
    /// Requests still running
    pending: InFlight<DocumentOperation, Result<String, DocumentError>>,
    /// Messages waiting for the user to acknowledge them
    notices: VecDeque<Notice>,
    client: DocumentClient,
    store: Box<dyn FileStore>,
}

impl SidebarState {
    /// Create the sidebar state, hydrating the document list from `store`
    pub fn new(client: DocumentClient, store: Box<dyn FileStore>) -> Self {
        let mut notices = VecDeque::new();
        let files = match store.load() {
            Ok(files) => {
                tracing::info!("Loaded {} uploaded documents", files.len());
                files
            }
            Err(e) => {
                tracing::error!("Failed to load document list: {}", e);
                notices.push_back(Notice::error(format!(
                    "No se pudo leer la lista de archivos: {}",
                    e
                )));
                Vec::new()
            }
        };

        Self {
            popup_visible: false,
            files,
            status: OperationStatus::Idle,
            pending: InFlight::default(),
            notices,
            client,
            store,
        }
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn status(&self) -> &OperationStatus {
        &self.status
    }

    /// True from the first dispatch until every outcome has been reduced
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn toggle_popup(&mut self) {
        self.popup_visible = !self.popup_visible;
    }

    /// Oldest notice not yet dismissed
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    /// Upload a picked file.
    ///
    /// Anything not declared as a PDF is refused with a warning notice and
    /// no request is made.
    pub fn upload_pdf(&mut self, selection: FileSelection) -> Option<StateEvent> {
        if let Err(err) = selection.validate() {
            self.refuse_upload(&selection.name, err);
            return None;
        }

        let op = DocumentOperation::Upload {
            name: selection.name.clone(),
        };

        tracing::info!("Uploading {}", selection.name);

        let client = self.client.clone();
        let FileSelection { path, name, .. } = selection;
        let status = format!("Subiendo {}...", name);

        self.dispatch(op, async move {
            let bytes = tokio::fs::read(&path).await?;
            let response = client.upload_pdf(&name, bytes).await?;
            Ok(response.message)
        });

        Some(StateEvent::StatusMessage(status))
    }

    /// Tell the user why a picked file was not sent
    pub fn refuse_upload(&mut self, name: &str, err: DocumentError) {
        tracing::warn!("Refusing upload: {}", err);
        let op = DocumentOperation::Upload {
            name: name.to_string(),
        };
        self.notices.push_back(Notice::warning(err.user_message(&op)));
    }

    /// Delete a document on the backend. Unknown names are still sent.
    pub fn delete_pdf(&mut self, name: &str) -> Option<StateEvent> {
        tracing::info!("Deleting {}", name);

        let op = DocumentOperation::Delete {
            name: name.to_string(),
        };
        let client = self.client.clone();
        let doc_name = name.to_string();

        self.dispatch(op, async move {
            client.delete_pdf(&doc_name).await?;
            Ok(DELETE_SUCCESS_MESSAGE.to_string())
        });

        Some(StateEvent::StatusMessage(format!("Eliminando {}...", name)))
    }

    fn dispatch<F>(&mut self, op: DocumentOperation, request: F)
    where
        F: std::future::Future<Output = Result<String, DocumentError>> + Send + 'static,
    {
        self.status = OperationStatus::Loading;
        self.pending.spawn(op, request);
    }

    /// Reduce finished requests into the document list
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let mut events = Vec::new();

        for (op, joined) in self.pending.drain_finished() {
            let result = joined.unwrap_or_else(|e| Err(DocumentError::Task(e.to_string())));
            match result {
                Ok(message) => self.on_success(&op, message, &mut events),
                Err(err) => self.on_failure(&op, err, &mut events),
            }
        }

        if !self.pending.is_empty() {
            ctx.request_repaint();
        }

        events
    }

    fn on_success(&mut self, op: &DocumentOperation, message: String, events: &mut Vec<StateEvent>) {
        // Always against the current list, whatever else finished meanwhile
        op.apply(&mut self.files);
        events.push(StateEvent::LogInfo(format!(
            "{} of {} succeeded ({} documents)",
            op.verb(),
            op.name(),
            self.files.len()
        )));

        self.notices.push_back(Notice::info(message.clone()));

        if let Err(e) = self.store.save(&self.files) {
            let err = DocumentError::from(e);
            events.push(StateEvent::LogError(format!("Failed to persist document list: {}", err)));
            self.notices.push_back(Notice::error(err.user_message(op)));
        }

        events.push(StateEvent::StatusMessage(message.clone()));
        self.settle(OperationStatus::Succeeded(message));
    }

    fn on_failure(&mut self, op: &DocumentOperation, err: DocumentError, events: &mut Vec<StateEvent>) {
        let user_message = err.user_message(op);
        events.push(StateEvent::LogError(format!(
            "Failed to {} {}: {}",
            op.verb(),
            op.name(),
            err
        )));

        self.notices.push_back(Notice::error(user_message.clone()));
        events.push(StateEvent::StatusMessage(user_message.clone()));
        self.settle(OperationStatus::Failed(user_message));
    }

    /// Leave `Loading` only once nothing is in flight
    fn settle(&mut self, outcome: OperationStatus) {
        if self.pending.is_empty() {
            self.status = outcome;
        }
    }
}
