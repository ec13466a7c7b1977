//! Uploaded document model and the operations that mutate it.
//!
//! This module provides:
//!
//! - `UploadedFile`: a document the backend confirmed it stored
//! - `FileSelection`: a file picked by the user, before validation
//! - `DocumentOperation`: upload/delete, with `apply()` reducing a confirmed
//!   result into the latest file list
//! - `OperationStatus`: the explicit idle/loading/succeeded/failed state
//! - `DocumentError`: everything that can go wrong along the way

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::storage::StorageError;

/// MIME type accepted by the upload endpoint
pub const PDF_MIME: &str = "application/pdf";

/// Fallback MIME type for anything that is not a PDF
const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// A document known to have been uploaded successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A file chosen in the picker (or on the command line)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    /// Location on disk; read when the upload task runs
    pub path: PathBuf,
    /// File name sent to the backend and shown in the list
    pub name: String,
    /// Declared MIME type
    pub mime: String,
}

impl FileSelection {
    /// Build a selection from a path, declaring its type from the extension.
    ///
    /// The file name is sent and stored as-is, so paths without one, or
    /// with one that is not valid UTF-8, are refused.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let Some(file_name) = path.file_name() else {
            return Err(DocumentError::Validation {
                name: path.display().to_string(),
                reason: SelectionError::NoFileName,
            });
        };
        let Some(name) = file_name.to_str() else {
            return Err(DocumentError::Validation {
                name: file_name.to_string_lossy().to_string(),
                reason: SelectionError::NonUtf8Name,
            });
        };

        Ok(Self {
            path: path.to_path_buf(),
            mime: mime_for_path(path).to_string(),
            name: name.to_string(),
        })
    }

    /// Whether the declared type is the one the backend accepts
    pub fn is_pdf(&self) -> bool {
        self.mime == PDF_MIME
    }

    /// Refuse anything not declared as a PDF
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.is_pdf() {
            return Ok(());
        }
        Err(DocumentError::Validation {
            name: self.name.clone(),
            reason: SelectionError::NotPdf {
                mime: self.mime.clone(),
            },
        })
    }
}

/// Declared MIME type for a path, based on its extension only
pub fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MIME,
        _ => OCTET_STREAM_MIME,
    }
}

/// A mutation of the document list, confirmed by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOperation {
    Upload { name: String },
    Delete { name: String },
}

impl DocumentOperation {
    /// Name of the document the operation targets
    pub fn name(&self) -> &str {
        match self {
            DocumentOperation::Upload { name } | DocumentOperation::Delete { name } => name,
        }
    }

    /// Short verb for logs and status messages
    pub fn verb(&self) -> &'static str {
        match self {
            DocumentOperation::Upload { .. } => "upload",
            DocumentOperation::Delete { .. } => "delete",
        }
    }

    /// Reduce this operation into `files`.
    ///
    /// Must be called with the latest list, after the backend confirmed the
    /// operation. Uploads append exactly one record; deletes drop every
    /// record with an equal name (and do nothing if there is none).
    pub fn apply(&self, files: &mut Vec<UploadedFile>) {
        match self {
            DocumentOperation::Upload { name } => files.push(UploadedFile::new(name.clone())),
            DocumentOperation::Delete { name } => files.retain(|f| f.name != *name),
        }
    }
}

/// State of the document operations, as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    /// At least one request is in flight
    Loading,
    /// Last operation finished well; carries the message shown to the user
    Succeeded(String),
    /// Last operation failed; carries the reason
    Failed(String),
}

impl OperationStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, OperationStatus::Loading)
    }
}

/// Why a picked file cannot be uploaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("not a PDF ({mime})")]
    NotPdf { mime: String },

    #[error("path has no file name")]
    NoFileName,

    #[error("file name is not valid UTF-8")]
    NonUtf8Name,
}

/// Errors from document operations
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Selected file was refused; nothing was sent
    #[error("Cannot upload {name}: {reason}")]
    Validation { name: String, reason: SelectionError },

    /// Backend answered with a non-2xx status
    #[error("Server rejected the request: {status}")]
    RemoteRejection {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Request never completed, or the response could not be decoded
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Selected file could not be read
    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),

    /// The updated list could not be persisted
    #[error("Could not save file list: {0}")]
    Storage(#[from] StorageError),

    /// Background task died before reporting a result
    #[error("Task failed: {0}")]
    Task(String),
}

impl DocumentError {
    /// Message shown to the user for this error during `op`.
    ///
    /// Rejections keep the fixed wording the backend users know; transport
    /// failures say the server could not be reached.
    pub fn user_message(&self, op: &DocumentOperation) -> String {
        match self {
            DocumentError::Validation {
                reason: SelectionError::NonUtf8Name,
                ..
            } => "El nombre del archivo contiene caracteres no válidos.".to_string(),
            DocumentError::Validation { .. } => "Por favor, selecciona un archivo PDF.".to_string(),
            DocumentError::RemoteRejection { .. } => match op {
                DocumentOperation::Upload { .. } => "Error al subir el archivo".to_string(),
                DocumentOperation::Delete { .. } => "Error al eliminar el archivo".to_string(),
            },
            DocumentError::Transport(_) | DocumentError::Task(_) => {
                format!("No se pudo contactar al servidor: {}", self)
            }
            DocumentError::Io(e) => format!("No se pudo leer el archivo: {}", e),
            DocumentError::Storage(e) => format!("No se pudo guardar la lista de archivos: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(files: &[UploadedFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("report.pdf")), PDF_MIME);
        assert_eq!(mime_for_path(Path::new("REPORT.PDF")), PDF_MIME);
        assert_eq!(mime_for_path(Path::new("notes.txt")), OCTET_STREAM_MIME);
        assert_eq!(mime_for_path(Path::new("no_extension")), OCTET_STREAM_MIME);
        assert_eq!(mime_for_path(Path::new("archive.pdf.zip")), OCTET_STREAM_MIME);
    }

    #[test]
    fn test_selection_from_path() {
        let sel = FileSelection::from_path(Path::new("/tmp/docs/report.pdf")).unwrap();
        assert_eq!(sel.name, "report.pdf");
        assert!(sel.is_pdf());

        let sel = FileSelection::from_path(Path::new("/tmp/docs/image.png")).unwrap();
        assert!(!sel.is_pdf());
        assert!(matches!(
            sel.validate(),
            Err(DocumentError::Validation {
                reason: SelectionError::NotPdf { .. },
                ..
            })
        ));

        assert!(matches!(
            FileSelection::from_path(Path::new("/")),
            Err(DocumentError::Validation {
                reason: SelectionError::NoFileName,
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_refused() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/tmp/docs").join(OsStr::from_bytes(b"informe\xff.pdf"));
        let err = FileSelection::from_path(&path).unwrap_err();

        assert!(matches!(
            err,
            DocumentError::Validation {
                reason: SelectionError::NonUtf8Name,
                ..
            }
        ));
        let op = DocumentOperation::Upload { name: "informe.pdf".into() };
        assert_eq!(
            err.user_message(&op),
            "El nombre del archivo contiene caracteres no válidos."
        );
    }

    #[test]
    fn test_upload_appends_once() {
        let mut files = vec![UploadedFile::new("a.pdf")];
        DocumentOperation::Upload { name: "b.pdf".into() }.apply(&mut files);
        assert_eq!(names(&files), ["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_delete_removes_all_matching() {
        let mut files = vec![
            UploadedFile::new("a.pdf"),
            UploadedFile::new("b.pdf"),
            UploadedFile::new("a.pdf"),
        ];
        DocumentOperation::Delete { name: "a.pdf".into() }.apply(&mut files);
        assert_eq!(names(&files), ["b.pdf"]);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut files = vec![UploadedFile::new("a.pdf")];
        DocumentOperation::Delete { name: "missing.pdf".into() }.apply(&mut files);
        assert_eq!(names(&files), ["a.pdf"]);
    }

    #[test]
    fn test_record_wire_format() {
        let json = serde_json::to_string(&vec![UploadedFile::new("report.pdf")]).unwrap();
        assert_eq!(json, r#"[{"name":"report.pdf"}]"#);
    }

    #[test]
    fn test_rejection_messages_depend_on_operation() {
        let err = DocumentError::RemoteRejection {
            status: reqwest::StatusCode::NOT_FOUND,
            body: String::new(),
        };
        let upload = DocumentOperation::Upload { name: "a.pdf".into() };
        let delete = DocumentOperation::Delete { name: "a.pdf".into() };
        assert_eq!(err.user_message(&upload), "Error al subir el archivo");
        assert_eq!(err.user_message(&delete), "Error al eliminar el archivo");
    }
}
