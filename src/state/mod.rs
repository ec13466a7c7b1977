//! Application state modules
//!
//! Each state struct owns its related fields and poll methods. Poll methods
//! return `StateEvent`s instead of touching `SeguChambaApp` directly.

mod chat;
mod sidebar;
mod ui;

pub use chat::{ChatRole, ChatState};
pub use sidebar::{SidebarState, DELETE_SUCCESS_MESSAGE};
pub use ui::UiState;

/// Events that state poll methods can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// Update the status bar message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
