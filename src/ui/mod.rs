//! UI modules for SeguChamba
//!
//! Rendering code, organized by screen area. Every render function reads the
//! application state and calls back into `SeguChambaApp` for actions.

mod chat_page;
mod components;
mod documents_popup;
mod home_page;
mod not_found_page;
mod notice;
mod sidebar;
pub mod theme;

pub use documents_popup::render_documents_popup;
pub use notice::render_notice;
pub use sidebar::render_sidebar;

use eframe::egui;

use crate::app::SeguChambaApp;
use crate::routes::Page;

/// Render the page for the current route
pub fn render_page(app: &mut SeguChambaApp, ui: &mut egui::Ui) {
    match app.router.route().map(|r| r.page) {
        Some(Page::Home) => home_page::render_home_page(app, ui),
        Some(Page::Chat) => chat_page::render_chat_page(app, ui),
        None => not_found_page::render_not_found_page(app, ui),
    }
}
