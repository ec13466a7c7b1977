//! Shared UI components for SeguChamba

use eframe::egui::{self, RichText};

use super::theme::Theme;

/// Rounded panel used for page sections and the document list
pub fn section_frame(theme: &Theme) -> egui::Frame {
    egui::Frame::new()
        .fill(theme.bg_panel)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .stroke(egui::Stroke::new(1.0, theme.border))
}

/// Section title inside a `section_frame`
pub fn section_title(ui: &mut egui::Ui, theme: &Theme, title: &str) {
    ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
    ui.add_space(12.0);
}

/// Page heading
pub fn page_heading(ui: &mut egui::Ui, theme: &Theme, title: &str) {
    ui.label(
        RichText::new(title)
            .color(theme.text_primary)
            .size(20.0)
            .strong(),
    );
    ui.add_space(16.0);
}
