//! Chat page rendering

use eframe::egui::{self, RichText};
use egui_commonmark::CommonMarkViewer;

use super::components::page_heading;
use crate::app::SeguChambaApp;
use crate::state::ChatRole;

/// Render the chat page
pub fn render_chat_page(app: &mut SeguChambaApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let busy = app.chat.is_busy();

    page_heading(ui, &theme, "Chat");

    // Prompt row pinned to the bottom, transcript fills the rest
    egui::TopBottomPanel::bottom("chat_input")
        .show_separator_line(false)
        .show_inside(ui, |ui| {
            ui.add_space(8.0);
            let mut send = false;
            ui.horizontal(|ui| {
                let input = ui.add_enabled(
                    !busy,
                    egui::TextEdit::singleline(&mut app.chat.input)
                        .hint_text("Escribe tu pregunta sobre los documentos")
                        .desired_width(ui.available_width() - 160.0),
                );
                if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    send = true;
                }

                let can_send = !busy && !app.chat.input.trim().is_empty();
                if ui.add_enabled(can_send, egui::Button::new("Enviar")).clicked() {
                    send = true;
                }
                if ui.add_enabled(!busy, egui::Button::new("Limpiar")).clicked() {
                    app.chat.clear();
                }
            });
            if send {
                app.send_query();
            }
        });

    egui::ScrollArea::vertical()
        .id_salt("chat_transcript")
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if app.chat.transcript.is_empty() {
                ui.label(
                    RichText::new("Haz una pregunta sobre los PDF que cargaste.")
                        .color(theme.text_muted),
                );
                return;
            }

            for message in &app.chat.transcript {
                match message.role {
                    ChatRole::User => {
                        ui.label(RichText::new("Tú").color(theme.accent).strong().size(12.0));
                        ui.label(RichText::new(&message.text).color(theme.text_primary));
                    }
                    ChatRole::Assistant => {
                        ui.label(RichText::new("Asistente").color(theme.success).strong().size(12.0));
                        if message.text.is_empty() {
                            ui.spinner();
                        } else {
                            CommonMarkViewer::new().show(ui, &mut app.ui.markdown_cache, &message.text);
                        }
                    }
                    ChatRole::Error => {
                        ui.label(RichText::new(&message.text).color(theme.error));
                    }
                }
                ui.add_space(10.0);
            }
        });
}
