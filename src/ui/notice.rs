//! Acknowledgement dialog for user-visible notices

use eframe::egui::{self, RichText};

use crate::app::SeguChambaApp;
use crate::state::NoticeLevel;

/// Render the oldest pending notice, if any
pub fn render_notice(app: &mut SeguChambaApp, ctx: &egui::Context) {
    let Some(notice) = app.sidebar.current_notice() else {
        return;
    };

    let theme = &app.ui.current_theme;
    let (title, color) = match notice.level {
        NoticeLevel::Info => ("Aviso", theme.text_primary),
        NoticeLevel::Warning => ("Atención", theme.warning),
        NoticeLevel::Error => ("Error", theme.error),
    };
    let message = notice.message.clone();
    let mut dismissed = false;

    egui::Window::new(title)
        .id(egui::Id::new("notice_dialog"))
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, -40.0])
        .show(ctx, |ui| {
            ui.set_min_width(260.0);
            ui.label(RichText::new(&message).color(color));
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                if ui.button("Aceptar").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        app.sidebar.dismiss_notice();
    }
}
