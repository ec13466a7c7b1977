//! Page shown for paths missing from the route table

use eframe::egui::{self, RichText};

use super::components::page_heading;
use crate::app::SeguChambaApp;

pub fn render_not_found_page(app: &mut SeguChambaApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    page_heading(ui, &theme, "Página no encontrada");
    ui.label(
        RichText::new(format!("No hay ninguna página en {}", app.router.current()))
            .color(theme.text_muted),
    );
    ui.add_space(16.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(app.router.can_go_back(), egui::Button::new("Volver"))
            .clicked()
        {
            app.router.back();
        }
        if ui.button("Ir al inicio").clicked() {
            app.navigate("/");
        }
    });
}
