//! Home page rendering

use eframe::egui::{self, RichText};

use super::components::{page_heading, section_frame, section_title};
use super::theme::ThemePreset;
use crate::app::SeguChambaApp;

/// Render the home page
pub fn render_home_page(app: &mut SeguChambaApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    page_heading(ui, &theme, "Inicio");

    // Documents summary
    section_frame(&theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        section_title(ui, &theme, "Documentos");

        let count = app.sidebar.files().len();
        let summary = match count {
            0 => "Todavía no hay documentos cargados.".to_string(),
            1 => "1 documento cargado.".to_string(),
            n => format!("{} documentos cargados.", n),
        };
        ui.label(RichText::new(summary).color(theme.text_primary));

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Administrar documentos").clicked() {
                app.toggle_popup();
            }
            if ui.button("Preguntar al asistente").clicked() {
                app.navigate("/chat");
            }
        });
    });

    ui.add_space(12.0);

    // Connection and appearance
    section_frame(&theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        section_title(ui, &theme, "Preferencias");

        ui.horizontal(|ui| {
            ui.label(RichText::new("Servidor:").color(theme.text_muted));
            ui.label(RichText::new(&app.config.api.base_url).color(theme.text_primary));
        });

        ui.add_space(8.0);

        let mut selected = app.config.launcher.theme;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Tema:").color(theme.text_muted));
            egui::ComboBox::from_id_salt("theme_select")
                .selected_text(selected.name())
                .show_ui(ui, |ui| {
                    for preset in ThemePreset::all() {
                        ui.selectable_value(&mut selected, *preset, preset.name());
                    }
                });
        });
        app.set_theme(selected);
    });
}
