//! Settings popup: uploaded document list, upload picker and actions

use eframe::egui::{self, RichText};

use super::components::section_frame;
use crate::app::SeguChambaApp;
use crate::documents::OperationStatus;
use crate::state::SidebarState;

/// Shown instead of the list when nothing has been uploaded
pub const EMPTY_LIST_TEXT: &str = "No hay archivos PDF cargados.";

/// What the popup displays, derived from the sidebar state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView<'a> {
    /// One row per uploaded document
    pub rows: Vec<&'a str>,
    /// Label of the add button
    pub add_label: &'static str,
    /// Whether the add button accepts clicks
    pub add_enabled: bool,
    /// Message of the last finished operation: `Ok` on success, `Err` on failure
    pub last_outcome: Option<Result<&'a str, &'a str>>,
}

impl<'a> PopupView<'a> {
    pub fn of(state: &'a SidebarState) -> Self {
        let loading = state.is_loading();
        Self {
            rows: state.files().iter().map(|f| f.name.as_str()).collect(),
            add_label: if loading { "Cargando..." } else { "Agregar" },
            add_enabled: !loading,
            last_outcome: match state.status() {
                OperationStatus::Succeeded(msg) => Some(Ok(msg.as_str())),
                OperationStatus::Failed(msg) => Some(Err(msg.as_str())),
                OperationStatus::Idle | OperationStatus::Loading => None,
            },
        }
    }

    /// Placeholder text when there are no rows
    pub fn empty_text(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(EMPTY_LIST_TEXT)
    }
}

enum PopupAction {
    Delete(String),
    PickFile,
    Close,
}

/// Render the settings popup when it is open
pub fn render_documents_popup(app: &mut SeguChambaApp, ctx: &egui::Context) {
    if !app.sidebar.popup_visible {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let mut action: Option<PopupAction> = None;

    egui::Window::new("Configuración")
        .id(egui::Id::new("documents_popup"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([384.0, 384.0])
        .show(ctx, |ui| {
            let view = PopupView::of(&app.sidebar);

            section_frame(&theme).show(ui, |ui| {
                ui.set_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .id_salt("documents_list")
                    .max_height(220.0)
                    .show(ui, |ui| {
                        if let Some(text) = view.empty_text() {
                            ui.label(RichText::new(text).color(theme.text_muted));
                            return;
                        }

                        for name in &view.rows {
                            egui::Frame::new()
                                .fill(theme.bg_row)
                                .corner_radius(4.0)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        ui.label(RichText::new(*name).color(theme.text_primary));
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                let delete = egui::Button::new(
                                                    RichText::new("🗑").color(theme.error),
                                                )
                                                .frame(false);
                                                if ui.add(delete).on_hover_text("Eliminar").clicked() {
                                                    action = Some(PopupAction::Delete(name.to_string()));
                                                }
                                            },
                                        );
                                    });
                                });
                            ui.add_space(4.0);
                        }
                    });
            });

            if let Some(outcome) = view.last_outcome {
                ui.add_space(8.0);
                let (text, color) = match outcome {
                    Ok(msg) => (msg, theme.success),
                    Err(msg) => (msg, theme.error),
                };
                ui.label(RichText::new(text).color(color).size(12.0));
            }

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                if ui.button("Seleccionar PDF...").clicked() {
                    action = Some(PopupAction::PickFile);
                }
                ui.label(RichText::new("Solo archivos PDF").color(theme.text_muted).size(11.0));
            });

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                // Reflects the loading state only; uploads start from the picker
                let add = egui::Button::new(RichText::new(view.add_label).color(egui::Color32::WHITE))
                    .fill(theme.accent);
                ui.add_enabled(view.add_enabled, add);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let close = egui::Button::new(RichText::new("Cerrar").color(egui::Color32::WHITE))
                        .fill(theme.error);
                    if ui.add(close).clicked() {
                        action = Some(PopupAction::Close);
                    }
                });
            });
        });

    match action {
        Some(PopupAction::Delete(name)) => app.delete_pdf(&name),
        Some(PopupAction::PickFile) => app.pick_and_upload_pdf(),
        Some(PopupAction::Close) => app.toggle_popup(),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DocumentClient;
    use crate::documents::FileSelection;
    use crate::storage::MemoryFileStore;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sidebar(base_url: &str, store: MemoryFileStore) -> SidebarState {
        let client = DocumentClient::with_client(reqwest::Client::new(), base_url);
        SidebarState::new(client, Box::new(store))
    }

    #[test]
    fn test_empty_store_shows_placeholder() {
        let state = sidebar("http://127.0.0.1:1/jorgito", MemoryFileStore::new());
        let view = PopupView::of(&state);
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_text(), Some("No hay archivos PDF cargados."));
        assert_eq!(view.add_label, "Agregar");
        assert!(view.add_enabled);
        assert_eq!(view.last_outcome, None);
    }

    #[test]
    fn test_rows_follow_file_list() {
        let store = MemoryFileStore::with_raw(r#"[{"name":"report.pdf"}]"#);
        let state = sidebar("http://127.0.0.1:1/jorgito", store);
        let view = PopupView::of(&state);
        assert_eq!(view.rows, ["report.pdf"]);
        assert_eq!(view.empty_text(), None);
    }

    #[tokio::test]
    async fn test_add_button_disabled_while_loading() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jorgito/upload/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "ok" }))
                    .set_delay(Duration::from_millis(100)),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.pdf");
        std::fs::write(&file, b"%PDF-1.4").unwrap();

        let mut state = sidebar(&format!("{}/jorgito", server.uri()), MemoryFileStore::new());
        state.upload_pdf(FileSelection::from_path(&file).unwrap());

        let view = PopupView::of(&state);
        assert_eq!(view.add_label, "Cargando...");
        assert!(!view.add_enabled);

        let ctx = egui::Context::default();
        for _ in 0..500 {
            state.poll(&ctx);
            if !state.is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let view = PopupView::of(&state);
        assert_eq!(view.rows, ["report.pdf"]);
        assert_eq!(view.add_label, "Agregar");
        assert!(view.add_enabled);
        assert_eq!(view.last_outcome, Some(Ok("ok")));
    }

    #[tokio::test]
    async fn test_failed_operation_is_shown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jorgito/delete/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = MemoryFileStore::with_raw(r#"[{"name":"report.pdf"}]"#);
        let mut state = sidebar(&format!("{}/jorgito", server.uri()), store);
        state.delete_pdf("report.pdf");

        let ctx = egui::Context::default();
        for _ in 0..500 {
            state.poll(&ctx);
            if !state.is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let view = PopupView::of(&state);
        assert_eq!(view.rows, ["report.pdf"]);
        assert_eq!(view.last_outcome, Some(Err("Error al eliminar el archivo")));
    }
}
