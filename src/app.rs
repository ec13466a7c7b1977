use eframe::egui;

use crate::api::DocumentClient;
use crate::config::Config;
use crate::documents::FileSelection;
use crate::routes::Router;
use crate::state::{ChatState, SidebarState, StateEvent, UiState};
use crate::storage::{FileStore, MemoryFileStore, SqliteFileStore};
use crate::ui;
use crate::ui::theme::ThemePreset;

/// Main application state
pub struct SeguChambaApp {
    /// Application configuration
    pub config: Config,
    /// Current page and history
    pub router: Router,
    /// Sidebar, settings popup and document list
    pub sidebar: SidebarState,
    /// Chat page
    pub chat: ChatState,
    /// Theme and render caches
    pub ui: UiState,
    /// Status message for the status bar
    pub status_message: String,
}

impl SeguChambaApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::error!("Failed to load config, using defaults: {:#}", e);
            Config::default()
        });

        let client = match DocumentClient::new(&config.api) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("Failed to configure HTTP client: {}", e);
                DocumentClient::with_client(reqwest::Client::new(), &config.api.base_url)
            }
        };

        let store: Box<dyn FileStore> = match SqliteFileStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::error!("Failed to open document store, list will not persist: {}", e);
                Box::new(MemoryFileStore::new())
            }
        };

        Self::with_parts(config, client, store)
    }

    /// Assemble the application from already-built parts
    pub fn with_parts(config: Config, client: DocumentClient, store: Box<dyn FileStore>) -> Self {
        let router = Router::new(&config.launcher.start_path);
        let ui = UiState::new(config.launcher.theme);
        let sidebar = SidebarState::new(client.clone(), store);
        let chat = ChatState::new(client);

        let status_message = format!("Servidor: {}", config.api.base_url);

        Self {
            config,
            router,
            sidebar,
            chat,
            ui,
            status_message,
        }
    }

    /// Apply events returned by state poll methods
    pub fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(msg) => self.status_message = msg,
                StateEvent::LogError(msg) => tracing::error!("{}", msg),
                StateEvent::LogInfo(msg) => tracing::info!("{}", msg),
            }
        }
    }

    fn handle_event(&mut self, event: Option<StateEvent>) {
        if let Some(event) = event {
            self.handle_events(vec![event]);
        }
    }

    pub fn navigate(&mut self, path: &str) {
        self.router.navigate(path);
    }

    pub fn toggle_popup(&mut self) {
        self.sidebar.toggle_popup();
    }

    /// Open the file picker and upload the chosen file
    pub fn pick_and_upload_pdf(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Seleccionar PDF")
            .add_filter("PDF", &["pdf"])
            .pick_file()
        else {
            return;
        };

        match FileSelection::from_path(&path) {
            Ok(selection) => {
                let event = self.sidebar.upload_pdf(selection);
                self.handle_event(event);
            }
            Err(e) => self
                .sidebar
                .refuse_upload(&path.to_string_lossy(), e),
        }
    }

    pub fn delete_pdf(&mut self, name: &str) {
        let event = self.sidebar.delete_pdf(name);
        self.handle_event(event);
    }

    pub fn send_query(&mut self) {
        let event = self.chat.send();
        self.handle_event(event);
    }

    /// Switch theme and remember the choice
    pub fn set_theme(&mut self, preset: ThemePreset) {
        if self.config.launcher.theme == preset {
            return;
        }
        self.config.launcher.theme = preset;
        self.ui.set_theme(preset);
        self.save_config();
    }

    /// Save the window settings to disk.
    ///
    /// Only the launcher section is editable here; the rest is re-read from
    /// the file so an environment URL override is never persisted.
    pub fn save_config(&self) {
        let result = Config::load_file().and_then(|mut on_disk| {
            on_disk.launcher = self.config.launcher.clone();
            on_disk.save()
        });
        if let Err(e) = result {
            tracing::error!("Failed to save config: {}", e);
        }
    }
}

impl eframe::App for SeguChambaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Poll async tasks
        let events = self.sidebar.poll(ctx);
        self.handle_events(events);
        let events = self.chat.poll(ctx);
        self.handle_events(events);

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.sidebar.is_loading() || self.chat.is_busy() {
                    ui.spinner();
                }
                ui.label(&self.status_message);
            });
        });

        ui::render_sidebar(self, ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::render_page(self, ui);
        });

        ui::render_documents_popup(self, ctx);
        ui::render_notice(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Page;

    fn app_with(config: Config, store: &MemoryFileStore) -> SeguChambaApp {
        let client = DocumentClient::with_client(reqwest::Client::new(), &config.api.base_url);
        SeguChambaApp::with_parts(config, client, Box::new(store.clone()))
    }

    #[test]
    fn test_start_path_from_config() {
        let mut config = Config::default();
        config.launcher.start_path = "/chat/".to_string();
        let app = app_with(config, &MemoryFileStore::new());
        assert_eq!(app.router.route().map(|r| r.page), Some(Page::Chat));
    }

    #[test]
    fn test_status_events_update_status_bar() {
        let mut app = app_with(Config::default(), &MemoryFileStore::new());
        app.handle_events(vec![
            StateEvent::LogInfo("ignored".to_string()),
            StateEvent::StatusMessage("Subiendo report.pdf...".to_string()),
        ]);
        assert_eq!(app.status_message, "Subiendo report.pdf...");
    }

    #[test]
    fn test_frames_render_every_page() {
        let store = MemoryFileStore::with_raw(r#"[{"name":"report.pdf"}]"#);
        let mut app = app_with(Config::default(), &store);
        app.toggle_popup();

        let ctx = egui::Context::default();
        for path in ["/", "/chat", "/profile"] {
            app.navigate(path);
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                ui::render_sidebar(&mut app, ctx);
                egui::CentralPanel::default().show(ctx, |ui| ui::render_page(&mut app, ui));
                ui::render_documents_popup(&mut app, ctx);
                ui::render_notice(&mut app, ctx);
            });
        }

        assert_eq!(app.sidebar.files().len(), 1);
        assert!(app.sidebar.popup_visible);
    }
}
