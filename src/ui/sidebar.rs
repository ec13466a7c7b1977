//! Navigation sidebar rendering

use eframe::egui::{self, Color32, RichText, Vec2};

use crate::app::SeguChambaApp;
use crate::routes;

/// Width of the sidebar panel
const SIDEBAR_WIDTH: f32 = 192.0;

/// What a sidebar entry does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Navigate to a path
    Path(&'static str),
    /// Open or close the settings popup
    SettingsPopup,
}

/// One sidebar entry
#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub icon: &'static str,
    pub label: &'static str,
    pub target: NavTarget,
}

/// Sidebar entries, top to bottom
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        icon: "🏠",
        label: "Inicio",
        target: NavTarget::Path("/"),
    },
    NavItem {
        icon: "💬",
        label: "Chats",
        target: NavTarget::Path("/chat"),
    },
    NavItem {
        icon: "👤",
        label: "Perfil",
        target: NavTarget::Path("/profile"),
    },
    NavItem {
        icon: "⚙",
        label: "Configuración",
        target: NavTarget::SettingsPopup,
    },
];

/// Render the sidebar panel
pub fn render_sidebar(app: &mut SeguChambaApp, ctx: &egui::Context) {
    let theme = app.ui.current_theme.clone();
    let mut clicked: Option<NavTarget> = None;

    egui::SidePanel::left("sidebar")
        .resizable(false)
        .exact_width(SIDEBAR_WIDTH)
        .frame(egui::Frame::new().fill(theme.sidebar_bg).inner_margin(16.0))
        .show(ctx, |ui| {
            let title = egui::Label::new(
                RichText::new("SeguChamba")
                    .color(theme.sidebar_text)
                    .size(20.0)
                    .strong(),
            )
            .sense(egui::Sense::click());
            if ui.add(title).clicked() {
                clicked = Some(NavTarget::Path("/"));
            }
            ui.add_space(32.0);

            for item in NAV_ITEMS {
                let is_active = match item.target {
                    NavTarget::Path(path) => routes::normalize(path) == app.router.current(),
                    NavTarget::SettingsPopup => app.sidebar.popup_visible,
                };

                let fill = if is_active {
                    theme.sidebar_hover
                } else {
                    Color32::TRANSPARENT
                };

                let button = egui::Button::new(
                    RichText::new(format!("{}  {}", item.icon, item.label))
                        .color(theme.sidebar_text)
                        .size(15.0),
                )
                .fill(fill)
                .corner_radius(8.0)
                .min_size(Vec2::new(ui.available_width(), 40.0));

                if ui.add(button).clicked() {
                    clicked = Some(item.target);
                }
                ui.add_space(8.0);
            }
        });

    match clicked {
        Some(NavTarget::Path(path)) => app.navigate(path),
        Some(NavTarget::SettingsPopup) => app.toggle_popup(),
        None => {}
    }
}
