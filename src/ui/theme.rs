use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Azul,
    Oscuro,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Azul, ThemePreset::Oscuro]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Azul => "Azul",
            ThemePreset::Oscuro => "Oscuro",
        }
    }

    /// Parse a config value (`azul`, `oscuro`), case-insensitive
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(key.trim()))
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Azul => Theme::azul(),
            ThemePreset::Oscuro => Theme::oscuro(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    /// Start from egui's dark visuals instead of light
    pub dark: bool,

    // Sidebar
    pub sidebar_bg: Color32,
    pub sidebar_hover: Color32,
    pub sidebar_text: Color32,

    // Base colors
    pub bg_base: Color32,
    pub bg_panel: Color32,
    pub bg_row: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,

    // Semantic colors
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    // UI element colors
    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Light theme with the blue sidebar
    pub fn azul() -> Self {
        Self {
            dark: false,

            sidebar_bg: Color32::from_rgb(37, 99, 235),    // Blue-600
            sidebar_hover: Color32::from_rgb(29, 78, 216), // Blue-700
            sidebar_text: Color32::WHITE,

            bg_base: Color32::from_rgb(255, 255, 255),
            bg_panel: Color32::from_rgb(243, 244, 246), // Gray-100
            bg_row: Color32::from_rgb(255, 255, 255),

            text_primary: Color32::from_rgb(55, 65, 81), // Gray-700
            text_muted: Color32::from_rgb(107, 114, 128), // Gray-500

            accent: Color32::from_rgb(37, 99, 235),
            accent_hover: Color32::from_rgb(29, 78, 216),

            success: Color32::from_rgb(22, 163, 74), // Green-600
            warning: Color32::from_rgb(202, 138, 4), // Yellow-600
            error: Color32::from_rgb(220, 38, 38),   // Red-600

            border: Color32::from_rgb(229, 231, 235),
            selection: Color32::from_rgb(37, 99, 235).gamma_multiply(0.3),
        }
    }

    /// Dark theme, same blue accents
    pub fn oscuro() -> Self {
        Self {
            dark: true,

            sidebar_bg: Color32::from_rgb(30, 58, 138),    // Blue-900
            sidebar_hover: Color32::from_rgb(30, 64, 175), // Blue-800
            sidebar_text: Color32::from_rgb(239, 246, 255),

            bg_base: Color32::from_rgb(17, 24, 39),  // Gray-900
            bg_panel: Color32::from_rgb(31, 41, 55), // Gray-800
            bg_row: Color32::from_rgb(55, 65, 81),

            text_primary: Color32::from_rgb(243, 244, 246),
            text_muted: Color32::from_rgb(156, 163, 175),

            accent: Color32::from_rgb(96, 165, 250), // Blue-400
            accent_hover: Color32::from_rgb(147, 197, 253),

            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),

            border: Color32::from_rgb(75, 85, 99),
            selection: Color32::from_rgb(96, 165, 250).gamma_multiply(0.3),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        // Window and panel backgrounds
        visuals.window_fill = self.bg_base;
        visuals.panel_fill = self.bg_base;
        visuals.faint_bg_color = self.bg_panel;
        visuals.extreme_bg_color = self.bg_panel;

        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, self.accent_hover);

        // Selection
        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        // Hyperlinks
        visuals.hyperlink_color = self.accent;

        visuals.window_stroke = Stroke::new(1.0, self.border);

        ctx.set_visuals(visuals);
    }
}
