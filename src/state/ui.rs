//! UI-related application state

use egui_commonmark::CommonMarkCache;

use crate::ui::theme::{Theme, ThemePreset};

/// UI-related state
pub struct UiState {
    /// Cache for markdown rendering
    pub markdown_cache: CommonMarkCache,
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
}

impl UiState {
    /// Create a new UiState for the given preset
    pub fn new(preset: ThemePreset) -> Self {
        Self {
            markdown_cache: CommonMarkCache::default(),
            current_theme: preset.theme(),
            theme_dirty: true, // Apply theme on first frame
        }
    }

    /// Switch to another preset; applied on the next frame
    pub fn set_theme(&mut self, preset: ThemePreset) {
        self.current_theme = preset.theme();
        self.theme_dirty = true;
    }
}
