//! Interaction state.
//!
//! Everything a keystroke can change lives here. The sampling loop never
//! writes to it, and the panel composer only reads it.

use crate::config::{Config, SortKey};

/// Modal panel drawn over the dashboard. Only one can be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Menu,
    Filter,
}

/// View state mutated by input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    /// Sampling suspended; the last snapshot stays on screen.
    pub paused: bool,
    pub overlay: Option<Overlay>,
    /// Committed process filter (case-insensitive name substring).
    pub filter_text: String,
    /// Text being typed in the filter overlay.
    pub filter_buffer: String,
    pub sort_key: SortKey,
    pub sort_descending: bool,
    /// First visible process row before clamping.
    pub scroll_offset: usize,
    pub selected_layout: usize,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            paused: false,
            overlay: None,
            filter_text: String::new(),
            filter_buffer: String::new(),
            sort_key: SortKey::Cpu,
            sort_descending: true,
            scroll_offset: 0,
            selected_layout: 0,
        }
    }
}

/// The subset of [`InteractionState`] that is written back to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedView {
    pub sort_key: SortKey,
    pub sort_descending: bool,
    pub filter_text: String,
    pub selected_layout: usize,
}

impl InteractionState {
    /// Initial state from persisted settings.
    pub fn from_config(config: &Config) -> Self {
        Self {
            filter_text: config.proc_filter.clone(),
            sort_key: config.proc_sorting,
            sort_descending: !config.proc_reversed,
            selected_layout: config.selected_layout,
            ..Self::default()
        }
    }

    pub fn persisted(&self) -> PersistedView {
        PersistedView {
            sort_key: self.sort_key,
            sort_descending: self.sort_descending,
            filter_text: self.filter_text.clone(),
            selected_layout: self.selected_layout,
        }
    }

    /// Copies the persisted fields into `config`.
    pub fn apply_to(&self, config: &mut Config) {
        config.proc_sorting = self.sort_key;
        config.proc_reversed = !self.sort_descending;
        config.proc_filter = self.filter_text.clone();
        config.selected_layout = self.selected_layout;
    }

    /// Opens `overlay`, or closes it when it is already open.
    ///
    /// Opening the filter overlay starts from an empty buffer.
    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        if self.overlay == Some(overlay) {
            self.overlay = None;
            return;
        }
        if overlay == Overlay::Filter {
            self.filter_buffer.clear();
        }
        self.overlay = Some(overlay);
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    /// Moves the edit buffer into the committed filter.
    pub fn commit_filter(&mut self) {
        self.filter_text = std::mem::take(&mut self.filter_buffer);
        self.scroll_offset = 0;
        self.overlay = None;
    }

    pub fn cancel_filter(&mut self) {
        self.filter_buffer.clear();
        self.overlay = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = Config {
            proc_filter: "nginx".to_string(),
            proc_sorting: SortKey::Memory,
            proc_reversed: true,
            selected_layout: 3,
            ..Config::default()
        };
        let state = InteractionState::from_config(&config);
        assert_eq!(state.filter_text, "nginx");
        assert_eq!(state.sort_key, SortKey::Memory);
        assert!(!state.sort_descending);
        assert_eq!(state.selected_layout, 3);
        assert!(!state.paused);
    }

    #[test]
    fn test_apply_to_roundtrip() {
        let mut state = InteractionState::default();
        state.sort_key = SortKey::Memory;
        state.filter_text = "ssh".to_string();
        let mut config = Config::default();
        state.apply_to(&mut config);
        assert_eq!(InteractionState::from_config(&config).persisted(), state.persisted());
    }

    #[test]
    fn test_toggle_overlay_exclusive() {
        let mut state = InteractionState::default();
        state.toggle_overlay(Overlay::Help);
        assert_eq!(state.overlay, Some(Overlay::Help));
        state.toggle_overlay(Overlay::Menu);
        assert_eq!(state.overlay, Some(Overlay::Menu));
        state.toggle_overlay(Overlay::Menu);
        assert_eq!(state.overlay, None);
    }

    #[test]
    fn test_open_filter_clears_buffer() {
        let mut state = InteractionState::default();
        state.filter_buffer = "stale".to_string();
        state.toggle_overlay(Overlay::Filter);
        assert!(state.filter_buffer.is_empty());
    }

    #[test]
    fn test_scroll_saturates_at_zero() {
        let mut state = InteractionState::default();
        state.scroll_by(-1);
        assert_eq!(state.scroll_offset, 0);
        state.scroll_by(10);
        state.scroll_by(-3);
        assert_eq!(state.scroll_offset, 7);
    }
}
