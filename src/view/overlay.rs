//! Help, menu and filter overlays.

use super::ViewSettings;
use super::common::{PanelView, Section, ViewCell, ViewLine};
use crate::fmt::SizeBase;
use crate::theme::Role;
use crate::tui::state::{InteractionState, Overlay};

const KEYS: &[(&str, &str)] = &[
    ("q", "Quit"),
    ("h", "Show/hide this help"),
    ("m", "Show/hide the menu"),
    ("p", "Pause/resume sampling"),
    ("s", "Sort processes by CPU or memory"),
    ("f", "Filter processes by name"),
    ("1-5", "Switch layout preset"),
    ("Up/Down", "Scroll processes"),
    ("PgUp/PgDn", "Scroll processes by 10"),
    ("Ctrl-C", "Quit"),
];

fn overlay_panel(title: &str, lines: Vec<ViewLine>) -> PanelView {
    let mut panel = PanelView::new(title, Role::Highlight);
    panel.title_paint = Role::Highlight.into();
    panel.sections.push(Section::Lines(lines));
    panel
}

pub fn build_help_overlay() -> PanelView {
    let lines = KEYS
        .iter()
        .map(|(key, action)| ViewLine {
            spans: vec![
                ViewCell::styled(format!("{:>10}", key), Role::Highlight).bold(),
                ViewCell::plain(format!("  {}", action)),
            ],
        })
        .collect();
    overlay_panel("Help", lines)
}

/// Current settings and the layout presets, the selected one marked.
pub fn build_menu_overlay(state: &InteractionState, settings: &ViewSettings) -> PanelView {
    let setting = |name: &str, value: String| ViewLine {
        spans: vec![
            ViewCell::styled(format!("{:<14}", name), Role::Title),
            ViewCell::plain(value),
        ],
    };
    let filter = if state.filter_text.is_empty() {
        "none".to_string()
    } else {
        state.filter_text.clone()
    };
    let mut lines = vec![
        setting("Theme", settings.theme_name.clone()),
        setting("Update", format!("{} ms", settings.update_ms)),
        setting("Graph symbol", settings.graph_symbol.as_str().to_string()),
        setting(
            "Size base",
            if settings.base == SizeBase::Decimal {
                "1000".to_string()
            } else {
                "1024".to_string()
            },
        ),
        setting(
            "Sort",
            format!(
                "{} {}",
                state.sort_key.label(),
                if state.sort_descending { "desc" } else { "asc" }
            ),
        ),
        setting("Filter", filter),
        ViewLine::default(),
        ViewLine::styled("Layouts", Role::Highlight),
    ];
    for (i, name) in settings.preset_names.iter().enumerate() {
        let line = format!("{} {}. {}", if i == state.selected_layout { ">" } else { " " }, i + 1, name);
        if i == state.selected_layout {
            lines.push(ViewLine::styled(line, Role::Highlight));
        } else {
            lines.push(ViewLine::plain(line));
        }
    }
    overlay_panel("Menu", lines)
}

/// Edit buffer, committed filter and instructions.
pub fn build_filter_overlay(state: &InteractionState) -> PanelView {
    let current = if state.filter_text.is_empty() {
        "none"
    } else {
        state.filter_text.as_str()
    };
    let lines = vec![
        ViewLine::plain("Enter process filter:"),
        ViewLine {
            spans: vec![
                ViewCell::plain("> "),
                ViewCell::styled(format!("{}_", state.filter_buffer), Role::Highlight).bold(),
            ],
        },
        ViewLine::plain(format!("(current: {})", current)),
        ViewLine::default(),
        ViewLine::plain("Press Enter to apply"),
        ViewLine::plain("Press Esc to cancel"),
    ];
    let mut panel = overlay_panel(&format!("Filter Processes: {}", state.filter_buffer), lines);
    panel.border = Role::Border.into();
    panel
}

/// Panel for the active overlay, if any.
pub fn build_overlay(state: &InteractionState, settings: &ViewSettings) -> Option<PanelView> {
    state.overlay.map(|overlay| match overlay {
        Overlay::Help => build_help_overlay(),
        Overlay::Menu => build_menu_overlay(state, settings),
        Overlay::Filter => build_filter_overlay(state),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(panel: &PanelView) -> Vec<String> {
        match &panel.sections[0] {
            Section::Lines(lines) => lines.iter().map(ViewLine::text).collect(),
            other => panic!("expected lines, got {:?}", other),
        }
    }

    #[test]
    fn test_no_overlay() {
        let state = InteractionState::default();
        assert!(build_overlay(&state, &ViewSettings::default()).is_none());
    }

    #[test]
    fn test_help_lists_keys() {
        let text = lines(&build_help_overlay()).join("\n");
        assert!(text.contains("Pause/resume sampling"));
        assert!(text.contains("1-5"));
    }

    #[test]
    fn test_filter_overlay() {
        let state = InteractionState {
            overlay: Some(Overlay::Filter),
            filter_buffer: "ss".to_string(),
            filter_text: "nginx".to_string(),
            ..InteractionState::default()
        };
        let panel = build_overlay(&state, &ViewSettings::default()).unwrap();
        assert_eq!(panel.title, "Filter Processes: ss");
        let text = lines(&panel);
        assert_eq!(text[1], "> ss_");
        assert_eq!(text[2], "(current: nginx)");
    }

    #[test]
    fn test_menu_marks_selected_layout() {
        let state = InteractionState {
            selected_layout: 1,
            ..InteractionState::default()
        };
        let panel = build_menu_overlay(&state, &ViewSettings::default());
        let text = lines(&panel);
        assert!(text.iter().any(|l| l == "> 2. processes"));
        assert!(text.iter().any(|l| l == "  1. default"));
        assert!(text[0].ends_with("default"));
    }
}
