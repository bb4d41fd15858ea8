//! UI-agnostic view model types.
//!
//! These types describe what a panel shows without any dependency on a
//! rendering framework. The TUI resolves [`Paint`] through the active
//! theme and maps cells to ratatui widgets.

use crate::theme::{Color, Role};

/// Severity tier of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// `High` above `high`, `Medium` above `medium`, `Low` otherwise.
    pub fn classify(value: f64, medium: f64, high: f64) -> Self {
        if value > high {
            Tier::High
        } else if value > medium {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn role(self) -> Role {
        match self {
            Tier::Low => Role::ProgressLow,
            Tier::Medium => Role::ProgressMedium,
            Tier::High => Role::ProgressHigh,
        }
    }
}

/// Where a cell's color comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Resolved through the active theme.
    Role(Role),
    /// Fixed color regardless of theme.
    Fixed(Color),
}

impl From<Role> for Paint {
    fn from(role: Role) -> Self {
        Paint::Role(role)
    }
}

impl From<Tier> for Paint {
    fn from(tier: Tier) -> Self {
        Paint::Role(tier.role())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    /// Horizontal gauge, `fraction` in `0.0..=1.0`.
    Bar { fraction: f64 },
}

/// A single table cell or line span.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCell {
    pub content: CellContent,
    /// `None` = inherit the panel text style.
    pub paint: Option<Paint>,
    pub bold: bool,
}

impl ViewCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            content: CellContent::Text(text.into()),
            paint: None,
            bold: false,
        }
    }

    pub fn styled(text: impl Into<String>, paint: impl Into<Paint>) -> Self {
        Self {
            content: CellContent::Text(text.into()),
            paint: Some(paint.into()),
            bold: false,
        }
    }

    /// Gauge filled to `pct` percent.
    pub fn bar(pct: f64, paint: impl Into<Paint>) -> Self {
        Self {
            content: CellContent::Bar {
                fraction: (pct / 100.0).clamp(0.0, 1.0),
            },
            paint: Some(paint.into()),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Text content, empty for bars.
    pub fn text(&self) -> &str {
        match &self.content {
            CellContent::Text(t) => t,
            CellContent::Bar { .. } => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Fixed(u16),
    /// Share of the remaining width.
    Fill(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: Width,
    pub align: Align,
}

impl Column {
    pub fn new(header: &str, width: Width, align: Align) -> Self {
        Self {
            header: header.to_string(),
            width,
            align,
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub cells: Vec<ViewCell>,
}

impl ViewRow {
    pub fn new(cells: Vec<ViewCell>) -> Self {
        Self { cells }
    }
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<Column>,
    pub show_header: bool,
    pub rows: Vec<ViewRow>,
}

/// A line of styled spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewLine {
    pub spans: Vec<ViewCell>,
}

impl ViewLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![ViewCell::plain(text)],
        }
    }

    pub fn styled(text: impl Into<String>, paint: impl Into<Paint>) -> Self {
        Self {
            spans: vec![ViewCell::styled(text, paint)],
        }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(ViewCell::text).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Table(TableView),
    Lines(Vec<ViewLine>),
}

/// A rendered history graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    pub title: Option<String>,
    /// Top row first.
    pub rows: Vec<String>,
    pub paint: Paint,
}

/// Everything needed to draw one bordered panel.
///
/// `sections` stack vertically in the info column; `graphs` stack in a
/// second column to their right (2:3 split). A panel without graphs uses
/// the full width for its sections.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: String,
    pub subtitle: Option<String>,
    pub border: Paint,
    pub title_paint: Paint,
    pub sections: Vec<Section>,
    pub graphs: Vec<GraphView>,
}

impl PanelView {
    pub fn new(title: &str, border: impl Into<Paint>) -> Self {
        let border = border.into();
        Self {
            title: title.to_string(),
            subtitle: None,
            border,
            title_paint: border,
            sections: Vec::new(),
            graphs: Vec::new(),
        }
    }

    /// Panel for a domain whose sample is unavailable.
    pub fn unavailable(title: &str, border: impl Into<Paint>) -> Self {
        let mut panel = Self::new(title, border);
        panel.sections.push(Section::Lines(vec![ViewLine::styled("N/A", Role::Text)]));
        panel
    }
}

/// Size available to a panel's graphs, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphDims {
    pub width: usize,
    pub height: usize,
}

impl GraphDims {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_classify() {
        assert_eq!(Tier::classify(95.0, 70.0, 90.0), Tier::High);
        assert_eq!(Tier::classify(90.0, 70.0, 90.0), Tier::Medium);
        assert_eq!(Tier::classify(70.0, 70.0, 90.0), Tier::Low);
        assert_eq!(Tier::High.role(), Role::ProgressHigh);
    }

    #[test]
    fn test_bar_fraction_clamped() {
        let cell = ViewCell::bar(150.0, Tier::Low);
        assert_eq!(cell.content, CellContent::Bar { fraction: 1.0 });
        let cell = ViewCell::bar(-5.0, Tier::Low);
        assert_eq!(cell.content, CellContent::Bar { fraction: 0.0 });
    }

    #[test]
    fn test_line_text() {
        let line = ViewLine {
            spans: vec![ViewCell::plain("a"), ViewCell::styled("b", Role::Cpu)],
        };
        assert_eq!(line.text(), "ab");
    }
}
