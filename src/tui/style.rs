//! Theme to ratatui style conversion.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::{self, ColorSpec, Role, Theme};
use crate::view::common::{Paint, ViewCell};

pub fn to_color(color: theme::Color) -> Color {
    match color {
        theme::Color::Black => Color::Black,
        theme::Color::Red => Color::Red,
        theme::Color::Green => Color::Green,
        theme::Color::Yellow => Color::Yellow,
        theme::Color::Blue => Color::Blue,
        theme::Color::Magenta => Color::Magenta,
        theme::Color::Cyan => Color::Cyan,
        theme::Color::White => Color::White,
        theme::Color::Gray => Color::Gray,
        theme::Color::DarkGray => Color::DarkGray,
        theme::Color::BrightRed => Color::LightRed,
        theme::Color::BrightGreen => Color::LightGreen,
        theme::Color::BrightYellow => Color::LightYellow,
        theme::Color::BrightBlue => Color::LightBlue,
        theme::Color::BrightMagenta => Color::LightMagenta,
        theme::Color::BrightCyan => Color::LightCyan,
        theme::Color::Rgb(r, g, b) => Color::Rgb(r, g, b),
    }
}

pub fn spec_style(spec: ColorSpec) -> Style {
    let mut style = Style::default();
    if let Some(fg) = spec.fg {
        style = style.fg(to_color(fg));
    }
    if let Some(bg) = spec.bg {
        style = style.bg(to_color(bg));
    }
    if spec.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Styles resolved against the active theme.
pub struct Styles<'a> {
    theme: &'a Theme,
}

impl<'a> Styles<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn role(&self, role: Role) -> Style {
        spec_style(self.theme.style(role))
    }

    pub fn paint(&self, paint: Paint) -> Style {
        match paint {
            Paint::Role(role) => self.role(role),
            Paint::Fixed(color) => Style::default().fg(to_color(color)),
        }
    }

    /// Cell style; unpainted cells use the text role.
    pub fn cell(&self, cell: &ViewCell) -> Style {
        let style = self.paint(cell.paint.unwrap_or(Paint::Role(Role::Text)));
        if cell.bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}
