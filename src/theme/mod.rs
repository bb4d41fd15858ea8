//! Color themes.
//!
//! A [`Theme`] maps each semantic [`Role`] to a [`ColorSpec`] parsed from a
//! style token such as `"white on blue"`, `"#81A1C1"` or `"bold cyan"`.
//! Themes are immutable once built and carry no terminal types; the TUI
//! converts them to ratatui styles at draw time.

mod loader;
mod palette;

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

use tracing::warn;

pub use loader::{load_theme_dir, parse_theme_file};

/// Semantic style roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Header,
    Footer,
    Border,
    Title,
    Text,
    Highlight,
    Cpu,
    Memory,
    Network,
    Disk,
    Process,
    Graph,
    ProgressLow,
    ProgressMedium,
    ProgressHigh,
}

impl Role {
    pub const ALL: [Role; 15] = [
        Role::Header,
        Role::Footer,
        Role::Border,
        Role::Title,
        Role::Text,
        Role::Highlight,
        Role::Cpu,
        Role::Memory,
        Role::Network,
        Role::Disk,
        Role::Process,
        Role::Graph,
        Role::ProgressLow,
        Role::ProgressMedium,
        Role::ProgressHigh,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Role::Header => "header",
            Role::Footer => "footer",
            Role::Border => "border",
            Role::Title => "title",
            Role::Text => "text",
            Role::Highlight => "highlight",
            Role::Cpu => "cpu",
            Role::Memory => "memory",
            Role::Network => "network",
            Role::Disk => "disk",
            Role::Process => "process",
            Role::Graph => "graph",
            Role::ProgressLow => "progress_low",
            Role::ProgressMedium => "progress_medium",
            Role::ProgressHigh => "progress_high",
        }
    }
}

/// Terminal color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parses a color name or `#RRGGBB`.
    pub fn parse(token: &str) -> Result<Self, ThemeError> {
        let lower = token.trim().to_ascii_lowercase();
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ThemeError::InvalidColor(token.to_string()));
        }
        let color = match lower.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" | "purple" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "gray" | "grey" => Color::Gray,
            "dark_gray" | "dark_grey" | "bright_black" => Color::DarkGray,
            "bright_red" => Color::BrightRed,
            "bright_green" => Color::BrightGreen,
            "bright_yellow" => Color::BrightYellow,
            "bright_blue" => Color::BrightBlue,
            "bright_magenta" => Color::BrightMagenta,
            "bright_cyan" => Color::BrightCyan,
            "bright_white" => Color::White,
            _ => return Err(ThemeError::InvalidColor(token.to_string())),
        };
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Foreground, optional background and weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSpec {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl ColorSpec {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    /// Parses a style token: `[bold] [fg] [on bg]`.
    pub fn parse(token: &str) -> Result<Self, ThemeError> {
        let mut spec = ColorSpec::default();
        let mut words = token.split_whitespace();
        while let Some(word) = words.next() {
            match word.to_ascii_lowercase().as_str() {
                "bold" => spec.bold = true,
                "on" => {
                    let bg = words
                        .next()
                        .ok_or_else(|| ThemeError::InvalidColor(token.to_string()))?;
                    spec.bg = Some(Color::parse(bg)?);
                }
                _ => spec.fg = Some(Color::parse(word)?),
            }
        }
        if spec == ColorSpec::default() {
            return Err(ThemeError::InvalidColor(token.to_string()));
        }
        Ok(spec)
    }
}

/// Error building a theme.
#[derive(Debug)]
pub enum ThemeError {
    Io(io::Error),
    Parse(toml::de::Error),
    InvalidColor(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::Io(e) => write!(f, "theme I/O error: {}", e),
            ThemeError::Parse(e) => write!(f, "malformed theme file: {}", e),
            ThemeError::InvalidColor(token) => write!(f, "invalid color '{}'", token),
        }
    }
}

impl std::error::Error for ThemeError {}

impl From<io::Error> for ThemeError {
    fn from(e: io::Error) -> Self {
        ThemeError::Io(e)
    }
}

impl From<toml::de::Error> for ThemeError {
    fn from(e: toml::de::Error) -> Self {
        ThemeError::Parse(e)
    }
}

/// A complete role-to-style mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    styles: BTreeMap<Role, ColorSpec>,
}

impl Theme {
    /// Builds a theme from `(role, token)` pairs. Roles left out fall back
    /// to the default palette.
    pub fn from_tokens<'a>(
        name: &str,
        tokens: impl IntoIterator<Item = (Role, &'a str)>,
    ) -> Result<Self, ThemeError> {
        let mut styles = palette::fallback_styles();
        for (role, token) in tokens {
            styles.insert(role, ColorSpec::parse(token)?);
        }
        Ok(Self {
            name: name.to_string(),
            styles,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self, role: Role) -> ColorSpec {
        self.styles.get(&role).copied().unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            styles: palette::fallback_styles(),
        }
    }
}

/// Built-in palettes plus any loaded from theme files.
#[derive(Debug, Clone)]
pub struct ThemeSet {
    themes: BTreeMap<String, Theme>,
}

impl ThemeSet {
    pub fn builtin() -> Self {
        let themes = palette::builtin_themes()
            .into_iter()
            .map(|t| (t.name().to_string(), t))
            .collect();
        Self { themes }
    }

    /// Built-ins plus every valid `*.theme` file in `dir`. File themes
    /// shadow built-ins of the same name.
    pub fn with_dir(dir: &Path) -> Self {
        let mut set = Self::builtin();
        for theme in load_theme_dir(dir) {
            set.themes.insert(theme.name().to_string(), theme);
        }
        set
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Looks up `name`, falling back to the default theme.
    pub fn resolve(&self, name: &str) -> Theme {
        match self.themes.get(name) {
            Some(theme) => theme.clone(),
            None => {
                warn!(theme = name, "unknown theme, using default");
                self.themes.get("default").cloned().unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_spec() {
        let spec = ColorSpec::parse("white on blue").unwrap();
        assert_eq!(spec.fg, Some(Color::White));
        assert_eq!(spec.bg, Some(Color::Blue));
        assert!(!spec.bold);

        let spec = ColorSpec::parse("#81A1C1").unwrap();
        assert_eq!(spec.fg, Some(Color::Rgb(0x81, 0xA1, 0xC1)));

        let spec = ColorSpec::parse("bold red").unwrap();
        assert!(spec.bold);
        assert_eq!(spec.fg, Some(Color::Red));

        let spec = ColorSpec::parse("black on #88c0d0").unwrap();
        assert_eq!(spec.bg, Some(Color::Rgb(0x88, 0xC0, 0xD0)));
    }

    #[test]
    fn test_parse_color_spec_errors() {
        assert!(ColorSpec::parse("").is_err());
        assert!(ColorSpec::parse("white on").is_err());
        assert!(ColorSpec::parse("#12345").is_err());
        assert!(ColorSpec::parse("chartreuse").is_err());
    }

    #[test]
    fn test_purple_is_magenta() {
        assert_eq!(Color::parse("purple").unwrap(), Color::Magenta);
    }

    #[test]
    fn test_builtin_set() {
        let set = ThemeSet::builtin();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["default", "dracula", "gruvbox", "nord"]);
        for name in names {
            let theme = set.get(name).unwrap();
            for role in Role::ALL {
                assert!(theme.style(role).fg.is_some(), "{} {}", name, role.key());
            }
        }
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        let set = ThemeSet::builtin();
        assert_eq!(set.resolve("nord").name(), "nord");
        assert_eq!(set.resolve("solarized").name(), "default");
    }

    #[test]
    fn test_from_tokens_fills_missing_roles() {
        let theme = Theme::from_tokens("partial", [(Role::Cpu, "#ff0000")]).unwrap();
        assert_eq!(theme.style(Role::Cpu).fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(theme.style(Role::Memory), Theme::default().style(Role::Memory));
    }
}
