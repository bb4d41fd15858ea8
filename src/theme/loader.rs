//! `*.theme` files.
//!
//! A theme file is TOML with a `[main]` table of named colors and one table
//! per box (`cpu`, `mem`, `net`, `disk`, `proc`). Box values may name a
//! `[main]` entry instead of a literal color:
//!
//! ```toml
//! [main]
//! foreground = "#d8dee9"
//! cyan = "#88c0d0"
//!
//! [cpu]
//! border = "cyan"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{Role, Theme, ThemeError};

#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    main: BTreeMap<String, String>,
    #[serde(flatten)]
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ThemeFile {
    fn main_color(&self, key: &str, fallback: &str) -> String {
        self.main
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Border color of a box section, dereferencing `[main]` names.
    fn border(&self, section: &str, fallback: &str) -> String {
        let value = self
            .sections
            .iter()
            .find(|(name, _)| section_name(name) == section)
            .and_then(|(_, entries)| entries.get("border"));
        match value {
            Some(v) => self.main.get(v).cloned().unwrap_or_else(|| v.clone()),
            None => fallback.to_string(),
        }
    }
}

/// Accepts both `cpu` and the legacy `theme[cpu]` spelling.
fn section_name(raw: &str) -> &str {
    raw.strip_prefix("theme[")
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw)
}

/// Parses one theme file's contents into a theme called `name`.
pub fn parse_theme_file(name: &str, content: &str) -> Result<Theme, ThemeError> {
    let file: ThemeFile = toml::from_str(content)?;

    let cyan = file.main_color("cyan", "#88c0d0");
    let foreground = file.main_color("foreground", "#d8dee9");
    let bar = format!("black on {}", cyan);

    let tokens: Vec<(Role, String)> = vec![
        (Role::Header, bar.clone()),
        (Role::Footer, bar),
        (Role::Border, foreground.clone()),
        (Role::Title, cyan.clone()),
        (Role::Text, foreground),
        (Role::Highlight, cyan),
        (Role::Cpu, file.border("cpu", "#81a1c1")),
        (Role::Memory, file.border("mem", "#b48ead")),
        (Role::Network, file.border("net", "#a3be8c")),
        (Role::Disk, file.border("disk", "#ebcb8b")),
        (Role::Process, file.border("proc", "#88c0d0")),
        (Role::Graph, file.main_color("blue", "#81a1c1")),
        (Role::ProgressLow, file.main_color("green", "#a3be8c")),
        (Role::ProgressMedium, file.main_color("yellow", "#ebcb8b")),
        (Role::ProgressHigh, file.main_color("red", "#bf616a")),
    ];
    Theme::from_tokens(name, tokens.iter().map(|(role, t)| (*role, t.as_str())))
}

/// Loads every `*.theme` file in `dir`, named after the file stem.
///
/// A missing directory yields no themes; malformed files are skipped.
pub fn load_theme_dir(dir: &Path) -> Vec<Theme> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "no theme directory");
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "theme"))
        .collect();
    paths.sort();

    let mut themes = Vec::new();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let result = std::fs::read_to_string(&path)
            .map_err(ThemeError::from)
            .and_then(|content| parse_theme_file(name, &content));
        match result {
            Ok(theme) => themes.push(theme),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping theme file"),
        }
    }
    themes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Color, ThemeSet};
    use tempfile::TempDir;

    const OCEAN: &str = r##"
[main]
foreground = "#c0c5ce"
cyan = "#96b5b4"
blue = "#8fa1b3"
green = "#a3be8c"
yellow = "#ebcb8b"
red = "#bf616a"

[cpu]
border = "blue"

[mem]
border = "#b48ead"
"##;

    #[test]
    fn test_parse_theme_file() {
        let theme = parse_theme_file("ocean", OCEAN).unwrap();
        assert_eq!(theme.name(), "ocean");
        let header = theme.style(Role::Header);
        assert_eq!(header.fg, Some(Color::Black));
        assert_eq!(header.bg, Some(Color::Rgb(0x96, 0xb5, 0xb4)));
        // `blue` is dereferenced through [main]
        assert_eq!(theme.style(Role::Cpu).fg, Some(Color::Rgb(0x8f, 0xa1, 0xb3)));
        assert_eq!(theme.style(Role::Memory).fg, Some(Color::Rgb(0xb4, 0x8e, 0xad)));
        // sections left out use the fallbacks
        assert_eq!(theme.style(Role::Disk).fg, Some(Color::Rgb(0xeb, 0xcb, 0x8b)));
    }

    #[test]
    fn test_legacy_section_names() {
        let content = "[main]\nred = \"#ff0000\"\n[\"theme[proc]\"]\nborder = \"red\"\n";
        let theme = parse_theme_file("legacy", content).unwrap();
        assert_eq!(theme.style(Role::Process).fg, Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn test_bad_color_rejected() {
        let content = "[main]\ncyan = \"not-a-color\"\n";
        assert!(matches!(
            parse_theme_file("bad", content),
            Err(ThemeError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_load_dir_skips_malformed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ocean.theme"), OCEAN).unwrap();
        std::fs::write(dir.path().join("broken.theme"), "[main\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let themes = load_theme_dir(dir.path());
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].name(), "ocean");

        let set = ThemeSet::with_dir(dir.path());
        assert!(set.get("ocean").is_some());
        assert!(set.get("nord").is_some());
    }

    #[test]
    fn test_missing_dir() {
        assert!(load_theme_dir(Path::new("/nonexistent/themes/12345")).is_empty());
    }
}
