//! Persisted user settings.
//!
//! The configuration is a JSON document. Missing keys take their defaults,
//! unknown keys are dropped on the next save. There is no global instance:
//! the binary loads a [`Config`] through a [`ConfigStore`] and passes it on.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const APP_DIR: &str = "sysview";
const CONFIG_FILE: &str = "sysview.conf";

/// Lower bound for the refresh interval.
pub const MIN_UPDATE_MS: u64 = 100;

/// Glyph ramp used for history graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphSymbol {
    #[default]
    Braille,
    Block,
    Tty,
}

impl GraphSymbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphSymbol::Braille => "braille",
            GraphSymbol::Block => "block",
            GraphSymbol::Tty => "tty",
        }
    }
}

impl std::str::FromStr for GraphSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "braille" => Ok(GraphSymbol::Braille),
            "block" => Ok(GraphSymbol::Block),
            "tty" => Ok(GraphSymbol::Tty),
            other => Err(format!(
                "unknown graph symbol '{}' (expected braille, block or tty)",
                other
            )),
        }
    }
}

/// Process table sort column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    #[serde(alias = "cpu lazy", alias = "cpu direct")]
    Cpu,
    #[serde(alias = "mem")]
    Memory,
}

impl SortKey {
    pub fn toggled(self) -> Self {
        match self {
            SortKey::Cpu => SortKey::Memory,
            SortKey::Memory => SortKey::Cpu,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU",
            SortKey::Memory => "MEM",
        }
    }
}

/// A dashboard panel that a layout preset can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Cpu,
    #[serde(alias = "mem")]
    Memory,
    #[serde(alias = "net")]
    Network,
    #[serde(alias = "disk")]
    Disks,
    #[serde(alias = "proc")]
    Processes,
}

/// Named arrangement of panels into a left and a right column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPreset {
    pub name: String,
    pub left: Vec<PanelKind>,
    pub right: Vec<PanelKind>,
}

impl LayoutPreset {
    fn new(name: &str, left: &[PanelKind], right: &[PanelKind]) -> Self {
        Self {
            name: name.to_string(),
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }

    /// The five presets selectable with `1`..`5` out of the box.
    pub fn builtin() -> Vec<LayoutPreset> {
        use PanelKind::*;
        vec![
            Self::new("default", &[Cpu, Memory, Network, Disks], &[Processes]),
            Self::new("processes", &[Cpu, Memory], &[Processes]),
            Self::new("resources", &[Cpu, Memory], &[Network, Disks]),
            Self::new("network", &[Network, Cpu], &[Processes]),
            Self::new("storage", &[Disks, Memory], &[Processes]),
        ]
    }
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub color_theme: String,
    pub update_ms: u64,
    pub graph_symbol: GraphSymbol,
    pub base_10_sizes: bool,
    pub check_temp: bool,
    pub show_swap: bool,
    pub show_battery: bool,
    /// `exclude=<mounts>` hides the listed mountpoints; any other non-empty
    /// value shows only the listed ones. Mounts are separated by spaces or
    /// commas.
    pub disks_filter: String,
    pub proc_sorting: SortKey,
    /// Ascending instead of descending process order.
    pub proc_reversed: bool,
    pub proc_filter: String,
    pub selected_layout: usize,
    pub rounded_corners: bool,
    pub presets: Vec<LayoutPreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_theme: "default".to_string(),
            update_ms: 1500,
            graph_symbol: GraphSymbol::Braille,
            base_10_sizes: false,
            check_temp: true,
            show_swap: true,
            show_battery: true,
            disks_filter: "exclude=/boot".to_string(),
            proc_sorting: SortKey::Cpu,
            proc_reversed: false,
            proc_filter: String::new(),
            selected_layout: 0,
            rounded_corners: true,
            presets: LayoutPreset::builtin(),
        }
    }
}

impl Config {
    /// Refresh interval, never below [`MIN_UPDATE_MS`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.update_ms.max(MIN_UPDATE_MS))
    }

    /// Repairs values that deserialize fine but cannot be used as-is.
    pub fn normalize(&mut self) {
        if self.presets.is_empty() {
            self.presets = LayoutPreset::builtin();
        }
        if self.selected_layout >= self.presets.len() {
            self.selected_layout = 0;
        }
        if self.update_ms < MIN_UPDATE_MS {
            self.update_ms = MIN_UPDATE_MS;
        }
    }

    /// Parses a JSON document, merging it over the defaults.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(content).map_err(ConfigError::Parse)?;
        config.normalize();
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }
}

/// Command-line values that apply to one run and are never saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub update_ms: Option<u64>,
    pub graph_symbol: Option<GraphSymbol>,
}

impl Overrides {
    /// Returns a copy of `config` with the overrides applied.
    pub fn apply(&self, config: &Config) -> Config {
        let mut effective = config.clone();
        if let Some(ms) = self.update_ms {
            effective.update_ms = ms.max(MIN_UPDATE_MS);
        }
        if let Some(symbol) = self.graph_symbol {
            effective.graph_symbol = symbol;
        }
        effective
    }
}

/// Error loading or saving the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    NoConfigDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "malformed config: {}", e),
            ConfigError::NoConfigDir => write!(f, "cannot determine config directory"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::NoConfigDir => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// `$XDG_CONFIG_HOME/sysview`, else `$HOME/.config/sysview`.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home).join(".config").join(APP_DIR));
    }
    Err(ConfigError::NoConfigDir)
}

/// Loads and saves the configuration at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside [`config_dir`].
    pub fn default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(config_dir()?.join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the config file; `*.theme` files live in its
    /// `themes` subdirectory.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Loads the configuration.
    ///
    /// A missing file is created with defaults. A malformed file is replaced
    /// by a clean default document. Write failures are logged and otherwise
    /// ignored, since the dashboard works without persistence.
    pub fn load(&self) -> Config {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, writing defaults");
                let config = Config::default();
                self.save_or_warn(&config);
                return config;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read config, using defaults");
                return Config::default();
            }
        };

        match Config::from_json(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed config, rewriting defaults");
                let config = Config::default();
                self.save_or_warn(&config);
                config
            }
        }
    }

    /// Writes `config` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(dir) = self.dir() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, config.to_json()?)?;
        Ok(())
    }

    pub fn save_or_warn(&self, config: &Config) {
        if let Err(e) = self.save(config) {
            warn!(path = %self.path.display(), error = %e, "failed to save config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.color_theme, "default");
        assert_eq!(config.update_ms, 1500);
        assert_eq!(config.graph_symbol, GraphSymbol::Braille);
        assert_eq!(config.disks_filter, "exclude=/boot");
        assert_eq!(config.presets.len(), 5);
        assert_eq!(config.interval(), Duration::from_millis(1500));
    }

    #[test]
    fn test_partial_document_merges_defaults() {
        let config = Config::from_json(r#"{"color_theme": "nord", "graph_symbol": "tty"}"#).unwrap();
        assert_eq!(config.color_theme, "nord");
        assert_eq!(config.graph_symbol, GraphSymbol::Tty);
        assert_eq!(config.update_ms, 1500);
        assert!(config.show_swap);
    }

    #[test]
    fn test_legacy_sort_value_accepted() {
        let config = Config::from_json(r#"{"proc_sorting": "cpu lazy"}"#).unwrap();
        assert_eq!(config.proc_sorting, SortKey::Cpu);
        let config = Config::from_json(r#"{"proc_sorting": "memory"}"#).unwrap();
        assert_eq!(config.proc_sorting, SortKey::Memory);
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let config = Config::from_json(r#"{"vim_keys": true, "truecolor": false}"#).unwrap();
        let json = config.to_json().unwrap();
        assert!(!json.contains("vim_keys"));
        assert!(json.contains("\"color_theme\""));
    }

    #[test]
    fn test_normalize() {
        let config =
            Config::from_json(r#"{"selected_layout": 9, "presets": [], "update_ms": 5}"#).unwrap();
        assert_eq!(config.selected_layout, 0);
        assert_eq!(config.presets.len(), 5);
        assert_eq!(config.update_ms, MIN_UPDATE_MS);
    }

    #[test]
    fn test_preset_aliases() {
        let config = Config::from_json(
            r#"{"presets": [{"name": "x", "left": ["mem", "net"], "right": ["proc"]}]}"#,
        )
        .unwrap();
        assert_eq!(config.presets[0].left, vec![PanelKind::Memory, PanelKind::Network]);
        assert_eq!(config.presets[0].right, vec![PanelKind::Processes]);
    }

    #[test]
    fn test_graph_symbol_from_str() {
        assert_eq!("Block".parse::<GraphSymbol>().unwrap(), GraphSymbol::Block);
        assert!("dots".parse::<GraphSymbol>().is_err());
    }

    #[test]
    fn test_overrides_leave_source_untouched() {
        let config = Config::default();
        let overrides = Overrides {
            update_ms: Some(20),
            graph_symbol: Some(GraphSymbol::Tty),
        };
        let effective = overrides.apply(&config);
        assert_eq!(effective.update_ms, MIN_UPDATE_MS);
        assert_eq!(effective.graph_symbol, GraphSymbol::Tty);
        assert_eq!(config.update_ms, 1500);
        assert_eq!(config.graph_symbol, GraphSymbol::Braille);
        assert_eq!(Overrides::default().apply(&config), config);
    }

    #[test]
    fn test_store_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("nested/sysview.conf"));
        let config = store.load();
        assert_eq!(config, Config::default());
        assert!(store.path().exists());
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("sysview.conf"));
        let mut config = Config::default();
        config.proc_filter = "ssh".to_string();
        config.proc_sorting = SortKey::Memory;
        config.selected_layout = 2;
        store.save(&config).unwrap();
        assert_eq!(store.load(), config);
    }

    #[test]
    fn test_store_rewrites_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysview.conf");
        std::fs::write(&path, "{ not json").unwrap();
        let store = ConfigStore::new(&path);
        assert_eq!(store.load(), Config::default());
        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(Config::from_json(&rewritten).is_ok());
    }
}
