//! UI-agnostic view models.
//!
//! Each sub-module turns an [`EnrichedSnapshot`] (plus interaction state
//! where needed) into a [`common::PanelView`]. Builders are pure: same
//! input, same output. The TUI maps view models to ratatui widgets and
//! resolves theme roles at draw time.

pub mod common;
pub mod cpu;
pub mod disks;
pub mod graph;
pub mod header;
pub mod memory;
pub mod network;
pub mod overlay;
pub mod processes;

use crate::config::{Config, GraphSymbol, PanelKind};
use crate::fmt::SizeBase;
use crate::history::EnrichedSnapshot;
use crate::tui::state::InteractionState;

use common::{GraphDims, PanelView};
use disks::DiskFilter;

/// Display settings derived from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub base: SizeBase,
    pub graph_symbol: GraphSymbol,
    pub check_temp: bool,
    pub show_swap: bool,
    pub show_battery: bool,
    pub disks_filter: DiskFilter,
    pub theme_name: String,
    pub update_ms: u64,
    pub preset_names: Vec<String>,
}

impl ViewSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base: SizeBase::from_base10(config.base_10_sizes),
            graph_symbol: config.graph_symbol,
            check_temp: config.check_temp,
            show_swap: config.show_swap,
            show_battery: config.show_battery,
            disks_filter: DiskFilter::parse(&config.disks_filter),
            theme_name: config.color_theme.clone(),
            update_ms: config.update_ms,
            preset_names: config.presets.iter().map(|p| p.name.clone()).collect(),
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Largest graph heights, in rows.
const CPU_GRAPH_MAX: usize = 10;
const MEMORY_GRAPH_MAX: usize = 8;
const NETWORK_GRAPH_MAX: usize = 4;

/// Graph size for a panel of `width` x `height` cells including borders.
///
/// Graphs take 3/5 of the inner width and each sits in its own frame,
/// which costs two rows and two columns. The network panel stacks two.
pub fn graph_dims_for(kind: PanelKind, width: u16, height: u16) -> GraphDims {
    let inner_width = usize::from(width.saturating_sub(2));
    let inner_height = usize::from(height.saturating_sub(2));
    let graph_width = (inner_width * 3 / 5).saturating_sub(2);
    let graph_height = match kind {
        PanelKind::Cpu => inner_height.saturating_sub(2).min(CPU_GRAPH_MAX),
        PanelKind::Memory => inner_height.saturating_sub(2).min(MEMORY_GRAPH_MAX),
        PanelKind::Network => (inner_height / 2).saturating_sub(2).min(NETWORK_GRAPH_MAX),
        PanelKind::Disks | PanelKind::Processes => 0,
    };
    GraphDims::new(graph_width, graph_height)
}

/// Builds the view model of one panel sized `width` x `height`.
pub fn compose_panel(
    kind: PanelKind,
    enriched: &EnrichedSnapshot,
    state: &InteractionState,
    settings: &ViewSettings,
    width: u16,
    height: u16,
) -> PanelView {
    let dims = graph_dims_for(kind, width, height);
    match kind {
        PanelKind::Cpu => cpu::build_cpu_panel(enriched, settings, dims),
        PanelKind::Memory => memory::build_memory_panel(enriched, settings, dims),
        PanelKind::Network => network::build_network_panel(enriched, settings, dims),
        PanelKind::Disks => disks::build_disks_panel(enriched, settings),
        PanelKind::Processes => processes::build_processes_panel(enriched, state, settings),
    }
}
