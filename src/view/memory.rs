//! Memory panel.

use super::ViewSettings;
use super::common::{
    Align, Column, GraphDims, GraphView, PanelView, Section, TableView, Tier, ViewCell, ViewRow,
    Width,
};
use super::cpu::usage_tier;
use super::graph::render_graph;
use crate::fmt::{FmtStyle, format_bytes};
use crate::history::EnrichedSnapshot;
use crate::theme::Role;

pub fn swap_tier(pct: f64) -> Tier {
    Tier::classify(pct, 25.0, 50.0)
}

fn detail_row(text: String) -> ViewRow {
    ViewRow::new(vec![
        ViewCell::plain(""),
        ViewCell::plain(text),
        ViewCell::plain(""),
    ])
}

/// Builds the memory panel. Cached/buffers rows appear only when the
/// platform reports them; swap rows only when swap is configured.
pub fn build_memory_panel(
    enriched: &EnrichedSnapshot,
    settings: &ViewSettings,
    dims: GraphDims,
) -> PanelView {
    let Some(mem) = &enriched.snapshot.memory else {
        return PanelView::unavailable("Memory", Role::Memory);
    };
    let bytes = |b: u64| format_bytes(b as f64, settings.base, FmtStyle::Compact);
    let mut panel = PanelView::new("Memory", Role::Memory);

    let ram_paint = usage_tier(mem.pct);
    let mut rows = vec![
        ViewRow::new(vec![
            ViewCell::plain("RAM"),
            ViewCell::plain(format!("{} / {}", bytes(mem.used), bytes(mem.total))),
            ViewCell::bar(mem.pct, ram_paint),
        ]),
        detail_row(format!("Available: {}", bytes(mem.available))),
    ];
    if let Some(cached) = mem.cached {
        rows.push(detail_row(format!("Cached: {}", bytes(cached))));
    }
    if let Some(buffers) = mem.buffers {
        rows.push(detail_row(format!("Buffers: {}", bytes(buffers))));
    }
    if settings.show_swap && mem.swap_total > 0 {
        let tier = swap_tier(mem.swap_pct);
        let paint = if tier == Tier::Low { Role::Memory } else { tier.role() };
        rows.push(ViewRow::new(vec![
            ViewCell::plain("Swap"),
            ViewCell::plain(format!("{} / {}", bytes(mem.swap_used), bytes(mem.swap_total))),
            ViewCell::bar(mem.swap_pct, paint),
        ]));
        rows.push(detail_row(format!(
            "Free: {}",
            bytes(mem.swap_total.saturating_sub(mem.swap_used))
        )));
    }

    panel.sections.push(Section::Table(TableView {
        columns: vec![
            Column::new("Type", Width::Fixed(5), Align::Left),
            Column::new("Usage", Width::Fill(2), Align::Right),
            Column::new("Bar", Width::Fill(1), Align::Left),
        ],
        show_header: false,
        rows,
    }));

    panel.subtitle = Some(format!(
        "Used: {:.1}% of {}",
        mem.pct,
        format_bytes(mem.total as f64, settings.base, FmtStyle::Detail)
    ));
    panel.graphs.push(GraphView {
        title: Some("Memory Usage History".to_string()),
        rows: render_graph(
            &enriched.memory_history,
            dims.width,
            dims.height,
            settings.graph_symbol,
        ),
        paint: Role::Graph.into(),
    });
    panel
}
