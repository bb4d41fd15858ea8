//! Network panel.

use super::ViewSettings;
use super::common::{
    Align, Column, GraphDims, GraphView, PanelView, Section, TableView, Tier, ViewCell, ViewRow,
    Width,
};
use super::graph::render_graph;
use crate::fmt::{FmtStyle, format_bytes, format_count, format_opt_speed, format_speed};
use crate::history::EnrichedSnapshot;
use crate::theme::Role;

const MIB: f64 = 1024.0 * 1024.0;

/// `High` above 10 MiB/s, `Medium` above 1 MiB/s.
pub fn rate_tier(bytes_per_sec: f64) -> Tier {
    Tier::classify(bytes_per_sec, MIB, 10.0 * MIB)
}

/// Builds the network panel with current, cumulative and peak figures and
/// separate upload and download graphs.
pub fn build_network_panel(
    enriched: &EnrichedSnapshot,
    settings: &ViewSettings,
    dims: GraphDims,
) -> PanelView {
    let Some(net) = &enriched.network else {
        return PanelView::unavailable("Network", Role::Network);
    };
    let base = settings.base;
    let mut panel = PanelView::new("Network", Role::Network);

    let current = |rate: Option<f64>| match rate {
        Some(r) => ViewCell::styled(format_speed(r, base, FmtStyle::Compact), rate_tier(r)),
        None => ViewCell::plain("N/A"),
    };
    let counters = net.counters;
    let mut rows = vec![
        ViewRow::new(vec![
            ViewCell::styled("Upload ↑", Role::Network).bold(),
            current(net.send_rate),
            ViewCell::plain(format_bytes(counters.bytes_sent as f64, base, FmtStyle::Compact)),
            ViewCell::plain(format_count(counters.packets_sent)),
        ]),
        ViewRow::new(vec![
            ViewCell::styled("Download ↓", Role::Cpu).bold(),
            current(net.recv_rate),
            ViewCell::plain(format_bytes(counters.bytes_recv as f64, base, FmtStyle::Compact)),
            ViewCell::plain(format_count(counters.packets_recv)),
        ]),
    ];
    for (label, peak) in [("Peak Upload", net.peak_send), ("Peak Download", net.peak_recv)] {
        rows.push(ViewRow::new(vec![
            ViewCell::plain(label),
            ViewCell::plain(format_speed(peak, base, FmtStyle::Compact)),
            ViewCell::plain(""),
            ViewCell::plain(""),
        ]));
    }
    panel.sections.push(Section::Table(TableView {
        columns: vec![
            Column::new("Type", Width::Fixed(13), Align::Left),
            Column::new("Current", Width::Fill(1), Align::Right),
            Column::new("Total", Width::Fill(1), Align::Right),
            Column::new("Packets", Width::Fill(1), Align::Right),
        ],
        show_header: true,
        rows,
    }));

    let total = net.send_rate.zip(net.recv_rate).map(|(s, r)| s + r);
    panel.subtitle = Some(format!(
        "Total Speed: {}",
        format_opt_speed(total, base, FmtStyle::Detail)
    ));

    let upload: Vec<f64> = enriched.network_history.iter().map(|&(s, _)| s).collect();
    let download: Vec<f64> = enriched.network_history.iter().map(|&(_, r)| r).collect();
    for (title, series, role) in [
        ("Upload History", upload, Role::Network),
        ("Download History", download, Role::Cpu),
    ] {
        panel.graphs.push(GraphView {
            title: Some(title.to_string()),
            rows: render_graph(&series, dims.width, dims.height, settings.graph_symbol),
            paint: role.into(),
        });
    }
    panel
}
