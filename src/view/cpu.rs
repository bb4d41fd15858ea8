//! CPU panel.

use super::ViewSettings;
use super::common::{
    Align, Column, GraphDims, GraphView, PanelView, Section, TableView, Tier, ViewCell, ViewLine,
    ViewRow, Width,
};
use super::graph::render_graph;
use crate::history::EnrichedSnapshot;
use crate::theme::Role;

pub fn usage_tier(pct: f64) -> Tier {
    Tier::classify(pct, 70.0, 90.0)
}

pub fn temperature_tier(celsius: f64) -> Tier {
    Tier::classify(celsius, 60.0, 80.0)
}

fn usage_row(name: String, pct: f64, low_role: Role) -> ViewRow {
    let tier = usage_tier(pct);
    let paint = if tier == Tier::Low { low_role } else { tier.role() };
    ViewRow::new(vec![
        ViewCell::plain(name),
        ViewCell::styled(format!("{:.1}%", pct), paint),
        ViewCell::bar(pct, paint),
    ])
}

/// Builds the CPU panel: aggregate and per-core usage, frequency,
/// temperature and the usage history graph.
pub fn build_cpu_panel(
    enriched: &EnrichedSnapshot,
    settings: &ViewSettings,
    dims: GraphDims,
) -> PanelView {
    let Some(cpu) = &enriched.snapshot.cpu else {
        return PanelView::unavailable("CPU", Role::Cpu);
    };
    let mut panel = PanelView::new("CPU", Role::Cpu);

    let mut rows = vec![usage_row("Total CPU".to_string(), cpu.total_pct, Role::ProgressLow)];
    rows.extend(
        cpu.per_core_pct
            .iter()
            .enumerate()
            .map(|(i, &pct)| usage_row(format!("Core {}", i), pct, Role::Cpu)),
    );
    panel.sections.push(Section::Table(TableView {
        columns: vec![
            Column::new("Name", Width::Fixed(10), Align::Left),
            Column::new("Usage", Width::Fixed(7), Align::Right),
            Column::new("Bar", Width::Fill(1), Align::Left),
        ],
        show_header: false,
        rows,
    }));

    let mut info = Vec::new();
    let mut subtitle = Vec::new();
    if let Some(freq) = cpu.freq_current {
        subtitle.push(format!("Frequency: {:.1}MHz", freq));
        if let (Some(min), Some(max)) = (cpu.freq_min, cpu.freq_max) {
            info.push(ViewLine::plain(format!("Range: {:.0}-{:.0}MHz", min, max)));
        }
    }
    if settings.check_temp
        && let Some(temp) = cpu.temp_c
    {
        subtitle.push(format!("Temperature: {:.1}°C", temp));
        info.push(ViewLine {
            spans: vec![
                ViewCell::plain("Temperature: "),
                ViewCell::styled(format!("{:.1}°C", temp), temperature_tier(temp)),
            ],
        });
    }
    if !info.is_empty() {
        panel.sections.push(Section::Lines(info));
    }
    if !subtitle.is_empty() {
        panel.subtitle = Some(subtitle.join(" | "));
    }

    panel.graphs.push(GraphView {
        title: None,
        rows: render_graph(&enriched.cpu_history, dims.width, dims.height, settings.graph_symbol),
        paint: Role::Graph.into(),
    });
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CpuSample, Snapshot};
    use crate::view::common::Paint;

    fn enriched(cpu: CpuSample) -> EnrichedSnapshot {
        EnrichedSnapshot {
            snapshot: Snapshot {
                cpu: Some(cpu),
                ..Snapshot::default()
            },
            cpu_history: vec![10.0, 20.0],
            ..EnrichedSnapshot::default()
        }
    }

    fn table(panel: &PanelView) -> &TableView {
        match &panel.sections[0] {
            Section::Table(t) => t,
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_tiers() {
        assert_eq!(usage_tier(91.0), Tier::High);
        assert_eq!(usage_tier(75.0), Tier::Medium);
        assert_eq!(usage_tier(10.0), Tier::Low);
        assert_eq!(temperature_tier(85.0), Tier::High);
        assert_eq!(temperature_tier(65.0), Tier::Medium);
        assert_eq!(temperature_tier(40.0), Tier::Low);
    }

    #[test]
    fn test_cpu_panel_rows_and_subtitle() {
        let panel = build_cpu_panel(
            &enriched(CpuSample {
                total_pct: 95.0,
                per_core_pct: vec![50.0, 80.0],
                freq_current: Some(2400.0),
                temp_c: Some(85.0),
                ..CpuSample::default()
            }),
            &ViewSettings::default(),
            GraphDims::new(10, 4),
        );
        let t = table(&panel);
        assert_eq!(t.rows.len(), 3);
        assert_eq!(t.rows[0].cells[0].text(), "Total CPU");
        assert_eq!(t.rows[0].cells[1].text(), "95.0%");
        assert_eq!(t.rows[0].cells[1].paint, Some(Paint::Role(Role::ProgressHigh)));
        assert_eq!(t.rows[1].cells[1].paint, Some(Paint::Role(Role::Cpu)));
        assert_eq!(t.rows[2].cells[1].paint, Some(Paint::Role(Role::ProgressMedium)));
        assert_eq!(
            panel.subtitle.as_deref(),
            Some("Frequency: 2400.0MHz | Temperature: 85.0°C")
        );
        assert_eq!(panel.graphs[0].rows.len(), 4);
        assert_eq!(panel.graphs[0].rows[0].chars().count(), 10);
    }

    #[test]
    fn test_unknown_fields_omitted() {
        let panel = build_cpu_panel(
            &enriched(CpuSample {
                total_pct: 5.0,
                ..CpuSample::default()
            }),
            &ViewSettings::default(),
            GraphDims::new(4, 2),
        );
        assert!(panel.subtitle.is_none());
        assert_eq!(panel.sections.len(), 1);
    }

    #[test]
    fn test_temperature_hidden_when_disabled() {
        let settings = ViewSettings {
            check_temp: false,
            ..ViewSettings::default()
        };
        let panel = build_cpu_panel(
            &enriched(CpuSample {
                temp_c: Some(50.0),
                ..CpuSample::default()
            }),
            &settings,
            GraphDims::new(4, 2),
        );
        assert!(panel.subtitle.is_none());
    }

    #[test]
    fn test_missing_cpu() {
        let panel = build_cpu_panel(
            &EnrichedSnapshot::default(),
            &ViewSettings::default(),
            GraphDims::new(4, 2),
        );
        assert!(panel.graphs.is_empty());
        assert!(matches!(&panel.sections[0], Section::Lines(l) if l[0].text() == "N/A"));
    }
}
