//! Processes panel: filter, sort and a scroll window over the process list.

use std::cmp::Ordering;
use std::ops::Range;

use super::ViewSettings;
use super::common::{Align, Column, PanelView, Section, TableView, Tier, ViewCell, ViewRow, Width};
use super::graph::sparkline;
use crate::config::SortKey;
use crate::fmt::truncate;
use crate::history::EnrichedSnapshot;
use crate::model::{ProcessSample, ProcessStatus};
use crate::theme::Role;
use crate::tui::state::InteractionState;

/// Rows shown at once.
pub const PAGE_SIZE: usize = 30;

/// Names longer than this are cut to `NAME_WIDTH - 3` chars plus `"..."`.
pub const NAME_WIDTH: usize = 30;

const TREND_WIDTH: usize = 10;

/// `High` above 50%, `Medium` above 20%.
pub fn load_tier(pct: f64) -> Tier {
    Tier::classify(pct, 20.0, 50.0)
}

pub fn status_role(status: ProcessStatus) -> Role {
    match status {
        ProcessStatus::Running => Role::ProgressLow,
        ProcessStatus::Sleeping => Role::Cpu,
        ProcessStatus::Stopped | ProcessStatus::Zombie => Role::ProgressHigh,
        ProcessStatus::DiskSleep | ProcessStatus::TracingStop => Role::ProgressMedium,
        ProcessStatus::Unknown => Role::Text,
    }
}

/// Keeps processes whose name contains `filter` (case-insensitive) and
/// orders them by `key`. Ties are broken by ascending pid, so the result
/// does not depend on enumeration order.
pub fn filter_and_sort<'a>(
    processes: &'a [ProcessSample],
    filter: &str,
    key: SortKey,
    descending: bool,
) -> Vec<&'a ProcessSample> {
    let needle = filter.to_lowercase();
    let mut rows: Vec<&ProcessSample> = processes
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect();

    let value = |p: &ProcessSample| match key {
        SortKey::Cpu => p.cpu_pct,
        SortKey::Memory => p.mem_pct,
    };
    rows.sort_by(|a, b| {
        let cmp = value(a).total_cmp(&value(b));
        let cmp = if descending { cmp.reverse() } else { cmp };
        match cmp {
            Ordering::Equal => a.pid.cmp(&b.pid),
            other => other,
        }
    });
    rows
}

/// Visible index range for a list of `len` rows scrolled to `offset`.
///
/// The start is clamped to `len - page` so the window stays full and
/// sticks to the end of the list.
pub fn visible_window(len: usize, offset: usize, page: usize) -> Range<usize> {
    let start = offset.min(len.saturating_sub(page));
    let end = (start + page).min(len);
    start..end
}

fn process_row(p: &ProcessSample, history: Option<&Vec<f64>>, settings: &ViewSettings) -> ViewRow {
    let trend = history
        .map(|h| sparkline(h, TREND_WIDTH, settings.graph_symbol))
        .unwrap_or_default();
    ViewRow::new(vec![
        ViewCell::plain(p.pid.to_string()),
        ViewCell::plain(truncate(&p.name, NAME_WIDTH)),
        ViewCell::styled(format!("{:.1}", p.cpu_pct), load_tier(p.cpu_pct)),
        ViewCell::styled(format!("{:.1}", p.mem_pct), load_tier(p.mem_pct)),
        ViewCell::styled(p.status.as_str(), status_role(p.status)),
        ViewCell::plain(
            p.thread_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        ViewCell::styled(trend, Role::Graph),
    ])
}

/// Builds the process table for the current filter, sort and scroll state.
pub fn build_processes_panel(
    enriched: &EnrichedSnapshot,
    state: &InteractionState,
    settings: &ViewSettings,
) -> PanelView {
    let Some(processes) = &enriched.snapshot.processes else {
        return PanelView {
            title_paint: Role::Title.into(),
            ..PanelView::unavailable("Processes", Role::Border)
        };
    };
    let mut panel = PanelView::new("Processes", Role::Border);
    panel.title_paint = Role::Title.into();

    let sorted = filter_and_sort(
        processes,
        &state.filter_text,
        state.sort_key,
        state.sort_descending,
    );
    let window = visible_window(sorted.len(), state.scroll_offset, PAGE_SIZE);
    let shown_from = if window.is_empty() { 0 } else { window.start + 1 };
    panel.subtitle = Some(format!(
        "Showing {}-{} of {} processes (↑↓ to scroll, PgUp/PgDn for faster scroll)",
        shown_from,
        window.end,
        sorted.len()
    ));

    let rows = sorted[window]
        .iter()
        .map(|p| process_row(p, enriched.process_history.get(&p.pid), settings))
        .collect();

    let arrow = if state.sort_descending { "↓" } else { "↑" };
    let header = |name: &str, key: SortKey| {
        if state.sort_key == key {
            format!("{}{}", name, arrow)
        } else {
            name.to_string()
        }
    };
    panel.sections.push(Section::Table(TableView {
        columns: vec![
            Column::new("PID", Width::Fixed(7), Align::Right),
            Column::new("Name", Width::Fixed(NAME_WIDTH as u16), Align::Left),
            Column::new(&header("CPU%", SortKey::Cpu), Width::Fixed(7), Align::Right),
            Column::new(&header("MEM%", SortKey::Memory), Width::Fixed(7), Align::Right),
            Column::new("Status", Width::Fixed(12), Align::Left),
            Column::new("Threads", Width::Fixed(8), Align::Right),
            Column::new("Trend", Width::Fill(1), Align::Left),
        ],
        show_header: true,
        rows,
    }));
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::process;
    use crate::model::Snapshot;
    use crate::view::common::Paint;

    fn sample_list() -> Vec<ProcessSample> {
        vec![
            process(10, "chrome", ProcessStatus::Running, 30.0, 12.0),
            process(11, "Chrome Helper", ProcessStatus::Sleeping, 5.0, 12.0),
            process(12, "sshd", ProcessStatus::Sleeping, 0.0, 0.5),
            process(13, "chromedriver", ProcessStatus::Running, 60.0, 4.0),
            process(9, "chrome", ProcessStatus::Zombie, 1.0, 12.0),
        ]
    }

    fn pids(rows: &[&ProcessSample]) -> Vec<u32> {
        rows.iter().map(|p| p.pid).collect()
    }

    #[test]
    fn test_filter_and_sort_order_independent() {
        let list = sample_list();
        let forward = filter_and_sort(&list, "chrome", SortKey::Memory, true);
        let mut reversed = list.clone();
        reversed.reverse();
        let backward = filter_and_sort(&reversed, "chrome", SortKey::Memory, true);
        assert_eq!(pids(&forward), pids(&backward));
        assert_eq!(pids(&forward), vec![9, 10, 11, 13]);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let list = sample_list();
        let rows = filter_and_sort(&list, "CHROME", SortKey::Cpu, true);
        assert_eq!(pids(&rows), vec![13, 10, 11, 9]);
        assert!(filter_and_sort(&list, "nomatch", SortKey::Cpu, true).is_empty());
        assert_eq!(filter_and_sort(&list, "", SortKey::Cpu, false)[0].pid, 12);
    }

    #[test]
    fn test_visible_window() {
        assert_eq!(visible_window(45, 0, PAGE_SIZE), 0..30);
        assert_eq!(visible_window(45, 20, PAGE_SIZE), 15..45);
        assert_eq!(visible_window(45, 100, PAGE_SIZE), 15..45);
        assert_eq!(visible_window(10, 5, PAGE_SIZE), 0..10);
        assert_eq!(visible_window(0, 3, PAGE_SIZE), 0..0);
    }

    #[test]
    fn test_status_roles() {
        assert_eq!(status_role(ProcessStatus::Running), Role::ProgressLow);
        assert_eq!(status_role(ProcessStatus::Sleeping), Role::Cpu);
        assert_eq!(status_role(ProcessStatus::Zombie), Role::ProgressHigh);
        assert_eq!(status_role(ProcessStatus::DiskSleep), Role::ProgressMedium);
        assert_eq!(status_role(ProcessStatus::Unknown), Role::Text);
    }

    #[test]
    fn test_panel_window_and_cells() {
        let mut list: Vec<ProcessSample> = (0..45)
            .map(|i| process(i, &format!("worker-{}", i), ProcessStatus::Running, i as f64, 1.0))
            .collect();
        list[0].name = "x".repeat(40);
        list[0].thread_count = None;
        let enriched = EnrichedSnapshot {
            snapshot: Snapshot {
                processes: Some(list),
                ..Snapshot::default()
            },
            ..EnrichedSnapshot::default()
        };
        let state = InteractionState {
            scroll_offset: 100,
            ..InteractionState::default()
        };
        let panel = build_processes_panel(&enriched, &state, &ViewSettings::default());
        assert_eq!(
            panel.subtitle.as_deref(),
            Some("Showing 16-45 of 45 processes (↑↓ to scroll, PgUp/PgDn for faster scroll)")
        );
        let Section::Table(t) = &panel.sections[0] else {
            panic!("expected table");
        };
        assert_eq!(t.rows.len(), 30);
        assert_eq!(t.columns[2].header, "CPU%↓");
        // descending cpu: last row is pid 0
        let last = t.rows.last().unwrap();
        assert_eq!(last.cells[0].text(), "0");
        assert_eq!(last.cells[1].text(), format!("{}...", "x".repeat(27)));
        assert_eq!(last.cells[5].text(), "N/A");
        let first = &t.rows[0];
        assert_eq!(first.cells[2].text(), "29.0");
        assert_eq!(first.cells[2].paint, Some(Paint::Role(Role::ProgressMedium)));
    }

    #[test]
    fn test_empty_filter_result() {
        let enriched = EnrichedSnapshot {
            snapshot: Snapshot {
                processes: Some(sample_list()),
                ..Snapshot::default()
            },
            ..EnrichedSnapshot::default()
        };
        let state = InteractionState {
            filter_text: "zzz".to_string(),
            ..InteractionState::default()
        };
        let panel = build_processes_panel(&enriched, &state, &ViewSettings::default());
        assert!(panel.subtitle.unwrap().starts_with("Showing 0-0 of 0 processes"));
    }
}
