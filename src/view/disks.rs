//! Disks panel.

use super::ViewSettings;
use super::common::{
    Align, Column, Paint, PanelView, Section, TableView, ViewCell, ViewLine, ViewRow, Width,
};
use super::cpu::usage_tier;
use crate::fmt::{FmtStyle, format_bytes, format_opt_speed};
use crate::history::EnrichedSnapshot;
use crate::model::DiskKind;
use crate::theme::{Color, Role};

/// Mountpoint filter parsed from the `disks_filter` setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DiskFilter {
    #[default]
    All,
    Exclude(Vec<String>),
    Include(Vec<String>),
}

impl DiskFilter {
    /// `"exclude=/boot /tmp"` hides those mounts, `"/ /home"` shows only
    /// those, an empty string shows everything. Commas also separate.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (exclude, list) = match spec.strip_prefix("exclude=") {
            Some(rest) => (true, rest),
            None => (false, spec),
        };
        let mounts: Vec<String> = list
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        match (exclude, mounts.is_empty()) {
            (_, true) => DiskFilter::All,
            (true, false) => DiskFilter::Exclude(mounts),
            (false, false) => DiskFilter::Include(mounts),
        }
    }

    pub fn allows(&self, mountpoint: &str) -> bool {
        match self {
            DiskFilter::All => true,
            DiskFilter::Exclude(mounts) => !mounts.iter().any(|m| m == mountpoint),
            DiskFilter::Include(mounts) => mounts.iter().any(|m| m == mountpoint),
        }
    }
}

/// Fixed color per volume type.
pub fn kind_color(kind: DiskKind) -> Color {
    match kind {
        DiskKind::Fixed => Color::Green,
        DiskKind::Removable => Color::Yellow,
        DiskKind::Network => Color::Blue,
        DiskKind::Optical => Color::Magenta,
        DiskKind::RamDisk => Color::Cyan,
        DiskKind::Unknown => Color::White,
    }
}

/// Builds the disks table, one row per volume that passes the filter.
pub fn build_disks_panel(enriched: &EnrichedSnapshot, settings: &ViewSettings) -> PanelView {
    let Some(disks) = &enriched.snapshot.disks else {
        return PanelView::unavailable("Disks", Role::Disk);
    };
    let base = settings.base;
    let bytes = |b: u64| format_bytes(b as f64, base, FmtStyle::Compact);
    let mut panel = PanelView::new("Disks", Role::Disk);

    let visible: Vec<_> = disks
        .iter()
        .filter(|d| settings.disks_filter.allows(&d.mountpoint))
        .collect();
    if visible.is_empty() {
        panel
            .sections
            .push(Section::Lines(vec![ViewLine::plain("No volumes to show")]));
        return panel;
    }

    let show_io = visible.iter().any(|d| {
        enriched
            .disk_rates
            .get(&d.label)
            .is_some_and(|r| r.read.is_some())
    });

    let rows = visible
        .iter()
        .map(|disk| {
            let mut cells = vec![
                ViewCell::plain(disk.mountpoint.clone()),
                ViewCell::plain(disk.label.clone()),
                ViewCell::styled(disk.kind.label(), Paint::Fixed(kind_color(disk.kind))),
                ViewCell::bar(disk.pct, usage_tier(disk.pct)),
                ViewCell::plain(bytes(disk.free)),
                ViewCell::plain(bytes(disk.total)),
            ];
            if show_io {
                let rates = enriched.disk_rates.get(&disk.label).copied().unwrap_or_default();
                cells.push(ViewCell::plain(format_opt_speed(rates.read, base, FmtStyle::Compact)));
                cells.push(ViewCell::plain(format_opt_speed(rates.write, base, FmtStyle::Compact)));
            }
            ViewRow::new(cells)
        })
        .collect();

    let mut columns = vec![
        Column::new("Drive", Width::Fill(2), Align::Left),
        Column::new("Label", Width::Fill(1), Align::Left),
        Column::new("Type", Width::Fixed(9), Align::Center),
        Column::new("Usage", Width::Fill(2), Align::Left),
        Column::new("Free", Width::Fixed(9), Align::Right),
        Column::new("Total", Width::Fixed(9), Align::Right),
    ];
    if show_io {
        columns.push(Column::new("Read", Width::Fixed(10), Align::Right));
        columns.push(Column::new("Write", Width::Fixed(10), Align::Right));
    }
    panel.sections.push(Section::Table(TableView {
        columns,
        show_header: true,
        rows,
    }));
    panel
}
