//! Main rendering logic for TUI.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::config::{LayoutPreset, PanelKind};
use crate::history::EnrichedSnapshot;
use crate::theme::{Role, Theme};
use crate::view::common::{
    Align, CellContent, GraphView, PanelView, Section, TableView, ViewCell, ViewLine, Width,
};
use crate::view::header::{build_footer, build_header};
use crate::view::overlay::build_overlay;
use crate::view::{ViewSettings, compose_panel};

use super::state::InteractionState;
use super::style::Styles;

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';

/// Everything one frame is drawn from.
pub struct RenderContext<'a> {
    pub enriched: &'a EnrichedSnapshot,
    pub state: &'a InteractionState,
    pub settings: &'a ViewSettings,
    pub theme: &'a Theme,
    pub presets: &'a [LayoutPreset],
    pub rounded: bool,
    pub now: DateTime<Local>,
}

/// Main render function.
pub fn render(frame: &mut Frame, ctx: &RenderContext) {
    let styles = Styles::new(ctx.theme);
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(0),    // Panels
        Constraint::Length(1), // Footer
    ])
    .split(frame.area());

    let header = build_header(ctx.enriched, ctx.state, &ctx.now);
    frame.render_widget(
        Paragraph::new(styled_line(&header, &styles)).style(styles.role(Role::Header)),
        chunks[0],
    );

    match build_overlay(ctx.state, ctx.settings) {
        Some(panel) => {
            let area = centered_rect(60, 70, chunks[1]);
            frame.render_widget(Clear, area);
            draw_panel(frame, area, &panel, &styles, ctx.rounded);
        }
        None => render_preset(frame, chunks[1], ctx, &styles),
    }

    let footer = build_footer(ctx.enriched, ctx.settings);
    frame.render_widget(
        Paragraph::new(styled_line(&footer, &styles)).style(styles.role(Role::Footer)),
        chunks[2],
    );
}

/// Relative height of a panel within its column.
fn panel_weight(kind: PanelKind) -> u32 {
    match kind {
        PanelKind::Cpu | PanelKind::Memory | PanelKind::Network => 2,
        PanelKind::Disks => 3,
        PanelKind::Processes => 6,
    }
}

fn render_preset(frame: &mut Frame, area: Rect, ctx: &RenderContext, styles: &Styles) {
    let Some(preset) = ctx
        .presets
        .get(ctx.state.selected_layout)
        .or_else(|| ctx.presets.first())
    else {
        return;
    };

    let columns: Vec<&[PanelKind]> = [preset.left.as_slice(), preset.right.as_slice()]
        .into_iter()
        .filter(|c| !c.is_empty())
        .collect();
    let areas = if columns.len() == 2 {
        Layout::horizontal([Constraint::Ratio(2, 5), Constraint::Ratio(3, 5)]).split(area)
    } else {
        Layout::horizontal([Constraint::Min(0)]).split(area)
    };

    for (kinds, column) in columns.iter().zip(areas.iter()) {
        let total: u32 = kinds.iter().map(|&k| panel_weight(k)).sum();
        let rows = Layout::vertical(
            kinds
                .iter()
                .map(|&k| Constraint::Ratio(panel_weight(k), total)),
        )
        .split(*column);
        for (&kind, rect) in kinds.iter().zip(rows.iter()) {
            let panel = compose_panel(
                kind,
                ctx.enriched,
                ctx.state,
                ctx.settings,
                rect.width,
                rect.height,
            );
            draw_panel(frame, *rect, &panel, styles, ctx.rounded);
        }
    }
}

fn bordered<'a>(border: Style, rounded: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(if rounded {
            BorderType::Rounded
        } else {
            BorderType::Plain
        })
        .border_style(border)
}

fn draw_panel(frame: &mut Frame, area: Rect, panel: &PanelView, styles: &Styles, rounded: bool) {
    let mut block = bordered(styles.paint(panel.border), rounded).title(Span::styled(
        format!(" {} ", panel.title),
        styles
            .paint(panel.title_paint)
            .add_modifier(Modifier::BOLD),
    ));
    if let Some(subtitle) = &panel.subtitle {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", subtitle),
            styles.role(Role::Text),
        )));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if panel.graphs.is_empty() {
        draw_sections(frame, inner, &panel.sections, styles);
        return;
    }
    let halves =
        Layout::horizontal([Constraint::Ratio(2, 5), Constraint::Ratio(3, 5)]).split(inner);
    draw_sections(frame, halves[0], &panel.sections, styles);
    let slots = Layout::vertical(panel.graphs.iter().map(|_| Constraint::Fill(1))).split(halves[1]);
    for (graph, slot) in panel.graphs.iter().zip(slots.iter()) {
        draw_graph(frame, *slot, graph, styles, rounded);
    }
}

fn section_height(section: &Section) -> u16 {
    let rows = match section {
        Section::Table(table) => table.rows.len() + usize::from(table.show_header),
        Section::Lines(lines) => lines.len(),
    };
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_sections(frame: &mut Frame, area: Rect, sections: &[Section], styles: &Styles) {
    let constraints = sections.iter().enumerate().map(|(i, s)| {
        if i + 1 == sections.len() {
            Constraint::Min(0)
        } else {
            Constraint::Length(section_height(s))
        }
    });
    let areas = Layout::vertical(constraints).split(area);
    for (section, rect) in sections.iter().zip(areas.iter()) {
        match section {
            Section::Table(table) => draw_table(frame, *rect, table, styles),
            Section::Lines(lines) => {
                let lines: Vec<Line> = lines.iter().map(|l| styled_line(l, styles)).collect();
                frame.render_widget(Paragraph::new(lines), *rect);
            }
        }
    }
}

fn draw_table(frame: &mut Frame, area: Rect, table: &TableView, styles: &Styles) {
    let constraints: Vec<Constraint> = table
        .columns
        .iter()
        .map(|c| match c.width {
            Width::Fixed(n) => Constraint::Length(n),
            Width::Fill(n) => Constraint::Fill(n),
        })
        .collect();
    // Column widths as the table will lay them out, for sizing gauges.
    let widths = Layout::horizontal(constraints.clone())
        .spacing(1)
        .split(Rect::new(0, 0, area.width, 1));

    let rows = table.rows.iter().map(|row| {
        Row::new(row.cells.iter().enumerate().map(|(i, cell)| {
            let align = table.columns.get(i).map_or(Align::Left, |c| c.align);
            let width = widths.get(i).map_or(0, |r| r.width);
            Cell::from(table_cell(cell, align, width, styles))
        }))
    });
    let mut widget = Table::new(rows, constraints).column_spacing(1);
    if table.show_header {
        let header = Row::new(table.columns.iter().map(|c| {
            Cell::from(Line::from(c.header.clone()).alignment(alignment(c.align)))
        }))
        .style(styles.role(Role::Title).add_modifier(Modifier::BOLD));
        widget = widget.header(header);
    }
    frame.render_widget(widget, area);
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}

/// Text gauge `width` cells wide.
pub fn bar_text(fraction: f64, width: u16) -> String {
    let width = usize::from(width);
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(BAR_FILLED, filled));
    bar.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    bar
}

fn table_cell<'a>(cell: &ViewCell, align: Align, width: u16, styles: &Styles) -> Line<'a> {
    let text = match &cell.content {
        CellContent::Text(text) => text.clone(),
        CellContent::Bar { fraction } => bar_text(*fraction, width),
    };
    Line::from(Span::styled(text, styles.cell(cell))).alignment(alignment(align))
}

fn styled_line<'a>(line: &ViewLine, styles: &Styles) -> Line<'a> {
    Line::from(
        line.spans
            .iter()
            .map(|cell| Span::styled(cell.text().to_string(), styles.cell(cell)))
            .collect::<Vec<_>>(),
    )
}

fn draw_graph(frame: &mut Frame, area: Rect, graph: &GraphView, styles: &Styles, rounded: bool) {
    let mut block = bordered(styles.role(Role::Border), rounded);
    if let Some(title) = &graph.title {
        block = block.title(Span::styled(format!(" {} ", title), styles.role(Role::Title)));
    }
    let lines: Vec<Line> = graph.rows.iter().map(|r| Line::from(r.clone())).collect();
    frame.render_widget(
        Paragraph::new(lines).style(styles.paint(graph.paint)).block(block),
        area,
    );
}

/// Rect of `percent_x` x `percent_y` centered in `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
