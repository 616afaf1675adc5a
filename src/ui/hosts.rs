//! Hosts view rendering.
//!
//! Displays every host in the latest report with its status, marker and
//! position, including hosts that are not drawn on the map.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::HostState;
use crate::source::HostReport;

/// Column to sort by in the Hosts view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Name,
    /// Down hosts before up hosts, invalid statuses last.
    Status,
}

impl SortColumn {
    pub fn next(self) -> Self {
        match self {
            SortColumn::Name => SortColumn::Status,
            SortColumn::Status => SortColumn::Name,
        }
    }
}

fn status_rank(host: &HostReport) -> u8 {
    match host.status.parse::<HostState>() {
        Ok(HostState::Down) => 0,
        Ok(HostState::Up) => 1,
        Err(_) => 2,
    }
}

/// Sort hosts by the given column; ties are broken by name.
pub fn sort_hosts_by(hosts: &mut [&HostReport], column: SortColumn, ascending: bool) {
    hosts.sort_by(|a, b| {
        let ordering = match column {
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Status => status_rank(a)
                .cmp(&status_rank(b))
                .then_with(|| a.name.cmp(&b.name)),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn format_header(label: &str, column: SortColumn, app: &App) -> String {
    if app.sort_column == column {
        let arrow = if app.sort_ascending { "▲" } else { "▼" };
        format!("{} {}", label, arrow)
    } else {
        label.to_string()
    }
}

/// Render the Hosts view as a sortable, filterable table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from(format_header("Host", SortColumn::Name, app)),
        Cell::from(format_header("Status", SortColumn::Status, app)),
        Cell::from("Position"),
        Cell::from("Icon"),
    ])
    .height(1)
    .style(app.theme.header);

    let markers = app.dashboard.markers();
    let rows: Vec<Row> = app
        .visible_hosts()
        .into_iter()
        .map(|host| {
            let (glyph, icon, style) = match host.status.parse::<HostState>() {
                Ok(state) => {
                    let asset = markers.select(state);
                    (
                        asset.glyph.to_string(),
                        asset.icon.clone(),
                        app.theme.marker_style(state),
                    )
                }
                Err(_) => ("?".to_string(), "-".to_string(), app.theme.invalid_style()),
            };
            let position = host
                .position
                .map(|p| format!("{:.4}, {:.4}", p.latitude, p.longitude))
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(glyph).style(style),
                Cell::from(host.name.clone()),
                Cell::from(host.status.clone()).style(style),
                Cell::from(position),
                Cell::from(icon),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Fill(3),
        Constraint::Length(9),
        Constraint::Fill(2),
        Constraint::Fill(2),
    ];

    let title = if app.filter_text.is_empty() {
        " Hosts ".to_string()
    } else {
        format!(" Hosts (filter: {}) ", app.filter_text)
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(app.theme.decoration_style(app.display.decoration)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if app.dashboard.snapshot().is_some() {
        state.select(Some(app.selected_host_index));
    }

    frame.render_stateful_widget(table, area, &mut state);

    if app.dashboard.hosts().is_empty() {
        let empty = ratatui::widgets::Paragraph::new(" No hosts reported ")
            .style(Style::default().fg(app.theme.highlight));
        let inner = Rect::new(area.x + 2, area.y + 2, area.width.saturating_sub(4), 1);
        frame.render_widget(empty, inner);
    }
}
