use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use edgescroll::Direction;

use crate::app::App;
use super::theme::*;

/// Rows taken by the list border and the status line.
const CHROME_ROWS: u16 = 3;

/// Rows available to list items for a terminal of the given height.
pub fn list_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS) as usize
}

pub fn render(frame: &mut Frame, app: &App, tick: usize) {
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Min(0),    // List
        Constraint::Length(1), // Status
    ])
    .split(area);

    render_list(frame, layout[0], app, tick);
    render_status(frame, layout[1], app);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App, tick: usize) {
    let loading = app.trigger.is_loading();
    let title = match (app.direction(), loading) {
        (Direction::Top, true) => format!(" {} loading older ", SPINNER[tick % SPINNER.len()]),
        (Direction::Bottom, true) => format!(" {} loading more ", SPINNER[tick % SPINNER.len()]),
        (_, false) => " feed ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(if loading { LOADING } else { ACCENT }))
        .title(Span::styled(title, Style::new().fg(TEXT_WHITE).bold()));

    let lines: Vec<Line> = app
        .items
        .iter()
        .skip(app.scroll)
        .take(app.viewport)
        .map(|item| Line::styled(item.as_str(), Style::new().fg(TEXT_WHITE)))
        .collect();

    let content = if lines.is_empty() {
        vec![Line::styled("  waiting for first page", Style::new().fg(TEXT_DIM))]
    } else {
        lines
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (state, color) = if app.trigger.is_loading() {
        ("loading", LOADING)
    } else {
        ("idle", IDLE)
    };

    let token = app
        .last_request()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut spans = vec![
        Span::styled(format!(" {} ", state), Style::new().fg(color).bold()),
        Span::styled(
            format!(
                " edge {}  offset {}  timeout {}ms  row {}/{}  request {} ",
                app.direction(),
                app.trigger.offset(),
                app.trigger.timeout().as_millis(),
                app.scroll,
                app.items.len(),
                token,
            ),
            Style::new().fg(TEXT_DIM),
        ),
    ];

    if app.timeouts > 0 {
        spans.push(Span::styled(
            format!(" timeouts {} ", app.timeouts),
            Style::new().fg(TIMEOUT),
        ));
    }

    spans.push(Span::styled(" q quit", Style::new().fg(TEXT_DIM)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
