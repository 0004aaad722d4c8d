//! UI widgets for the dashboard

pub mod stats;
pub mod trove;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::App;

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_main(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let stale = app.is_stale();
    let status = if stale { "Stale (source unreachable)" } else { "Live" };
    let status_color = if stale { Color::Yellow } else { Color::Green };

    let block = match app.block_tag() {
        Some(tag) => format!(" | Block: {}", tag),
        None => String::new(),
    };
    let header_text = format!(
        " Status: {} | Snapshot: v{}{}",
        status,
        app.store_version(),
        block
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL).title(" Liquity statistics "));

    frame.render_widget(header, area);
}

fn draw_main(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Statistics
            Constraint::Percentage(45), // Trove
        ])
        .split(area);

    stats::draw(frame, app, chunks[0]);
    trove::draw(frame, app, chunks[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer_text = match app.status_message.as_deref() {
        Some(status) if !status.is_empty() => format!(" {}", status),
        _ => " q=quit j/k=nav tab=focus b=balances enter=action".to_string(),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
