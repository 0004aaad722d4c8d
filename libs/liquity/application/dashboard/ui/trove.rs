//! Trove panel

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::dashboard::{App, Focus, TrovePanel};
use crate::application::liquidated_trove::HEADING;
use crate::application::theme::Breakpoint;
use crate::domain::TroveStatus;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Trove {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", HEADING));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let message = match &app.trove {
        TrovePanel::Liquidated(model) => vec![
            Line::styled(model.title, Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from(model.message),
        ],
        TrovePanel::Status(status) => vec![Line::from(status_text(*status))],
    };
    frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), chunks[0]);

    draw_button(frame, app, chunks[1]);
}

fn draw_button(frame: &mut Frame, app: &App, area: Rect) {
    let Some(action) = app.trove.action() else {
        return;
    };

    let breakpoint = Breakpoint::for_width(frame.area().width);
    let style = app.button_theme.style(app.button_state());
    let label = app.button_theme.padded_label(action.label(), breakpoint);

    let mut block = Block::default();
    if style.border.is_some() {
        block = block.borders(Borders::ALL).border_style(style.border_style());
    }

    let button = Paragraph::new(Line::styled(label, style.text_style())).block(block);
    frame.render_widget(button, area);
}

fn status_text(status: TroveStatus) -> &'static str {
    match status {
        TroveStatus::NonExistent => "You haven't borrowed any LUSD yet.",
        TroveStatus::Open => "Your Trove is open.",
        TroveStatus::ClosedByOwner => "Your Trove is closed.",
        TroveStatus::ClosedByLiquidation => "Your Trove has been liquidated.",
        TroveStatus::ClosedByRedemption => "Your Trove has been redeemed.",
    }
}
