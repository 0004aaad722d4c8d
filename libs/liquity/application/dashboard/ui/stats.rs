//! Statistics panel

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::application::dashboard::{App, Focus};
use crate::domain::{Emphasis, Statistic};

const NAME_WIDTH: usize = 24;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(area);

    draw_rows(frame, app, chunks[0]);
    draw_tooltip(frame, app, chunks[1]);
}

fn draw_rows(frame: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();
    let mut index = 0;

    let sections = [
        ("My Account Balances", &app.stats.balances),
        ("Protocol", &app.stats.protocol),
        ("Frontend", &app.stats.frontend),
    ];

    for (title, rows) in sections {
        if rows.is_empty() {
            continue;
        }
        items.push(ListItem::new(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))));
        for stat in rows.iter() {
            let selected = app.focus == Focus::Statistics && index == app.selected_stat;
            items.push(ListItem::new(stat_line(stat, selected)));
            index += 1;
        }
    }

    let border_style = if app.focus == Focus::Statistics {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Statistics "),
    );

    frame.render_stateful_widget(list, area, &mut ListState::default());
}

fn stat_line(stat: &Statistic, selected: bool) -> Line<'static> {
    let name_style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = match stat.emphasis {
        Emphasis::Danger => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Emphasis::Normal => Style::default().fg(Color::White),
    };

    let mut spans = vec![
        Span::styled(format!(" {:<width$}", stat.name, width = NAME_WIDTH), name_style),
        Span::styled(stat.value.clone(), value_style),
    ];
    if let Some(detail) = &stat.detail {
        spans.push(Span::styled(format!(" {}", detail), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn draw_tooltip(frame: &mut Frame, app: &App, area: Rect) {
    let text = app
        .selected_statistic()
        .and_then(|s| s.tooltip)
        .unwrap_or("");

    let tooltip = Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::ITALIC))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" About "));

    frame.render_widget(tooltip, area);
}
