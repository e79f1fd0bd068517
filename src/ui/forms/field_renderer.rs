//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows a text field takes: the bordered input plus one line for its error
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a text input with its label, focus cursor and inline validation error
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_color = if field.is_errored() {
        Color::Red
    } else if field.is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let value = if field.current_value.is_empty() && !field.is_focused {
        Span::styled(field.label.clone(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(field.current_value.clone())
    };
    let cursor = if field.is_focused { "▌" } else { "" };

    let input = Paragraph::new(Line::from(vec![
        value,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(format!(" {} ", field.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, chunks[0]);

    if let Some(error) = &field.error {
        let error_line = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error_line, chunks[1]);
    }
}
