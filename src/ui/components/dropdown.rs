//! Single-line selector cycled with the arrow keys

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render a dropdown showing the current choice, or `placeholder` when nothing is chosen.
///
/// A dropdown with no options is drawn disabled.
pub fn render_dropdown(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    selected: Option<&str>,
    placeholder: &str,
    option_count: usize,
    is_active: bool,
) {
    let is_enabled = option_count > 0;
    let accent = if is_active && is_enabled {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let value = match selected {
        Some(value) => Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
    };

    let mut spans = Vec::with_capacity(3);
    if is_active && is_enabled {
        spans.push(Span::styled("◂ ", Style::default().fg(accent)));
        spans.push(value);
        spans.push(Span::styled(" ▸", Style::default().fg(accent)));
    } else {
        spans.push(value);
    }

    let title = if is_enabled {
        format!(" {label} ({option_count}) ")
    } else {
        format!(" {label} ")
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
