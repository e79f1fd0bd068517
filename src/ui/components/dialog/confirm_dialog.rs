//! Confirmation dialog for removing an interest

use super::base::centered;
use crate::screens::PendingDelete;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the Cancelar/Remover dialog for a pending delete
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let dialog_area = centered(frame.area(), 52, 11);
    frame.render_widget(Clear, dialog_area);

    let max_display_len = (dialog_area.width.saturating_sub(6)) as usize;
    let display_text = truncate_string(&pending.institution_name, max_display_len);

    let mut content = vec![
        Line::from(Span::styled(
            "Remover",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Tem certeza que quer remover o interesse em:",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(display_text, Style::default().fg(Color::Cyan))),
        Line::from(""),
    ];

    // Cancelar first so it is what Enter hits by default
    let options = [(false, "Cancelar", Color::White), (true, "Remover", Color::Red)];
    for (is_remove, label, color) in options {
        let is_selected = pending.selected_option == is_remove;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" escolher  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirmar  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancelar", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}

/// Truncate to `max_len` characters with an ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
