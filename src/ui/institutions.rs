//! Institution picker view

use super::widgets::render_scrollable_list;
use crate::screens::InstitutionListScreen;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, screen: &InstitutionListScreen, loading: bool) {
    let block = Block::default()
        .title(" Escolha a instituição ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if screen.institutions.is_empty() {
        let text = if loading {
            "Carregando..."
        } else {
            "Nenhuma instituição encontrada."
        };
        let content = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = screen
        .institutions
        .iter()
        .enumerate()
        .map(|(idx, institution)| {
            let is_selected = idx == screen.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(institution.name.clone(), style),
            ]))
        })
        .collect();

    render_scrollable_list(frame, area, List::new(items).block(block), screen.selected_index);
}
