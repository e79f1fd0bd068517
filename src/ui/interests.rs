//! Interest list view

use super::widgets::render_scrollable_list;
use crate::screens::InterestListScreen;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub const EMPTY_MESSAGE: &str = "Você não possui nenhum interesse!";

pub fn draw(frame: &mut Frame, area: Rect, screen: &InterestListScreen) {
    let block = Block::default()
        .title(" Meus interesses ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let header = Paragraph::new(Span::styled(
        format!(" Interesses: {}", screen.data.len()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(header, chunks[0]);

    if screen.data.is_empty() {
        let empty = Paragraph::new(format!(" {EMPTY_MESSAGE}"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = screen
        .data
        .iter()
        .enumerate()
        .map(|(idx, interest)| {
            let is_selected = idx == screen.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(
                        interest.institution.name.clone(),
                        style.fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", interest.destination_label()),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    render_scrollable_list(frame, chunks[1], List::new(items), screen.selected_index);
}
