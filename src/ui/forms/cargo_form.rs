//! Cargo step of the registration flow

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::screens::{CargoFocus, CargoRegisterScreen, CARGO};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, screen: &CargoRegisterScreen) {
    let block = Block::default()
        .title(" Cargo ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Destination summary
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),  // Cargo
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let address = &screen.address;
    let summary = Paragraph::new(Line::from(vec![
        Span::styled("Destino: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
            "{}, {} - {}",
            address.neighborhood, address.city, address.state
        )),
    ]));
    frame.render_widget(summary, chunks[0]);

    if let Some(field) = screen.registry.field(CARGO) {
        draw_field(frame, chunks[2], field);
    }

    let label = if screen.can_submit() {
        "Cadastrar"
    } else {
        "Cadastrando..."
    };
    let button_area = Rect {
        width: chunks[3].width.min(20),
        ..chunks[3]
    };
    render_button(
        frame,
        button_area,
        label,
        screen.focus == CargoFocus::Submit,
        screen.can_submit(),
    );
}
