//! Address step of the registration flow

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::screens::{AddressFocus, AddressRegisterScreen, NEIGHBORHOOD};
use crate::state::CascadePhase;
use crate::ui::components::{render_button, render_dropdown, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, screen: &AddressRegisterScreen) {
    let block = Block::default()
        .title(" Endereço da instituição ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // State
            Constraint::Length(3),             // City
            Constraint::Length(FIELD_HEIGHT),  // Neighborhood
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let cascade = &screen.cascade;
    let city_placeholder = match cascade.phase() {
        CascadePhase::Idle => "Aguardando estados",
        CascadePhase::RegionsLoaded if cascade.selected_region().is_none() => {
            "Selecione o estado primeiro"
        }
        CascadePhase::RegionsLoaded if !screen.can_submit() => "Carregando cidades...",
        _ => "Selecione a cidade",
    };
    render_dropdown(
        frame,
        chunks[0],
        "Estado",
        cascade.selected_region(),
        "Selecione o estado",
        cascade.regions().len(),
        screen.focus == AddressFocus::Region,
    );
    render_dropdown(
        frame,
        chunks[1],
        "Cidade",
        cascade.selected_sub_region(),
        city_placeholder,
        cascade.sub_regions().len(),
        screen.focus == AddressFocus::SubRegion,
    );

    if let Some(field) = screen.registry.field(NEIGHBORHOOD) {
        draw_field(frame, chunks[2], field);
    }

    let button_area = Rect {
        width: chunks[3].width.min(20),
        ..chunks[3]
    };
    render_button(
        frame,
        button_area,
        "Próximo",
        screen.focus == AddressFocus::Submit,
        screen.can_submit(),
    );
}
