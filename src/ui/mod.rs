//! UI module for rendering the TUI

mod components;
mod forms;
mod institutions;
mod interests;
mod layout;
mod widgets;

use crate::app::App;
use crate::screens::Screen;
use components::{render_alert_dialog, render_confirm_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match &app.screen {
        Screen::Interests(screen) => {
            interests::draw(frame, main_area, screen);
            if let Some(pending) = &screen.pending_delete {
                render_confirm_dialog(frame, pending);
            }
        }
        Screen::Institutions(screen) => {
            institutions::draw(frame, main_area, screen, app.is_loading())
        }
        Screen::AddressRegister(screen) => forms::draw_address_form(frame, main_area, screen),
        Screen::CargoRegister(screen) => forms::draw_cargo_form(frame, main_area, screen),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Alerts sit above everything else
    if let Some(alert) = app.state.current_alert() {
        render_alert_dialog(frame, alert);
    }
}
