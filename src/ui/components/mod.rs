//! Reusable UI components

mod button;
mod dialog;
mod dropdown;

pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::{render_alert_dialog, render_confirm_dialog};
pub use dropdown::render_dropdown;
