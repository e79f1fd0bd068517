//! Blocking alert dialog

use super::base::{render_dialog, DialogConfig};
use crate::state::{Alert, AlertKind};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render an alert overlay centered on the screen
pub fn render_alert_dialog(frame: &mut Frame, alert: &Alert) {
    let color = match alert.kind {
        AlertKind::Info => Color::Green,
        AlertKind::Error => Color::Red,
    };

    let hint = vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" OK"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: &alert.title,
            title_color: color,
            border_color: color,
            message: &alert.message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
