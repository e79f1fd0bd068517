//! Application state definitions

use super::models::Address;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Interests,
    Institutions,
    AddressRegister,
    CargoRegister,
}

impl View {
    /// Form views are skipped when going back through history
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::AddressRegister | View::CargoRegister)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Interests => "Interesses",
            View::Institutions => "Instituições",
            View::AddressRegister => "Endereço da instituição",
            View::CargoRegister => "Cargo",
        }
    }
}

/// View parameters for navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub institution_id: Option<String>,
    pub address: Option<Address>,
}

/// Severity of a blocking alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// A blocking alert dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_params: ViewParams,
    pub view_history: Vec<(View, ViewParams)>,

    // Alerts shown one at a time, oldest first
    alerts: VecDeque<Alert>,

    // Transient status line text
    pub status_message: Option<String>,
}

impl AppState {
    pub fn push_alert(&mut self, alert: Alert) {
        self.alerts.push_back(alert);
    }

    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    /// Move to `view`, remembering where we came from
    pub fn navigate(&mut self, view: View, params: ViewParams) {
        self.view_history.push((
            std::mem::take(&mut self.current_view),
            std::mem::take(&mut self.view_params),
        ));
        self.current_view = view;
        self.view_params = params;
    }

    /// Go back to the last non-form view. Returns false when history is exhausted.
    pub fn go_back(&mut self) -> bool {
        while let Some((view, params)) = self.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.current_view = view;
            self.view_params = params;
            return true;
        }
        false
    }

    /// Jump to a root view, dropping history
    pub fn reset_to(&mut self, view: View) {
        self.view_history.clear();
        self.current_view = view;
        self.view_params = ViewParams::default();
    }
}
