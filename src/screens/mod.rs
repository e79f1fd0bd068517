//! Per-view controllers
//!
//! A controller is mounted when its view becomes current and stopped when the
//! view is left. Requests run as spawned tasks bound to the mount; stopping
//! cancels them and any result that still slips through carries a stale mount
//! id and is dropped by the app.

mod address_register;
mod cargo_register;
mod institution_list;
mod interest_list;

pub use address_register::{AddressFocus, AddressRegisterScreen, NEIGHBORHOOD};
pub use cargo_register::{CargoFocus, CargoRegisterScreen, CARGO};
pub use institution_list::InstitutionListScreen;
pub use interest_list::{InterestListScreen, PendingDelete};

use crate::api::{ApiError, GeographyApi, InterestApi};
use crate::event::{AppEvent, ScreenEvent};
use crate::state::{Alert, View, ViewParams};
use crate::storage::Session;
use crossterm::event::KeyEvent;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Generic message for failed remote calls
pub const GENERIC_ERROR_TITLE: &str = "Erro";
pub const GENERIC_ERROR_MESSAGE: &str = "Ocorreu um erro ao carregar os dados, tente novamente.";

/// Dependencies every screen receives instead of reaching for globals
#[derive(Clone)]
pub struct ScreenContext {
    pub api: Arc<dyn InterestApi>,
    pub geography: Arc<dyn GeographyApi>,
    pub session: Session,
}

impl ScreenContext {
    /// Token for authenticated calls
    pub fn token(&self) -> Result<String, ApiError> {
        self.session
            .token()
            .map(str::to_string)
            .ok_or(ApiError::MissingToken)
    }
}

/// Handle tying background work to one mounted screen
#[derive(Debug, Clone)]
pub struct Mount {
    id: u64,
    cancel: CancellationToken,
    events: UnboundedSender<AppEvent>,
}

impl Mount {
    pub fn new(id: u64, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            id,
            cancel: CancellationToken::new(),
            events,
        }
    }

    /// Run `request` in the background and report its result unless the mount is cancelled first
    pub fn spawn<F>(&self, request: F)
    where
        F: Future<Output = ScreenEvent> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        let events = self.events.clone();
        let mount_id = self.id;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(mount_id, "screen stopped, dropping in-flight request");
                }
                event = request => {
                    if events.send(AppEvent { mount_id, event }).is_err() {
                        tracing::debug!(mount_id, "event loop gone, dropping result");
                    }
                }
            }
        });
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

/// Count of requests in flight; the screen is loading while any is pending
#[derive(Debug, Clone, Copy, Default)]
pub struct Loading(u32);

impl Loading {
    pub fn begin(&mut self) {
        self.0 += 1;
    }

    pub fn end(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.0 > 0
    }
}

/// Where the app should go after a controller handled input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Navigate(View, ViewParams),
    Back,
    /// Jump to a root view, dropping history
    Reset(View),
    Quit,
}

/// What a controller asks of the app after handling a key or an event
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub transition: Option<Transition>,
    pub alert: Option<Alert>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn navigate(view: View, params: ViewParams) -> Self {
        Self::transition(Transition::Navigate(view, params))
    }

    pub fn back() -> Self {
        Self::transition(Transition::Back)
    }

    pub fn transition(transition: Transition) -> Self {
        Self {
            transition: Some(transition),
            alert: None,
        }
    }

    pub fn alert(alert: Alert) -> Self {
        Self {
            transition: None,
            alert: Some(alert),
        }
    }

    pub fn with_alert(mut self, alert: Alert) -> Self {
        self.alert = Some(alert);
        self
    }
}

/// Log a failed request and build the alert the user sees
pub fn network_failure(context: &str, err: &ApiError, title: &str, message: &str) -> Alert {
    tracing::error!(error = %err, "{context}");
    Alert::error(title, message)
}

/// Lifecycle and input handling shared by all screens
pub trait ScreenController {
    /// Called once the view becomes current; a failure to start is reported as an alert
    fn start(&mut self, mount: Mount) -> Outcome;

    /// Called when the view is left; cancels in-flight work
    fn stop(&mut self);

    fn handle_key(&mut self, key: KeyEvent) -> Outcome;

    fn handle_event(&mut self, event: ScreenEvent) -> Outcome;

    fn is_loading(&self) -> bool;
}

/// The controller of the current view
pub enum Screen {
    Interests(InterestListScreen),
    Institutions(InstitutionListScreen),
    AddressRegister(AddressRegisterScreen),
    CargoRegister(CargoRegisterScreen),
}

impl Screen {
    /// Build the controller for `view` from its navigation params
    pub fn for_view(view: &View, params: &ViewParams, ctx: &ScreenContext) -> Self {
        match view {
            View::Interests => Screen::Interests(InterestListScreen::new(ctx.clone())),
            View::Institutions => Screen::Institutions(InstitutionListScreen::new(ctx.clone())),
            View::AddressRegister => Screen::AddressRegister(AddressRegisterScreen::new(
                ctx.clone(),
                params.institution_id.clone().unwrap_or_default(),
            )),
            View::CargoRegister => Screen::CargoRegister(CargoRegisterScreen::new(
                ctx.clone(),
                params.institution_id.clone().unwrap_or_default(),
                params.address.clone().unwrap_or_default(),
            )),
        }
    }

    fn controller(&mut self) -> &mut dyn ScreenController {
        match self {
            Screen::Interests(s) => s,
            Screen::Institutions(s) => s,
            Screen::AddressRegister(s) => s,
            Screen::CargoRegister(s) => s,
        }
    }

    pub fn start(&mut self, mount: Mount) -> Outcome {
        self.controller().start(mount)
    }

    pub fn stop(&mut self) {
        self.controller().stop();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        self.controller().handle_key(key)
    }

    pub fn handle_event(&mut self, event: ScreenEvent) -> Outcome {
        self.controller().handle_event(event)
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Screen::Interests(s) => s.is_loading(),
            Screen::Institutions(s) => s.is_loading(),
            Screen::AddressRegister(s) => s.is_loading(),
            Screen::CargoRegister(s) => s.is_loading(),
        }
    }
}
