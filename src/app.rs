//! Application state and core logic

use crate::event::AppEvent;
use crate::screens::{Mount, Outcome, Screen, ScreenContext, Transition};
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Navigation, alerts and status line
    pub state: AppState,
    /// Controller of the current view
    pub screen: Screen,
    ctx: ScreenContext,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Id of the currently mounted screen; events for any other id are stale
    mount_id: u64,
    quit: bool,
}

impl App {
    /// Create the app and mount the home view. Must run inside a tokio runtime.
    pub fn new(ctx: ScreenContext) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let state = AppState::default();
        let screen = Screen::for_view(&state.current_view, &state.view_params, &ctx);
        let mut app = Self {
            state,
            screen,
            ctx,
            events_tx,
            events_rx,
            mount_id: 0,
            quit: false,
        };
        app.mount_screen();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_loading(&self) -> bool {
        self.screen.is_loading()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Alerts are modal
        if self.state.has_alerts() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_alert();
            }
            return;
        }

        self.state.status_message = None;
        let outcome = self.screen.handle_key(key);
        self.apply(outcome);
    }

    /// Feed a finished request back to the screen that issued it
    pub fn handle_app_event(&mut self, event: AppEvent) {
        if event.mount_id != self.mount_id {
            tracing::debug!(
                mount_id = event.mount_id,
                current = self.mount_id,
                "dropping event for unmounted screen"
            );
            return;
        }
        let outcome = self.screen.handle_event(event.event);
        self.apply(outcome);
    }

    /// Handle every event already waiting in the channel without blocking
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        if let Some(transition) = outcome.transition {
            self.transition(transition);
        }
        if let Some(alert) = outcome.alert {
            self.state.push_alert(alert);
        }
    }

    fn transition(&mut self, transition: Transition) {
        match transition {
            Transition::Navigate(view, params) => {
                self.state.navigate(view, params);
                self.remount();
            }
            Transition::Back => {
                if self.state.go_back() {
                    self.remount();
                }
            }
            Transition::Reset(view) => {
                self.state.reset_to(view);
                self.remount();
            }
            Transition::Quit => {
                self.screen.stop();
                self.quit = true;
            }
        }
    }

    /// Stop the current screen and mount a fresh one for the current view
    fn remount(&mut self) {
        self.screen.stop();
        self.screen = Screen::for_view(
            &self.state.current_view,
            &self.state.view_params,
            &self.ctx,
        );
        self.mount_screen();
    }

    fn mount_screen(&mut self) {
        self.mount_id += 1;
        tracing::debug!(view = ?self.state.current_view, mount_id = self.mount_id, "mounting screen");
        let outcome = self
            .screen
            .start(Mount::new(self.mount_id, self.events_tx.clone()));
        self.apply(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockGeographyApi, MockInterestApi};
    use crate::event::ScreenEvent;
    use crate::screens::test_support::{context, ctrl, key};
    use crate::screens::GENERIC_ERROR_TITLE;
    use crate::storage::Session;
    use crate::state::{
        Alert, DestinationAddress, Institution, InstitutionRef, InterestRecord, View,
    };
    use pretty_assertions::assert_eq;

    fn interest(id: &str) -> InterestRecord {
        InterestRecord {
            id: id.to_string(),
            institution: InstitutionRef {
                name: "UFSCar".to_string(),
            },
            destination_address: DestinationAddress {
                city: "Campinas".to_string(),
                state: "SP".to_string(),
            },
        }
    }

    fn api() -> MockInterestApi {
        let mut api = MockInterestApi::new();
        api.expect_list_interests()
            .returning(|_| Ok(vec![interest("1"), interest("2")]));
        api.expect_list_institutions().returning(|_| {
            Ok(vec![Institution {
                id: "9".to_string(),
                name: "UFSCar".to_string(),
            }])
        });
        api
    }

    /// Feed events until one for the current screen has been handled
    async fn settle(app: &mut App) {
        while let Some(event) = app.events_rx.recv().await {
            let current = event.mount_id == app.mount_id;
            app.handle_app_event(event);
            if current {
                break;
            }
        }
    }

    fn interest_count(app: &App) -> Option<usize> {
        match &app.screen {
            Screen::Interests(screen) => Some(screen.data.len()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_starts_on_interests_and_loads() {
        let mut app = App::new(context(api(), MockGeographyApi::new()));
        assert_eq!(app.state.current_view, View::Interests);
        assert!(app.is_loading());

        settle(&mut app).await;
        assert_eq!(interest_count(&app), Some(2));
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_navigate_and_back_remounts() {
        let mut app = App::new(context(api(), MockGeographyApi::new()));
        settle(&mut app).await;

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state.current_view, View::Institutions);
        settle(&mut app).await;
        match &app.screen {
            Screen::Institutions(screen) => assert_eq!(screen.institutions.len(), 1),
            _ => panic!("expected institutions screen"),
        }

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state.current_view, View::Interests);
        // Remounting the list re-fetches it
        assert!(app.is_loading());
        settle(&mut app).await;
        assert_eq!(interest_count(&app), Some(2));
    }

    #[tokio::test]
    async fn test_stale_event_is_dropped() {
        let mut app = App::new(context(api(), MockGeographyApi::new()));
        settle(&mut app).await;

        app.handle_app_event(AppEvent {
            mount_id: app.mount_id - 1,
            event: ScreenEvent::InterestsLoaded(Ok(Vec::new())),
        });
        assert_eq!(interest_count(&app), Some(2));
    }

    #[tokio::test]
    async fn test_alert_is_modal() {
        let mut app = App::new(context(api(), MockGeographyApi::new()));
        settle(&mut app).await;
        app.state.push_alert(Alert::info("Sucesso", "ok"));

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state.current_view, View::Interests);

        app.handle_key(key(KeyCode::Enter));
        assert!(!app.state.has_alerts());
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state.current_view, View::Institutions);
    }

    #[tokio::test]
    async fn test_mounting_without_token_queues_alert() {
        let mut ctx = context(MockInterestApi::new(), MockGeographyApi::new());
        ctx.session = Session::default();
        let mut app = App::new(ctx);
        assert_eq!(
            app.state.current_alert().map(|a| a.title.as_str()),
            Some(GENERIC_ERROR_TITLE)
        );

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state.current_view, View::Institutions);
        assert!(app.state.has_alerts());
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_quit_from_home() {
        let mut app = App::new(context(api(), MockGeographyApi::new()));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_reset_clears_history_and_shows_alert() {
        let mut app = App::new(context(api(), MockGeographyApi::new()));
        app.handle_key(key(KeyCode::Char('n')));
        app.apply(
            Outcome::transition(Transition::Reset(View::Interests))
                .with_alert(Alert::info("Sucesso", "Interesse cadastrado!")),
        );

        assert_eq!(app.state.current_view, View::Interests);
        assert!(app.state.view_history.is_empty());
        assert_eq!(
            app.state.current_alert().map(|a| a.message.as_str()),
            Some("Interesse cadastrado!")
        );
        settle(&mut app).await;
        assert_eq!(interest_count(&app), Some(2));
    }

    #[tokio::test]
    async fn test_drain_events_handles_ready_results() {
        let mut app = App::new(context(api(), MockGeographyApi::new()));
        app.events_tx
            .send(AppEvent {
                mount_id: app.mount_id,
                event: ScreenEvent::InterestsLoaded(Ok(vec![interest("7")])),
            })
            .unwrap();

        app.drain_events();
        assert_eq!(interest_count(&app), Some(1));
        app.handle_key(ctrl('x'));
        assert!(!app.should_quit());
    }
}
