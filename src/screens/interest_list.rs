//! Interest list with delete confirmation

use super::{
    network_failure, Loading, Mount, Outcome, ScreenContext, ScreenController, Transition,
    GENERIC_ERROR_MESSAGE, GENERIC_ERROR_TITLE,
};
use crate::event::ScreenEvent;
use crate::state::{Alert, InterestRecord, View, ViewParams};
use chrono::{DateTime, TimeDelta, Utc};
use crossterm::event::{KeyCode, KeyEvent};

/// Confirmation state for a delete the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub institution_name: String,
    /// false = Cancelar, true = Remover
    pub selected_option: bool,
}

pub struct InterestListScreen {
    ctx: ScreenContext,
    mount: Option<Mount>,
    pub data: Vec<InterestRecord>,
    pub selected_index: usize,
    /// Changing this triggers a re-fetch
    pub refresh: DateTime<Utc>,
    pub pending_delete: Option<PendingDelete>,
    loading: Loading,
}

impl InterestListScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            mount: None,
            data: Vec::new(),
            selected_index: 0,
            refresh: Utc::now(),
            pending_delete: None,
            loading: Loading::default(),
        }
    }

    pub fn selected(&self) -> Option<&InterestRecord> {
        self.data.get(self.selected_index)
    }

    fn load_interests(&mut self) -> Outcome {
        let Some(mount) = &self.mount else {
            return Outcome::none();
        };
        let token = match self.ctx.token() {
            Ok(token) => token,
            Err(err) => return Outcome::alert(load_failure(&err)),
        };
        self.loading.begin();
        let api = self.ctx.api.clone();
        mount.spawn(async move { ScreenEvent::InterestsLoaded(api.list_interests(&token).await) });
        Outcome::none()
    }

    /// Bump the refresh token; the list reloads when it changes
    fn set_refresh(&mut self, refresh: DateTime<Utc>) -> Outcome {
        if refresh == self.refresh {
            return Outcome::none();
        }
        self.refresh = refresh;
        self.load_interests()
    }

    /// A refresh token strictly newer than the current one
    fn next_refresh(&self) -> DateTime<Utc> {
        Utc::now().max(self.refresh + TimeDelta::nanoseconds(1))
    }

    /// First step of a delete: ask for confirmation
    pub fn request_delete(&mut self) {
        if let Some(item) = self.selected() {
            self.pending_delete = Some(PendingDelete {
                id: item.id.clone(),
                institution_name: item.institution.name.clone(),
                selected_option: false,
            });
        }
    }

    /// Second step: the user picked an option in the dialog
    fn resolve_delete(&mut self, confirmed: bool) -> Outcome {
        let Some(pending) = self.pending_delete.take() else {
            return Outcome::none();
        };
        if !confirmed {
            return Outcome::none();
        }
        let token = match self.ctx.token() {
            Ok(token) => token,
            Err(err) => return Outcome::alert(delete_failure(&err)),
        };
        let Some(mount) = &self.mount else {
            return Outcome::none();
        };
        self.loading.begin();
        let api = self.ctx.api.clone();
        let id = pending.id;
        mount.spawn(async move {
            let result = api.delete_interest(&token, &id).await;
            ScreenEvent::InterestDeleted { id, result }
        });
        Outcome::none()
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j') | KeyCode::Tab => {
                if let Some(pending) = &mut self.pending_delete {
                    pending.selected_option = !pending.selected_option;
                }
                Outcome::none()
            }
            KeyCode::Enter => {
                let confirmed = self
                    .pending_delete
                    .as_ref()
                    .is_some_and(|p| p.selected_option);
                self.resolve_delete(confirmed)
            }
            KeyCode::Char('y') => self.resolve_delete(true),
            KeyCode::Esc | KeyCode::Char('n') => self.resolve_delete(false),
            _ => Outcome::none(),
        }
    }
}

fn load_failure(err: &crate::api::ApiError) -> Alert {
    network_failure(
        "failed to load interests",
        err,
        GENERIC_ERROR_TITLE,
        GENERIC_ERROR_MESSAGE,
    )
}

fn delete_failure(err: &crate::api::ApiError) -> Alert {
    network_failure(
        "failed to remove interest",
        err,
        "Ops",
        "Ocorreu um problema ao tentar remover o interesse",
    )
}

impl ScreenController for InterestListScreen {
    fn start(&mut self, mount: Mount) -> Outcome {
        self.mount = Some(mount);
        self.load_interests()
    }

    fn stop(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.cancel();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if self.pending_delete.is_some() {
            return self.handle_confirm_key(key);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_index + 1 < self.data.len() {
                    self.selected_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            // Disabled while a request is in flight
            KeyCode::Char('d') | KeyCode::Delete if !self.loading.is_loading() => {
                self.request_delete()
            }
            KeyCode::Char('n') => {
                return Outcome::navigate(View::Institutions, ViewParams::default());
            }
            KeyCode::Char('r') => return self.set_refresh(self.next_refresh()),
            KeyCode::Char('q') => return Outcome::transition(Transition::Quit),
            _ => {}
        }
        Outcome::none()
    }

    fn handle_event(&mut self, event: ScreenEvent) -> Outcome {
        match event {
            ScreenEvent::InterestsLoaded(result) => {
                self.loading.end();
                match result {
                    Ok(data) => {
                        self.data = data;
                        if self.selected_index >= self.data.len() {
                            self.selected_index = self.data.len().saturating_sub(1);
                        }
                        Outcome::none()
                    }
                    // The list keeps whatever it had
                    Err(err) => Outcome::alert(load_failure(&err)),
                }
            }
            ScreenEvent::InterestDeleted { id, result } => {
                self.loading.end();
                match result {
                    Ok(()) => {
                        tracing::info!(%id, "interest removed");
                        let success = Alert::info("Sucesso", "O interesse foi removido!");
                        let reload = self.set_refresh(self.next_refresh());
                        Outcome::alert(reload.alert.unwrap_or(success))
                    }
                    Err(err) => Outcome::alert(delete_failure(&err)),
                }
            }
            other => {
                tracing::debug!(?other, "interest list ignoring event");
                Outcome::none()
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }
}
