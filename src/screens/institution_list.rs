//! Institution picker, first step of registering an interest

use super::{
    network_failure, Loading, Mount, Outcome, ScreenContext, ScreenController,
    GENERIC_ERROR_MESSAGE, GENERIC_ERROR_TITLE,
};
use crate::event::ScreenEvent;
use crate::state::{Institution, View, ViewParams};
use crossterm::event::{KeyCode, KeyEvent};

pub struct InstitutionListScreen {
    ctx: ScreenContext,
    mount: Option<Mount>,
    pub institutions: Vec<Institution>,
    pub selected_index: usize,
    loading: Loading,
}

impl InstitutionListScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            mount: None,
            institutions: Vec::new(),
            selected_index: 0,
            loading: Loading::default(),
        }
    }

    fn load_institutions(&mut self) -> Outcome {
        let Some(mount) = &self.mount else {
            return Outcome::none();
        };
        let token = match self.ctx.token() {
            Ok(token) => token,
            Err(err) => {
                return Outcome::alert(network_failure(
                    "cannot list institutions",
                    &err,
                    GENERIC_ERROR_TITLE,
                    GENERIC_ERROR_MESSAGE,
                ))
            }
        };
        self.loading.begin();
        let api = self.ctx.api.clone();
        mount.spawn(async move {
            ScreenEvent::InstitutionsLoaded(api.list_institutions(&token).await)
        });
        Outcome::none()
    }
}

impl ScreenController for InstitutionListScreen {
    fn start(&mut self, mount: Mount) -> Outcome {
        self.mount = Some(mount);
        self.load_institutions()
    }

    fn stop(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.cancel();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_index + 1 < self.institutions.len() {
                    self.selected_index += 1;
                }
                Outcome::none()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
                Outcome::none()
            }
            KeyCode::Char('r') if !self.loading.is_loading() => self.load_institutions(),
            KeyCode::Enter => match self.institutions.get(self.selected_index) {
                Some(institution) => Outcome::navigate(
                    View::AddressRegister,
                    ViewParams {
                        institution_id: Some(institution.id.clone()),
                        ..Default::default()
                    },
                ),
                None => Outcome::none(),
            },
            KeyCode::Esc | KeyCode::Backspace => Outcome::back(),
            _ => Outcome::none(),
        }
    }

    fn handle_event(&mut self, event: ScreenEvent) -> Outcome {
        match event {
            ScreenEvent::InstitutionsLoaded(result) => {
                self.loading.end();
                match result {
                    Ok(mut institutions) => {
                        institutions.sort_by(|a, b| a.name.cmp(&b.name));
                        self.institutions = institutions;
                        self.selected_index = 0;
                        Outcome::none()
                    }
                    Err(err) => Outcome::alert(network_failure(
                        "failed to load institutions",
                        &err,
                        GENERIC_ERROR_TITLE,
                        GENERIC_ERROR_MESSAGE,
                    )),
                }
            }
            other => {
                tracing::debug!(?other, "institution list ignoring event");
                Outcome::none()
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }
}
