//! Last step of registration: the cargo, then the create request

use super::{network_failure, Loading, Mount, Outcome, ScreenContext, ScreenController, Transition};
use crate::event::ScreenEvent;
use crate::state::{
    Address, Alert, FieldAccessors, FieldRule, FormField, FormRegistry, NewInterest, Schema, View,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const CARGO: &str = "cargo";

pub const CREATE_ERROR_TITLE: &str = "Erro no cadastro";
pub const CREATE_ERROR_MESSAGE: &str = "Ocorreu um erro ao fazer cadastro, tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CargoFocus {
    #[default]
    Cargo,
    Submit,
}

pub struct CargoRegisterScreen {
    ctx: ScreenContext,
    mount: Option<Mount>,
    pub institution_id: String,
    pub address: Address,
    pub registry: FormRegistry,
    pub focus: CargoFocus,
    schema: Schema,
    loading: Loading,
}

impl CargoRegisterScreen {
    pub fn new(ctx: ScreenContext, institution_id: String, address: Address) -> Self {
        let mut registry = FormRegistry::new();
        registry.register(FormField::new(CARGO, "Cargo"), FieldAccessors::trimmed_text());
        registry.focus(CARGO);
        Self {
            ctx,
            mount: None,
            institution_id,
            address,
            registry,
            focus: CargoFocus::default(),
            schema: Schema::new().rule(FieldRule::required(CARGO, "Cargo obrigatório")),
            loading: Loading::default(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading.is_loading()
    }

    pub fn set_focus(&mut self, focus: CargoFocus) {
        self.focus = focus;
        match focus {
            CargoFocus::Cargo => {
                self.registry.focus(CARGO);
            }
            CargoFocus::Submit => self.registry.blur(),
        }
    }

    pub fn submit(&mut self) -> Outcome {
        if !self.can_submit() {
            tracing::debug!("create already in flight");
            return Outcome::none();
        }
        self.registry.clear_errors();
        let data = self.registry.submit();
        if let Err(errors) = self.schema.validate(&data) {
            self.registry.set_errors(&errors);
            return Outcome::none();
        }

        let Some(mount) = &self.mount else {
            return Outcome::none();
        };
        let token = match self.ctx.token() {
            Ok(token) => token,
            Err(err) => {
                return Outcome::alert(network_failure(
                    "cannot create interest",
                    &err,
                    CREATE_ERROR_TITLE,
                    CREATE_ERROR_MESSAGE,
                ))
            }
        };

        let interest = NewInterest {
            institution_id: self.institution_id.clone(),
            cargo: data.get(CARGO).cloned().unwrap_or_default(),
            destination_address: self.address.clone(),
        };
        tracing::info!(institution_id = %interest.institution_id, "creating interest");

        self.loading.begin();
        let api = self.ctx.api.clone();
        mount.spawn(async move {
            ScreenEvent::InterestCreated(api.create_interest(&token, &interest).await)
        });
        Outcome::none()
    }
}

impl ScreenController for CargoRegisterScreen {
    fn start(&mut self, mount: Mount) -> Outcome {
        self.mount = Some(mount);
        Outcome::none()
    }

    fn stop(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.cancel();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit();
        }

        match (self.focus, key.code) {
            (_, KeyCode::Esc) => return Outcome::back(),
            (CargoFocus::Cargo, KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter) => {
                self.set_focus(CargoFocus::Submit)
            }
            (CargoFocus::Submit, KeyCode::Tab) => {
                self.focus = CargoFocus::Cargo;
                self.registry.next_focus();
            }
            (CargoFocus::Submit, KeyCode::BackTab) => {
                self.focus = CargoFocus::Cargo;
                self.registry.prev_focus();
            }
            (CargoFocus::Cargo, KeyCode::Char(c)) => {
                self.registry.edit_focused(|value| value.push(c));
            }
            (CargoFocus::Cargo, KeyCode::Backspace) => {
                self.registry.edit_focused(|value| {
                    value.pop();
                });
            }
            (CargoFocus::Submit, KeyCode::Enter) => return self.submit(),
            _ => {}
        }
        Outcome::none()
    }

    fn handle_event(&mut self, event: ScreenEvent) -> Outcome {
        match event {
            ScreenEvent::InterestCreated(result) => {
                self.loading.end();
                match result {
                    Ok(()) => {
                        tracing::info!("interest created");
                        Outcome::transition(Transition::Reset(View::Interests))
                            .with_alert(Alert::info("Sucesso", "Interesse cadastrado!"))
                    }
                    Err(err) => Outcome::alert(network_failure(
                        "failed to create interest",
                        &err,
                        CREATE_ERROR_TITLE,
                        CREATE_ERROR_MESSAGE,
                    )),
                }
            }
            other => {
                tracing::debug!(?other, "cargo form ignoring event");
                Outcome::none()
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }
}
