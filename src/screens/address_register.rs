//! Destination address form: state and city dropdowns plus neighborhood

use super::{Loading, Mount, Outcome, ScreenContext, ScreenController};
use crate::event::ScreenEvent;
use crate::state::{
    Address, FieldAccessors, FieldRule, FormField, FormRegistry, RegionCascade, Schema,
    SubRegionRequest, View, ViewParams,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const NEIGHBORHOOD: &str = "neighborhood";
pub const CITY: &str = "city";
pub const STATE: &str = "state";

/// Which control has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFocus {
    #[default]
    Region,
    SubRegion,
    Neighborhood,
    Submit,
}

impl AddressFocus {
    fn next(self) -> Self {
        match self {
            Self::Region => Self::SubRegion,
            Self::SubRegion => Self::Neighborhood,
            Self::Neighborhood => Self::Submit,
            Self::Submit => Self::Region,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Region => Self::Submit,
            Self::SubRegion => Self::Region,
            Self::Neighborhood => Self::SubRegion,
            Self::Submit => Self::Neighborhood,
        }
    }
}

pub struct AddressRegisterScreen {
    ctx: ScreenContext,
    mount: Option<Mount>,
    pub institution_id: String,
    pub cascade: RegionCascade,
    pub registry: FormRegistry,
    pub focus: AddressFocus,
    schema: Schema,
    loading: Loading,
}

impl AddressRegisterScreen {
    pub fn new(ctx: ScreenContext, institution_id: String) -> Self {
        let mut registry = FormRegistry::new();
        registry.register(
            FormField::new(NEIGHBORHOOD, "Bairro"),
            FieldAccessors::trimmed_text(),
        );
        Self {
            ctx,
            mount: None,
            institution_id,
            cascade: RegionCascade::new(),
            registry,
            focus: AddressFocus::default(),
            schema: Schema::new().rule(FieldRule::required(NEIGHBORHOOD, "Bairro obrigatório")),
            loading: Loading::default(),
        }
    }

    /// Submit is disabled while any lookup is in flight
    pub fn can_submit(&self) -> bool {
        !self.loading.is_loading()
    }

    pub fn set_focus(&mut self, focus: AddressFocus) {
        self.focus = focus;
        if focus == AddressFocus::Neighborhood {
            self.registry.focus(NEIGHBORHOOD);
        } else {
            self.registry.blur();
        }
    }

    /// Tab order; the text fields are walked through the registry
    fn cycle_focus(&mut self, forward: bool) {
        if self.focus == AddressFocus::Neighborhood {
            self.registry.blur();
        }
        self.focus = if forward {
            self.focus.next()
        } else {
            self.focus.prev()
        };
        match (self.focus, forward) {
            (AddressFocus::Neighborhood, true) => self.registry.next_focus(),
            (AddressFocus::Neighborhood, false) => self.registry.prev_focus(),
            _ => {}
        }
    }

    fn load_regions(&mut self) {
        let Some(mount) = &self.mount else {
            return;
        };
        self.loading.begin();
        let geography = self.ctx.geography.clone();
        mount.spawn(async move { ScreenEvent::RegionsLoaded(geography.list_regions().await) });
    }

    fn fetch_sub_regions(&mut self, request: Option<SubRegionRequest>) {
        // No backing region: nothing to fetch, the list stays empty
        let Some(request) = request else {
            return;
        };
        let Some(mount) = &self.mount else {
            return;
        };
        self.loading.begin();
        let geography = self.ctx.geography.clone();
        mount.spawn(async move {
            let result = geography.list_sub_regions(&request.region_id).await;
            ScreenEvent::SubRegionsLoaded {
                generation: request.generation,
                result,
            }
        });
    }

    /// Select a state by code and fetch its cities
    pub fn select_region(&mut self, code: Option<&str>) {
        let request = self.cascade.select_region(code);
        self.fetch_sub_regions(request);
    }

    /// Values the schema sees: registered fields plus the two dropdowns
    fn collect(&self) -> crate::state::FormData {
        let mut data = self.registry.submit();
        data.insert(
            CITY.to_string(),
            self.cascade.selected_sub_region().unwrap_or_default().to_string(),
        );
        data.insert(
            STATE.to_string(),
            self.cascade.selected_region().unwrap_or_default().to_string(),
        );
        data
    }

    pub fn submit(&mut self) -> Outcome {
        if !self.can_submit() {
            tracing::debug!("submit ignored while loading");
            return Outcome::none();
        }
        self.registry.clear_errors();
        let data = self.collect();

        if let Err(errors) = self.schema.validate(&data) {
            tracing::debug!(%errors, "address form rejected");
            self.registry.set_errors(&errors);
            return Outcome::none();
        }

        let field = |name: &str| data.get(name).cloned().unwrap_or_default();
        let address = Address {
            neighborhood: field(NEIGHBORHOOD),
            city: field(CITY),
            state: field(STATE),
        };
        Outcome::navigate(
            View::CargoRegister,
            ViewParams {
                institution_id: Some(self.institution_id.clone()),
                address: Some(address),
            },
        )
    }
}

impl ScreenController for AddressRegisterScreen {
    fn start(&mut self, mount: Mount) -> Outcome {
        self.mount = Some(mount);
        self.load_regions();
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
            (_, KeyCode::Tab) => self.cycle_focus(true),
            (_, KeyCode::BackTab) => self.cycle_focus(false),
            (AddressFocus::Region, KeyCode::Right | KeyCode::Down) => {
                let request = self.cascade.cycle_region(1);
                self.fetch_sub_regions(request);
            }
            (AddressFocus::Region, KeyCode::Left | KeyCode::Up) => {
                let request = self.cascade.cycle_region(-1);
                self.fetch_sub_regions(request);
            }
            (AddressFocus::SubRegion, KeyCode::Right | KeyCode::Down) => {
                self.cascade.cycle_sub_region(1)
            }
            (AddressFocus::SubRegion, KeyCode::Left | KeyCode::Up) => {
                self.cascade.cycle_sub_region(-1)
            }
            (AddressFocus::Neighborhood, KeyCode::Char(c)) => {
                self.registry.edit_focused(|value| value.push(c));
            }
            (AddressFocus::Neighborhood, KeyCode::Backspace) => {
                self.registry.edit_focused(|value| {
                    value.pop();
                });
            }
            (AddressFocus::Neighborhood, KeyCode::Enter) => self.set_focus(AddressFocus::Submit),
            (AddressFocus::Submit, KeyCode::Enter) => return self.submit(),
            _ => {}
        }
        Outcome::none()
    }

    fn handle_event(&mut self, event: ScreenEvent) -> Outcome {
        match event {
            ScreenEvent::RegionsLoaded(result) => {
                self.loading.end();
                match result {
                    Ok(regions) => self.cascade.load_regions(regions),
                    Err(err) => tracing::error!(error = %err, "failed to load states"),
                }
            }
            ScreenEvent::SubRegionsLoaded { generation, result } => {
                self.loading.end();
                match result {
                    Ok(sub_regions) => {
                        if !self.cascade.apply_sub_regions(generation, sub_regions) {
                            tracing::debug!(generation, "dropping cities for a previous state");
                        }
                    }
                    Err(err) => tracing::error!(error = %err, generation, "failed to load cities"),
                }
            }
            other => tracing::debug!(?other, "address form ignoring event"),
        }
        Outcome::none()
    }

    fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, ctrl, key, mount, pump};
    use super::*;
    use crate::api::{ApiError, MockGeographyApi, MockInterestApi};
    use crate::screens::Transition;
    use crate::state::{CascadePhase, Region, SubRegion};
    use pretty_assertions::assert_eq;

    fn regions() -> Vec<Region> {
        vec![
            Region {
                code: "SP".to_string(),
                id: "35".to_string(),
            },
            Region {
                code: "RJ".to_string(),
                id: "33".to_string(),
            },
        ]
    }

    fn cities(names: &[&str]) -> Vec<SubRegion> {
        names
            .iter()
            .map(|n| SubRegion {
                name: n.to_string(),
            })
            .collect()
    }

    fn geography() -> MockGeographyApi {
        let mut geography = MockGeographyApi::new();
        geography
            .expect_list_regions()
            .returning(|| Ok(regions()));
        geography
            .expect_list_sub_regions()
            .returning(|id| match id {
                "35" => Ok(cities(&["Campinas", "Santos"])),
                "33" => Ok(cities(&["Niterói"])),
                _ => Ok(Vec::new()),
            });
        geography
    }

    fn type_text(screen: &mut AddressRegisterScreen, text: &str) {
        screen.set_focus(AddressFocus::Neighborhood);
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn test_mount_loads_sorted_regions() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), geography()),
            "9".to_string(),
        );
        let (mount, mut rx) = mount();
        screen.start(mount);
        assert!(!screen.can_submit());

        pump(&mut screen, &mut rx).await;
        let codes: Vec<&str> = screen.cascade.regions().iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["RJ", "SP"]);
        assert!(screen.can_submit());
    }

    #[tokio::test]
    async fn test_select_region_populates_cities() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), geography()),
            "9".to_string(),
        );
        let (mount, mut rx) = mount();
        screen.start(mount);
        pump(&mut screen, &mut rx).await;

        screen.select_region(Some("SP"));
        pump(&mut screen, &mut rx).await;

        assert_eq!(screen.cascade.sub_regions(), cities(&["Campinas", "Santos"]).as_slice());
        assert_eq!(screen.cascade.phase(), CascadePhase::SubRegionsLoaded);
    }

    #[tokio::test]
    async fn test_last_selected_region_wins() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), geography()),
            "9".to_string(),
        );
        let (mount, mut rx) = mount();
        screen.start(mount);
        pump(&mut screen, &mut rx).await;

        screen.select_region(Some("SP"));
        screen.select_region(Some("RJ"));
        assert!(screen.cascade.sub_regions().is_empty());

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let current = screen.cascade.generation();
        let first_is_current = matches!(
            &first.event,
            ScreenEvent::SubRegionsLoaded { generation, .. } if *generation == current
        );
        // Deliver RJ first, then the stale SP response
        let (rj, sp) = if first_is_current {
            (first, second)
        } else {
            (second, first)
        };
        screen.handle_event(rj.event);
        screen.handle_event(sp.event);

        assert_eq!(screen.cascade.sub_regions(), cities(&["Niterói"]).as_slice());
        assert_eq!(screen.cascade.selected_region(), Some("RJ"));
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_lookup_miss_skips_fetch() {
        let mut geography = MockGeographyApi::new();
        geography
            .expect_list_regions()
            .returning(|| Ok(regions()));
        geography.expect_list_sub_regions().never();
        let mut screen =
            AddressRegisterScreen::new(context(MockInterestApi::new(), geography), "9".to_string());
        let (mount, mut rx) = mount();
        screen.start(mount);
        pump(&mut screen, &mut rx).await;

        screen.select_region(Some("XX"));
        assert!(!screen.is_loading());
        assert!(screen.cascade.sub_regions().is_empty());
    }

    #[tokio::test]
    async fn test_region_failure_keeps_state_and_allows_retry() {
        let mut geography = MockGeographyApi::new();
        geography
            .expect_list_regions()
            .returning(|| Err(ApiError::MissingToken));
        let mut screen =
            AddressRegisterScreen::new(context(MockInterestApi::new(), geography), "9".to_string());
        let (mount, mut rx) = mount();
        screen.start(mount);

        let outcome = pump(&mut screen, &mut rx).await;
        assert_eq!(outcome, Outcome::none());
        assert_eq!(screen.cascade.phase(), CascadePhase::Idle);
        assert!(screen.can_submit());
    }

    #[tokio::test]
    async fn test_city_failure_keeps_regions() {
        let mut geography = MockGeographyApi::new();
        geography
            .expect_list_regions()
            .returning(|| Ok(regions()));
        geography
            .expect_list_sub_regions()
            .returning(|_| Err(ApiError::MissingToken));
        let mut screen =
            AddressRegisterScreen::new(context(MockInterestApi::new(), geography), "9".to_string());
        let (mount, mut rx) = mount();
        screen.start(mount);
        pump(&mut screen, &mut rx).await;

        screen.select_region(Some("SP"));
        pump(&mut screen, &mut rx).await;
        assert_eq!(screen.cascade.regions().len(), 2);
        assert!(screen.cascade.sub_regions().is_empty());
    }

    #[tokio::test]
    async fn test_empty_neighborhood_is_inline_error_only() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), geography()),
            "9".to_string(),
        );
        let (mount, mut rx) = mount();
        screen.start(mount);
        pump(&mut screen, &mut rx).await;

        let outcome = screen.handle_key(ctrl('s'));

        assert_eq!(outcome, Outcome::none());
        assert_eq!(screen.registry.errors(), vec![(NEIGHBORHOOD, "Bairro obrigatório")]);
    }

    #[tokio::test]
    async fn test_valid_submit_navigates_with_address() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), geography()),
            "9".to_string(),
        );
        let (mount, mut rx) = mount();
        screen.start(mount);
        pump(&mut screen, &mut rx).await;
        screen.select_region(Some("SP"));
        pump(&mut screen, &mut rx).await;
        screen.set_focus(AddressFocus::SubRegion);
        screen.handle_key(key(KeyCode::Right));
        type_text(&mut screen, "Centro");

        screen.set_focus(AddressFocus::Submit);
        let outcome = screen.handle_key(key(KeyCode::Enter));

        assert_eq!(
            outcome.transition,
            Some(Transition::Navigate(
                View::CargoRegister,
                ViewParams {
                    institution_id: Some("9".to_string()),
                    address: Some(Address {
                        neighborhood: "Centro".to_string(),
                        city: "Campinas".to_string(),
                        state: "SP".to_string(),
                    }),
                }
            ))
        );
        assert!(screen.registry.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_disabled_while_loading() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), geography()),
            "9".to_string(),
        );
        let (mount, _rx) = mount();
        screen.start(mount);
        type_text(&mut screen, "Centro");

        assert_eq!(screen.submit(), Outcome::none());
        assert!(screen.registry.errors().is_empty());
    }

    #[test]
    fn test_focus_cycle() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), MockGeographyApi::new()),
            "9".to_string(),
        );
        screen.handle_key(key(KeyCode::Tab));
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus, AddressFocus::Neighborhood);
        assert_eq!(screen.registry.focused_name(), Some(NEIGHBORHOOD));
        screen.handle_key(key(KeyCode::BackTab));
        assert_eq!(screen.focus, AddressFocus::SubRegion);
        assert!(screen.registry.focused().is_none());

        // Coming back from the button lands on the text field again
        screen.set_focus(AddressFocus::Submit);
        screen.handle_key(key(KeyCode::BackTab));
        assert_eq!(screen.focus, AddressFocus::Neighborhood);
        assert_eq!(screen.registry.focused_name(), Some(NEIGHBORHOOD));
        screen.handle_key(key(KeyCode::Char('C')));
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus, AddressFocus::Submit);
        assert!(screen.registry.field(NEIGHBORHOOD).unwrap().is_filled);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = AddressRegisterScreen::new(
            context(MockInterestApi::new(), MockGeographyApi::new()),
            "9".to_string(),
        );
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), Outcome::back());
    }
}
