//! Page orchestration: requests, cache reconciliation and rendering.
//!
//! Every operation runs on the single UI thread. Cache borrows are always
//! released before awaiting the service so overlapping requests stay legal;
//! whichever response lands last wins.
use std::cell::{Cell, Ref, RefCell};

use crate::api::{ActionResponse, ApiError, GameApi};
use crate::roles::server_role_name;
use crate::rules::{Ending, evaluate_ending};
use crate::session::{KeyValueStore, SessionStore};
use crate::state::{Destination, GameCache, GameState, PlayerState};
use crate::view::{GameView, InventoryView, Page, StatusView, destination_cards};

const FALLBACK_ROLE_ERROR: &str = "Failed to choose role";
const FALLBACK_EAT_ERROR: &str = "Failed to eat";
const FALLBACK_FLY_ERROR: &str = "Flight failed";

pub struct GameController<A, S, V> {
    api: A,
    store: SessionStore<S>,
    view: V,
    cache: RefCell<GameCache>,
    destinations: RefCell<Vec<Destination>>,
    /// Set once the service accepted a role on this page.
    role_chosen: Cell<bool>,
}

impl<A, S, V> GameController<A, S, V>
where
    A: GameApi,
    S: KeyValueStore,
    V: GameView,
{
    pub fn new(api: A, storage: S, view: V) -> Self {
        Self {
            api,
            store: SessionStore::new(storage),
            view,
            cache: RefCell::default(),
            destinations: RefCell::default(),
            role_chosen: Cell::new(false),
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Borrow the cached snapshots. Do not hold across an `.await`.
    pub fn cache(&self) -> Ref<'_, GameCache> {
        self.cache.borrow()
    }

    #[must_use]
    pub fn destinations(&self) -> Vec<Destination> {
        self.destinations.borrow().clone()
    }

    // Role selection ---------------------------------------------------------

    /// Start a new game on the service and cache whatever it hands back.
    ///
    /// A reply landing after a role was already accepted is ignored, so the
    /// chosen player stays stored for the game page.
    pub async fn enter_role_select(&self) {
        match self.api.start_game().await {
            Ok(_) if self.role_chosen.get() => {
                log::debug!("Late start reply ignored, a role is already chosen");
            }
            Ok(reply) => {
                self.cache.borrow_mut().reset(reply.state, reply.player);
                self.store.clear();
                self.persist();
                log::debug!("New game started");
            }
            Err(err) => log::warn!("Error starting game: {err}"),
        }
    }

    /// Pick a role and move to the game view on success.
    ///
    /// Returns whether the service accepted the role.
    pub async fn choose_role(&self, role_id: &str) -> bool {
        let role = server_role_name(role_id);
        match self.api.choose_role(role).await {
            Ok(reply) => {
                self.cache.borrow_mut().replace(reply.state, reply.player);
                self.role_chosen.set(true);
                self.persist();
                log::debug!("Role {role} chosen");
                self.view.navigate(Page::Game);
                true
            }
            Err(err) => {
                let reason = match &err {
                    ApiError::Rejected { message, .. } => message
                        .clone()
                        .unwrap_or_else(|| FALLBACK_ROLE_ERROR.to_string()),
                    ApiError::Network(_) | ApiError::Decode(_) => err.to_string(),
                };
                log::warn!("Role {role} rejected: {err}");
                self.view
                    .alert(&format!("Error choosing character: {reason}"));
                false
            }
        }
    }

    // Game view --------------------------------------------------------------

    /// Render the cached session right away, then refresh the destinations.
    pub async fn enter_game(&self) {
        let (state, player) = self.store.load();
        self.cache.borrow_mut().reset(state, player);
        self.render();
        self.refresh_destinations().await;
    }

    /// Re-fetch the destination list and redraw. Failures keep the last grid.
    pub async fn refresh_destinations(&self) {
        match self.api.destinations().await {
            Ok(list) => {
                *self.destinations.borrow_mut() = list;
                self.render();
            }
            Err(err) => log::warn!("Failed to fetch destinations: {err}"),
        }
    }

    /// Redraw the status panel and destination grid from the cache.
    ///
    /// The status panel is left as-is while either snapshot is missing.
    pub fn render(&self) {
        let cache = self.cache.borrow();
        if let Some(status) = StatusView::from_cache(cache.state.as_ref(), cache.player.as_ref()) {
            self.view.render_status(&status);
        }
        let cards = destination_cards(
            &self.destinations.borrow(),
            cache.state.as_ref(),
            cache.player.as_ref(),
        );
        self.view.render_destinations(&cards);
    }

    /// Fly to `icao`.
    ///
    /// A service error is shown but does not stop the reply from being
    /// merged: whatever state comes back is authoritative.
    pub async fn fly(&self, icao: &str) -> Option<Ending> {
        self.view.play_travel_animation();
        let reply = match self.api.fly(icao).await {
            Ok(reply) => reply,
            Err(ApiError::Rejected { message, .. }) => {
                let reason = message.unwrap_or_else(|| FALLBACK_FLY_ERROR.to_string());
                log::warn!("Flight to {icao} rejected: {reason}");
                ActionResponse::with_error(reason)
            }
            Err(err) => {
                log::warn!("Flight to {icao} failed: {err}");
                self.view.alert(&format!("Error flying: {err}"));
                return None;
            }
        };

        if let Some(error) = reply.error_message() {
            self.view.alert(error);
        }
        let messages = reply.messages;
        self.apply(reply.state, reply.player);
        if !messages.is_empty() {
            self.view.show_messages(&messages);
        }

        if let Some(ending) = self.check_ending() {
            return Some(ending);
        }
        self.refresh_destinations().await;
        None
    }

    /// Eat one ration. Errors leave the cache untouched.
    pub async fn eat(&self) -> bool {
        let reply = match self.api.eat().await {
            Ok(reply) => reply,
            Err(err) => {
                let reason = err
                    .service_message()
                    .map_or_else(|| format!("{FALLBACK_EAT_ERROR}: {err}"), str::to_string);
                log::warn!("Eat failed: {err}");
                self.view.alert(&reason);
                return false;
            }
        };
        if let Some(error) = reply.error_message() {
            self.view.alert(error);
            return false;
        }
        self.apply(reply.state, reply.player);
        self.view.close_inventory();
        true
    }

    /// Pick a fight. The outcome is reported in the message panel.
    pub async fn fight(&self) -> Option<bool> {
        let reply = match self.api.fight().await {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Fight failed: {err}");
                self.view.alert(
                    err.service_message()
                        .unwrap_or("Fight failed, try again."),
                );
                return None;
            }
        };
        if let Some(error) = reply.error_message() {
            self.view.alert(error);
        }
        let outcome = reply.result;
        self.apply(reply.state, reply.player);
        if let Some(won) = outcome {
            let line = if won {
                "You won the fight!"
            } else {
                "You lost the fight!"
            };
            self.view.show_messages(&[line.to_string()]);
        }
        outcome
    }

    // Inventory and messages ---------------------------------------------------

    pub fn open_inventory(&self) {
        let snapshot = self.cache.borrow().player.as_ref().map(InventoryView::from);
        match snapshot {
            Some(inventory) => self.view.open_inventory(&inventory),
            None => log::debug!("No player cached, inventory stays closed"),
        }
    }

    pub fn close_inventory(&self) {
        self.view.close_inventory();
    }

    pub fn acknowledge_messages(&self) {
        self.view.clear_messages();
    }

    /// Dismiss the message panel and show the inventory instead.
    pub fn messages_to_inventory(&self) {
        self.view.clear_messages();
        self.open_inventory();
    }

    // Endings ------------------------------------------------------------------

    /// Announce a terminal condition and return to the selection screen.
    pub fn check_ending(&self) -> Option<Ending> {
        let ending = {
            let cache = self.cache.borrow();
            evaluate_ending(cache.state.as_ref(), cache.player.as_ref())
        }?;
        log::info!("Game ended: {ending}");
        self.store.clear();
        self.view.alert(ending.message());
        self.view.navigate(Page::RoleSelect);
        Some(ending)
    }

    /// Merge, persist, redraw, in that order.
    fn apply(&self, state: Option<GameState>, player: Option<PlayerState>) {
        self.cache.borrow_mut().merge(state, player);
        self.persist();
        self.render();
    }

    fn persist(&self) {
        let cache = self.cache.borrow();
        self.store.save(cache.state.as_ref(), cache.player.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LABEL_CANNOT_FLY, STORAGE_KEY_STATE};
    use crate::session::MemoryStore;
    use crate::state::fixtures::{helsinki, pilot, state_at};
    use crate::state::Location;
    use crate::testing::{ApiCall, RecordingView, ScriptedApi};
    use futures::executor::block_on;

    type Harness = GameController<ScriptedApi, MemoryStore, RecordingView>;

    fn harness() -> Harness {
        GameController::new(ScriptedApi::new(), MemoryStore::new(), RecordingView::new())
    }

    fn seeded() -> Harness {
        let ctl = harness();
        ctl.store()
            .save(Some(&state_at(helsinki())), Some(&pilot()));
        ctl
    }

    fn tallinn() -> Location {
        Location {
            name: "Lennart Meri Tallinn Airport".to_string(),
            iso_country: "EE".to_string(),
            ident: Some("EETN".to_string()),
            ..Location::default()
        }
    }

    fn baltic() -> Vec<Destination> {
        vec![
            Destination {
                country: "Estonia".to_string(),
                iso: "EE".to_string(),
                icao: "EETN".to_string(),
                distance: 101.0,
            },
            Destination {
                country: "Sweden".to_string(),
                iso: "SE".to_string(),
                icao: "ESSA".to_string(),
                distance: 398.0,
            },
        ]
    }

    fn reply(state: Option<GameState>, player: Option<PlayerState>) -> ActionResponse {
        ActionResponse {
            state,
            player,
            ..ActionResponse::default()
        }
    }

    #[test]
    fn start_replaces_the_whole_session() {
        let ctl = seeded();
        ctl.api()
            .queue_start(Ok(reply(Some(state_at(helsinki())), None)));
        block_on(ctl.enter_role_select());

        assert!(ctl.cache().player.is_none());
        assert!(ctl.cache().state.is_some());
        assert_eq!(ctl.store().load(), (Some(state_at(helsinki())), None));
    }

    #[test]
    fn start_failure_is_silent() {
        let ctl = seeded();
        block_on(ctl.enter_role_select());
        assert!(ctl.view().snapshot().alerts.is_empty());
        assert_eq!(ctl.api().calls(), vec![ApiCall::StartGame]);
    }

    #[test]
    fn choosing_a_role_maps_name_and_navigates() {
        let ctl = harness();
        ctl.api()
            .queue_role(Ok(reply(Some(state_at(helsinki())), Some(pilot()))));
        assert!(block_on(ctl.choose_role("pilot")));

        assert_eq!(
            ctl.api().calls(),
            vec![ApiCall::ChooseRole("pilotti".to_string())]
        );
        assert_eq!(ctl.view().snapshot().pages, vec![Page::Game]);
        assert_eq!(ctl.store().load().1, Some(pilot()));
    }

    #[test]
    fn late_start_reply_keeps_the_chosen_player() {
        let ctl = harness();
        ctl.api()
            .queue_role(Ok(reply(Some(state_at(helsinki())), Some(pilot()))))
            .queue_start(Ok(reply(Some(state_at(helsinki())), None)));
        assert!(block_on(ctl.choose_role("pilot")));
        block_on(ctl.enter_role_select());

        assert_eq!(ctl.cache().player, Some(pilot()));
        assert_eq!(
            ctl.store().load(),
            (Some(state_at(helsinki())), Some(pilot()))
        );
        assert_eq!(
            ctl.api().calls(),
            vec![ApiCall::ChooseRole("pilotti".to_string()), ApiCall::StartGame]
        );
    }

    #[test]
    fn rejected_role_alerts_with_service_message() {
        let ctl = harness();
        ctl.api().queue_role(Err(ApiError::Rejected {
            status: 400,
            message: Some("Unknown role".to_string()),
        }));
        assert!(!block_on(ctl.choose_role("wizard")));

        let view = ctl.view().snapshot();
        assert_eq!(view.alerts, vec!["Error choosing character: Unknown role"]);
        assert!(view.pages.is_empty());
        assert_eq!(
            ctl.api().calls(),
            vec![ApiCall::ChooseRole("wizard".to_string())]
        );
    }

    #[test]
    fn rejected_role_without_message_uses_fallback() {
        let ctl = harness();
        ctl.api().queue_role(Err(ApiError::Rejected {
            status: 500,
            message: None,
        }));
        block_on(ctl.choose_role("cook"));
        assert_eq!(
            ctl.view().take_alerts(),
            vec!["Error choosing character: Failed to choose role"]
        );
    }

    #[test]
    fn game_view_renders_cache_before_fetching() {
        let ctl = seeded();
        block_on(ctl.enter_game());

        let view = ctl.view().snapshot();
        assert_eq!(view.status_renders, 1);
        assert_eq!(view.grid_renders, 1);
        assert!(view.cards.is_empty());
        assert!(view.alerts.is_empty());
        assert_eq!(view.status.map(|s| s.country), Some("FI".to_string()));
    }

    #[test]
    fn game_view_renders_fetched_destinations() {
        let ctl = seeded();
        ctl.api().queue_destinations(Ok(baltic()));
        block_on(ctl.enter_game());

        let view = ctl.view().snapshot();
        assert_eq!(view.grid_renders, 2);
        assert_eq!(view.cards.len(), 2);
        assert!(view.cards.iter().all(|c| c.can_fly && c.has_part));
    }

    #[test]
    fn status_panel_is_untouched_without_a_player() {
        let ctl = harness();
        ctl.store().save(Some(&state_at(helsinki())), None);
        ctl.api().queue_destinations(Ok(baltic()));
        block_on(ctl.enter_game());

        let view = ctl.view().snapshot();
        assert_eq!(view.status_renders, 0);
        assert!(view.cards.iter().all(|c| c.label == LABEL_CANNOT_FLY));
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let ctl = seeded();
        ctl.api().queue_destinations(Ok(baltic()));
        block_on(ctl.enter_game());

        ctl.render();
        let first = ctl.view().snapshot();
        ctl.render();
        let second = ctl.view().snapshot();
        assert_eq!(first.cards, second.cards);
        assert_eq!(first.status, second.status);
        assert_eq!(second.cards.len(), baltic().len());
    }

    #[test]
    fn fly_merges_persists_and_refreshes() {
        let ctl = seeded();
        ctl.api().queue_destinations(Ok(baltic()));
        block_on(ctl.enter_game());

        let mut landed = state_at(tallinn());
        landed.parts.retain(|p| p != "EE");
        let mut player = pilot();
        player.fuel = 100;
        player.rakettiosat = 1;
        ctl.api()
            .queue_fly(Ok(ActionResponse {
                messages: vec!["You found a rocket part in Estonia!".to_string()],
                ..reply(Some(landed.clone()), Some(player.clone()))
            }))
            .queue_destinations(Ok(Vec::new()));

        assert_eq!(block_on(ctl.fly("EETN")), None);

        let view = ctl.view().snapshot();
        assert_eq!(view.animations, 1);
        assert_eq!(view.messages.len(), 1);
        assert!(view.cards.is_empty());
        assert_eq!(view.status.as_ref().map(|s| s.parts_collected), Some(1));
        assert_eq!(ctl.store().load(), (Some(landed), Some(player)));
        assert_eq!(ctl.api().calls().last(), Some(&ApiCall::Destinations));
    }

    #[test]
    fn fly_error_still_merges_the_reply() {
        let ctl = seeded();
        let mut player = pilot();
        player.hp = 90;
        ctl.api().queue_fly(Ok(ActionResponse {
            error_capitalized: Some("Flying failed".to_string()),
            ..reply(None, Some(player))
        }));
        block_on(ctl.fly("ESSA"));

        let view = ctl.view().snapshot();
        assert_eq!(view.alerts, vec!["Flying failed"]);
        assert_eq!(ctl.cache().player.as_ref().map(|p| p.hp), Some(90));
    }

    #[test]
    fn rejected_flight_shows_service_error() {
        let ctl = seeded();
        ctl.api().queue_fly(Err(ApiError::Rejected {
            status: 400,
            message: Some("No player".to_string()),
        }));
        block_on(ctl.fly("ESSA"));
        assert_eq!(ctl.view().take_alerts(), vec!["No player"]);
    }

    #[test]
    fn fly_to_victory_returns_to_selection() {
        let ctl = seeded();
        block_on(ctl.enter_game());
        let mut player = pilot();
        player.rakettiosat = 4;
        player.fuel = 0;
        ctl.api()
            .queue_fly(Ok(reply(Some(state_at(helsinki())), Some(player))));

        assert_eq!(block_on(ctl.fly("EFHK")), Some(Ending::Victory));
        let view = ctl.view().snapshot();
        assert_eq!(view.alerts, vec![Ending::Victory.message()]);
        assert_eq!(view.pages, vec![Page::RoleSelect]);
        assert!(ctl.store().storage().raw(STORAGE_KEY_STATE).is_none());
        assert_eq!(ctl.api().calls().last(), Some(&ApiCall::Fly("EFHK".to_string())));
    }

    #[test]
    fn network_failure_on_fly_leaves_cache() {
        let ctl = seeded();
        block_on(ctl.enter_game());
        let before = ctl.cache().clone();
        block_on(ctl.fly("ESSA"));
        assert_eq!(*ctl.cache(), before);
        assert_eq!(ctl.view().snapshot().alerts.len(), 1);
    }

    #[test]
    fn eat_merges_and_closes_inventory() {
        let ctl = seeded();
        block_on(ctl.enter_game());
        ctl.open_inventory();
        assert!(ctl.view().snapshot().inventory.is_some());

        let mut fed = pilot();
        fed.ruoka = 2;
        fed.hp = 100;
        ctl.api().queue_eat(Ok(reply(None, Some(fed))));
        assert!(block_on(ctl.eat()));

        let view = ctl.view().snapshot();
        assert!(view.inventory.is_none());
        assert_eq!(view.status.map(|s| s.food), Some(2));
    }

    #[test]
    fn eat_error_alerts_and_keeps_state() {
        let ctl = seeded();
        block_on(ctl.enter_game());
        ctl.open_inventory();
        let mut hungry = pilot();
        hungry.ruoka = 0;
        ctl.api().queue_eat(Ok(ActionResponse {
            error: Some("Your HP is already full.".to_string()),
            ..reply(None, Some(hungry))
        }));
        assert!(!block_on(ctl.eat()));

        let view = ctl.view().snapshot();
        assert_eq!(view.alerts, vec!["Your HP is already full."]);
        assert!(view.inventory.is_some());
        assert_eq!(ctl.cache().player, Some(pilot()));
    }

    #[test]
    fn eat_transport_failure_alerts() {
        let ctl = seeded();
        assert!(!block_on(ctl.eat()));
        let alerts = ctl.view().take_alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("Failed to eat"));
    }

    #[test]
    fn eat_never_checks_for_an_ending() {
        let ctl = seeded();
        let mut empty = pilot();
        empty.ruoka = 0;
        ctl.api().queue_eat(Ok(reply(None, Some(empty))));
        block_on(ctl.eat());
        assert!(ctl.view().snapshot().pages.is_empty());
    }

    #[test]
    fn fight_reports_outcome_in_messages() {
        let ctl = seeded();
        let mut player = pilot();
        player.ammo = 4;
        ctl.api().queue_fight(Ok(ActionResponse {
            result: Some(true),
            ..reply(None, Some(player))
        }));
        assert_eq!(block_on(ctl.fight()), Some(true));
        let view = ctl.view().snapshot();
        assert_eq!(view.messages, vec!["You won the fight!"]);
        assert_eq!(ctl.cache().player.as_ref().map(|p| p.ammo), Some(4));
    }

    #[test]
    fn message_panel_can_pivot_to_inventory() {
        let ctl = seeded();
        block_on(ctl.enter_game());
        ctl.view().show_messages(&["loot".to_string()]);

        ctl.messages_to_inventory();
        let view = ctl.view().snapshot();
        assert!(view.messages.is_empty());
        assert_eq!(view.inventory.map(|i| i.fuel), Some(130));

        ctl.close_inventory();
        ctl.view().show_messages(&["loot".to_string()]);
        ctl.acknowledge_messages();
        let view = ctl.view().snapshot();
        assert!(view.messages.is_empty());
        assert!(view.inventory.is_none());
    }

    #[test]
    fn inventory_stays_closed_without_player() {
        let ctl = harness();
        ctl.open_inventory();
        assert!(ctl.view().snapshot().inventory.is_none());
    }
}
