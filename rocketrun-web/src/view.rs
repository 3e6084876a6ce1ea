//! [`GameView`] backed by Yew state handles.
//!
//! The controller outlives individual renders, so it writes through the
//! handles captured on first render; each `set` schedules a re-render of the
//! page that owns them.
use gloo::timers::future::TimeoutFuture;
use rocketrun_game::constants::TRAVEL_ANIMATION_MS;
use rocketrun_game::{DestinationCard, GameView, InventoryView, Page, StatusView};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Navigator;

use crate::router::Route;

#[derive(Clone)]
pub struct YewView {
    pub status: UseStateHandle<Option<StatusView>>,
    pub cards: UseStateHandle<Vec<DestinationCard>>,
    pub messages: UseStateHandle<Vec<String>>,
    pub inventory: UseStateHandle<Option<InventoryView>>,
    pub traveling: UseStateHandle<bool>,
    pub navigator: Option<Navigator>,
}

impl GameView for YewView {
    fn render_status(&self, status: &StatusView) {
        self.status.set(Some(status.clone()));
    }

    fn render_destinations(&self, cards: &[DestinationCard]) {
        self.cards.set(cards.to_vec());
    }

    fn show_messages(&self, messages: &[String]) {
        self.messages.set(messages.to_vec());
    }

    fn clear_messages(&self) {
        self.messages.set(Vec::new());
    }

    fn open_inventory(&self, inventory: &InventoryView) {
        self.inventory.set(Some(inventory.clone()));
    }

    fn close_inventory(&self) {
        self.inventory.set(None);
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn navigate(&self, page: Page) {
        match &self.navigator {
            Some(navigator) => navigator.push(&Route::from(page)),
            None => log::warn!("No router mounted, cannot navigate to {page:?}"),
        }
    }

    fn play_travel_animation(&self) {
        self.traveling.set(true);
        let traveling = self.traveling.clone();
        spawn_local(async move {
            TimeoutFuture::new(TRAVEL_ANIMATION_MS).await;
            traveling.set(false);
        });
    }
}
