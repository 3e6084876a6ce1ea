//! Fakes for driving a [`GameController`](crate::GameController) without a
//! browser or a running service.
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::api::{ActionResponse, ApiError, GameApi};
use crate::state::Destination;
use crate::view::{DestinationCard, GameView, InventoryView, Page, StatusView};

/// Everything a [`RecordingView`] has been told to show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewLog {
    pub status: Option<StatusView>,
    pub status_renders: usize,
    pub cards: Vec<DestinationCard>,
    pub grid_renders: usize,
    pub messages: Vec<String>,
    pub inventory: Option<InventoryView>,
    pub alerts: Vec<String>,
    pub pages: Vec<Page>,
    pub animations: usize,
}

/// View sink that keeps the current screen contents in memory.
#[derive(Debug, Default)]
pub struct RecordingView {
    log: RefCell<ViewLog>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewLog {
        self.log.borrow().clone()
    }

    /// Drain the alerts shown so far.
    pub fn take_alerts(&self) -> Vec<String> {
        std::mem::take(&mut self.log.borrow_mut().alerts)
    }
}

impl GameView for RecordingView {
    fn render_status(&self, status: &StatusView) {
        let mut log = self.log.borrow_mut();
        log.status = Some(status.clone());
        log.status_renders += 1;
    }

    fn render_destinations(&self, cards: &[DestinationCard]) {
        let mut log = self.log.borrow_mut();
        log.cards = cards.to_vec();
        log.grid_renders += 1;
    }

    fn show_messages(&self, messages: &[String]) {
        self.log.borrow_mut().messages = messages.to_vec();
    }

    fn clear_messages(&self) {
        self.log.borrow_mut().messages.clear();
    }

    fn open_inventory(&self, inventory: &InventoryView) {
        self.log.borrow_mut().inventory = Some(inventory.clone());
    }

    fn close_inventory(&self) {
        self.log.borrow_mut().inventory = None;
    }

    fn alert(&self, message: &str) {
        self.log.borrow_mut().alerts.push(message.to_string());
    }

    fn navigate(&self, page: Page) {
        self.log.borrow_mut().pages.push(page);
    }

    fn play_travel_animation(&self) {
        self.log.borrow_mut().animations += 1;
    }
}

/// A request the [`ScriptedApi`] received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    StartGame,
    ChooseRole(String),
    Destinations,
    Fly(String),
    Eat,
    Fight,
}

type Reply = Result<ActionResponse, ApiError>;

/// Service fake answering from per-endpoint queues.
///
/// An endpoint with nothing queued answers with a network error.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    start: RefCell<VecDeque<Reply>>,
    roles: RefCell<VecDeque<Reply>>,
    destinations: RefCell<VecDeque<Result<Vec<Destination>, ApiError>>>,
    flights: RefCell<VecDeque<Reply>>,
    meals: RefCell<VecDeque<Reply>>,
    fights: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<ApiCall>>,
}

impl ScriptedApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_start(&self, reply: Reply) -> &Self {
        self.start.borrow_mut().push_back(reply);
        self
    }

    pub fn queue_role(&self, reply: Reply) -> &Self {
        self.roles.borrow_mut().push_back(reply);
        self
    }

    pub fn queue_destinations(&self, reply: Result<Vec<Destination>, ApiError>) -> &Self {
        self.destinations.borrow_mut().push_back(reply);
        self
    }

    pub fn queue_fly(&self, reply: Reply) -> &Self {
        self.flights.borrow_mut().push_back(reply);
        self
    }

    pub fn queue_eat(&self, reply: Reply) -> &Self {
        self.meals.borrow_mut().push_back(reply);
        self
    }

    pub fn queue_fight(&self, reply: Reply) -> &Self {
        self.fights.borrow_mut().push_back(reply);
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    fn answer<T>(
        &self,
        call: ApiCall,
        queue: &RefCell<VecDeque<Result<T, ApiError>>>,
    ) -> Result<T, ApiError> {
        let label = format!("{call:?}");
        self.calls.borrow_mut().push(call);
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network(format!("no scripted reply for {label}"))))
    }
}

#[async_trait(?Send)]
impl GameApi for ScriptedApi {
    async fn start_game(&self) -> Result<ActionResponse, ApiError> {
        self.answer(ApiCall::StartGame, &self.start)
    }

    async fn choose_role(&self, role: &str) -> Result<ActionResponse, ApiError> {
        self.answer(ApiCall::ChooseRole(role.to_string()), &self.roles)
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        self.answer(ApiCall::Destinations, &self.destinations)
    }

    async fn fly(&self, icao: &str) -> Result<ActionResponse, ApiError> {
        self.answer(ApiCall::Fly(icao.to_string()), &self.flights)
    }

    async fn eat(&self) -> Result<ActionResponse, ApiError> {
        self.answer(ApiCall::Eat, &self.meals)
    }

    async fn fight(&self) -> Result<ActionResponse, ApiError> {
        self.answer(ApiCall::Fight, &self.fights)
    }
}
