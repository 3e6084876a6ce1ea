//! Rocket Run client core
//!
//! Platform-agnostic client logic for the Rocket Run flight game: the cached
//! game/player snapshots and their merge rules, best-effort session
//! persistence, derived UI conditions, and the controller that ties the
//! remote game service to a view. Browser bindings live in `rocketrun-web`.

pub mod api;
pub mod constants;
pub mod controller;
pub mod roles;
pub mod rules;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod view;

// Re-export commonly used types
pub use api::{
    ActionResponse, ApiError, FlyRequest, GameApi, RoleRequest, interpret_destinations,
    interpret_reply,
};
pub use controller::GameController;
pub use roles::{Role, RoleKit, server_role_name};
pub use rules::{Ending, can_fly, evaluate_ending};
pub use session::{KeyValueStore, MemoryStore, SessionStore, StorageError};
pub use state::{Destination, GameCache, GameState, Location, PlayerState};
pub use view::{DestinationCard, GameView, InventoryView, Page, StatusView, destination_cards};
