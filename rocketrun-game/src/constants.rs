//! Gameplay constants the client needs to mirror from the game service.
//!
//! The service stays authoritative for every rule; these values only drive
//! what the client renders before the next server round-trip.

/// Fuel deducted by the service for every flight, regardless of distance.
pub const FLIGHT_FUEL_COST: i32 = 30;

/// ISO country code the player must return to once every rocket part is found.
pub const HOME_COUNTRY: &str = "FI";

/// Rocket parts needed to build the rocket.
pub const ROCKET_PARTS_REQUIRED: u8 = 4;

/// HP ceiling; eating never heals past it.
pub const MAX_HP: i32 = 100;

/// Duration of the cosmetic plane animation shown while a flight is posted.
pub const TRAVEL_ANIMATION_MS: u32 = 2_000;

// Persisted storage keys -----------------------------------------------------
pub const STORAGE_KEY_STATE: &str = "game_state";
pub const STORAGE_KEY_PLAYER: &str = "player";

// Destination card labels ----------------------------------------------------
pub const LABEL_FLY: &str = "Fly";
pub const LABEL_CANNOT_FLY: &str = "Cannot fly";
