//! Client-side copies of the service's game and player records.
//!
//! The service is the authority for every value here; the client keeps the
//! latest snapshot so it can render optimistically and survive reloads.
use serde::{Deserialize, Serialize};

use crate::constants::ROCKET_PARTS_REQUIRED;

/// Airport the player is currently parked at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Location {
    pub name: String,
    pub iso_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ident: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameState {
    pub location: Location,
    pub time_left: i32,
    pub range_km: f64,
    /// ISO codes of countries still hiding an uncollected rocket part.
    #[serde(default)]
    pub parts: Vec<String>,
}

impl GameState {
    #[must_use]
    pub fn has_part_in(&self, iso: &str) -> bool {
        self.parts.iter().any(|code| code == iso)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerState {
    pub fuel: i32,
    /// Food rations.
    pub ruoka: i32,
    pub ammo: i32,
    pub hp: i32,
    /// Rocket parts collected so far, `0..=4`.
    #[serde(default)]
    pub rakettiosat: u8,
    /// Role name in the service vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooli: Option<String>,
}

/// One flight option offered by the service. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub country: String,
    pub iso: String,
    pub icao: String,
    /// Great-circle distance in kilometres.
    pub distance: f64,
}

/// The single cached game/player pair owned by the controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameCache {
    pub state: Option<GameState>,
    pub player: Option<PlayerState>,
}

impl GameCache {
    #[must_use]
    pub const fn new(state: Option<GameState>, player: Option<PlayerState>) -> Self {
        Self { state, player }
    }

    /// Start of a new game: both snapshots are replaced, absent ones included.
    pub fn reset(&mut self, state: Option<GameState>, player: Option<PlayerState>) {
        self.state = state;
        self.player = player;
    }

    /// Role selection: present snapshots overwrite, absent ones are kept.
    pub fn replace(&mut self, state: Option<GameState>, player: Option<PlayerState>) {
        if let Some(state) = state {
            self.state = Some(state);
        }
        if let Some(player) = player {
            self.player = Some(player);
        }
    }

    /// Merge an action response into the cache.
    ///
    /// Present snapshots overwrite the cached ones wholesale, absent ones are
    /// kept. Collected rocket parts never go down within a session and never
    /// exceed [`ROCKET_PARTS_REQUIRED`].
    pub fn merge(&mut self, state: Option<GameState>, player: Option<PlayerState>) {
        if let Some(state) = state {
            self.state = Some(state);
        }
        if let Some(mut player) = player {
            let collected = self.player.as_ref().map_or(0, |prev| prev.rakettiosat);
            player.rakettiosat = player
                .rakettiosat
                .max(collected)
                .min(ROCKET_PARTS_REQUIRED);
            self.player = Some(player);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.player.is_none()
    }
}
