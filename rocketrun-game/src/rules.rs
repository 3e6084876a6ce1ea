//! Derived conditions the client evaluates between server round-trips.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{FLIGHT_FUEL_COST, HOME_COUNTRY, ROCKET_PARTS_REQUIRED};
use crate::state::{Destination, GameState, PlayerState};

/// Whether the player can currently fly to `destination`.
///
/// Every flight costs a flat [`FLIGHT_FUEL_COST`]; distance only matters
/// against the remaining range.
#[must_use]
pub fn can_fly(
    player: Option<&PlayerState>,
    state: Option<&GameState>,
    destination: &Destination,
) -> bool {
    let (Some(player), Some(state)) = (player, state) else {
        return false;
    };
    player.fuel >= FLIGHT_FUEL_COST && destination.distance <= state.range_km
}

/// Terminal conditions, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Victory,
    OutOfFuel,
    Starved,
    OutOfTime,
}

impl Ending {
    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Victory)
    }

    /// Text shown in the blocking alert.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Victory => "You collected every rocket part and made it home. You win!",
            Self::OutOfFuel => "You ran out of fuel. Game over.",
            Self::Starved => "You ran out of food. Game over.",
            Self::OutOfTime => "You ran out of time. Game over.",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::OutOfFuel => write!(f, "out_of_fuel"),
            Self::Starved => write!(f, "starved"),
            Self::OutOfTime => write!(f, "out_of_time"),
        }
    }
}

/// First matching terminal condition, victory before any defeat.
#[must_use]
pub fn evaluate_ending(state: Option<&GameState>, player: Option<&PlayerState>) -> Option<Ending> {
    let (Some(state), Some(player)) = (state, player) else {
        return None;
    };
    if player.rakettiosat >= ROCKET_PARTS_REQUIRED && state.location.iso_country == HOME_COUNTRY {
        Some(Ending::Victory)
    } else if player.fuel <= 0 {
        Some(Ending::OutOfFuel)
    } else if player.ruoka <= 0 {
        Some(Ending::Starved)
    } else if state.time_left <= 0 {
        Some(Ending::OutOfTime)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{helsinki, pilot, state_at};

    fn dest(distance: f64) -> Destination {
        Destination {
            country: "Sweden".to_string(),
            iso: "SE".to_string(),
            icao: "ESSA".to_string(),
            distance,
        }
    }

    #[test]
    fn low_fuel_blocks_every_destination() {
        let mut player = pilot();
        player.fuel = 25;
        let state = state_at(helsinki());
        for distance in [0.0, 10.0, 399.0, 5_000.0] {
            assert!(!can_fly(Some(&player), Some(&state), &dest(distance)));
        }
    }

    #[test]
    fn range_limits_distance() {
        let mut player = pilot();
        player.fuel = 40;
        let mut state = state_at(helsinki());
        state.range_km = 500.0;
        assert!(!can_fly(Some(&player), Some(&state), &dest(600.0)));
        assert!(can_fly(Some(&player), Some(&state), &dest(400.0)));
        assert!(can_fly(Some(&player), Some(&state), &dest(500.0)));
    }

    #[test]
    fn missing_snapshots_cannot_fly() {
        let state = state_at(helsinki());
        assert!(!can_fly(None, Some(&state), &dest(1.0)));
        assert!(!can_fly(Some(&pilot()), None, &dest(1.0)));
    }

    #[test]
    fn victory_wins_over_simultaneous_defeat() {
        let mut player = pilot();
        player.rakettiosat = 4;
        player.fuel = 0;
        player.ruoka = 0;
        let mut state = state_at(helsinki());
        state.time_left = 0;
        assert_eq!(
            evaluate_ending(Some(&state), Some(&player)),
            Some(Ending::Victory)
        );
    }

    #[test]
    fn all_parts_abroad_is_not_victory() {
        let mut player = pilot();
        player.rakettiosat = 4;
        let mut state = state_at(helsinki());
        state.location.iso_country = "SE".to_string();
        assert_eq!(evaluate_ending(Some(&state), Some(&player)), None);
    }

    #[test]
    fn defeats_follow_fuel_food_time_order() {
        let state = state_at(helsinki());
        let mut player = pilot();
        player.fuel = 0;
        player.ruoka = 0;
        assert_eq!(
            evaluate_ending(Some(&state), Some(&player)),
            Some(Ending::OutOfFuel)
        );

        player.fuel = 10;
        assert_eq!(
            evaluate_ending(Some(&state), Some(&player)),
            Some(Ending::Starved)
        );

        player.ruoka = 1;
        let mut late = state.clone();
        late.time_left = -12;
        assert_eq!(
            evaluate_ending(Some(&late), Some(&player)),
            Some(Ending::OutOfTime)
        );
        assert_eq!(evaluate_ending(Some(&state), Some(&player)), None);
    }

    #[test]
    fn missing_snapshots_never_end_the_game() {
        let mut player = pilot();
        player.fuel = 0;
        assert_eq!(evaluate_ending(None, Some(&player)), None);
        assert_eq!(evaluate_ending(Some(&state_at(helsinki())), None), None);
    }

    #[test]
    fn endings_have_stable_labels() {
        assert_eq!(Ending::OutOfFuel.to_string(), "out_of_fuel");
        assert!(Ending::Victory.is_victory());
        assert!(Ending::Starved.message().contains("food"));
    }
}
