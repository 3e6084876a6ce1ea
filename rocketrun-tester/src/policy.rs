//! Autopilot deciding the next move from what a player would see.
use rocketrun_game::constants::{FLIGHT_FUEL_COST, HOME_COUNTRY, ROCKET_PARTS_REQUIRED};
use rocketrun_game::{DestinationCard, PlayerState};

/// Eat once HP drops below this.
pub const EAT_BELOW_HP: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    Eat,
    Fly { icao: String, reason: &'static str },
    /// Fight for loot when grounded by low fuel.
    Fight,
    /// Nothing useful left to do.
    Stranded,
}

fn fly(card: &DestinationCard, reason: &'static str) -> Move {
    Move::Fly {
        icao: card.icao.clone(),
        reason,
    }
}

fn by_distance(a: &&&DestinationCard, b: &&&DestinationCard) -> std::cmp::Ordering {
    a.distance_km.total_cmp(&b.distance_km)
}

#[must_use]
pub fn next_move(player: &PlayerState, cards: &[DestinationCard]) -> Move {
    // The last ration is kept: an empty larder ends the run.
    if player.hp < EAT_BELOW_HP && player.ruoka > 1 {
        return Move::Eat;
    }

    let flyable: Vec<&DestinationCard> = cards.iter().filter(|card| card.can_fly).collect();
    if player.rakettiosat >= ROCKET_PARTS_REQUIRED {
        if let Some(home) = flyable.iter().find(|card| card.iso == HOME_COUNTRY) {
            return fly(home, "heading home");
        }
    } else if let Some(part) = flyable.iter().filter(|card| card.has_part).min_by(by_distance) {
        return fly(part, "rocket part");
    }
    if let Some(far) = flyable.iter().max_by(by_distance) {
        return fly(far, "exploring");
    }

    if !cards.is_empty() && player.fuel < FLIGHT_FUEL_COST && player.ammo > 0 {
        Move::Fight
    } else {
        Move::Stranded
    }
}
