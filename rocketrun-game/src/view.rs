//! View models derived from the cache, and the sink they are rendered into.
//!
//! Nothing here touches a document: the controller computes complete view
//! models and hands them to a [`GameView`], which the browser front end
//! implements with real markup and tests implement with a recorder.
use serde::{Deserialize, Serialize};

use crate::constants::{LABEL_CANNOT_FLY, LABEL_FLY, MAX_HP, ROCKET_PARTS_REQUIRED};
use crate::rules::can_fly;
use crate::state::{Destination, GameState, PlayerState};

/// Screens the controller can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    RoleSelect,
    Game,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub location: String,
    pub country: String,
    pub fuel: i32,
    pub food: i32,
    pub ammo: i32,
    pub hp: String,
    pub time_left: i32,
    pub range_km: f64,
    pub parts_collected: u8,
    /// One flag per rocket part badge, lit when collected.
    pub part_badges: Vec<bool>,
    /// Countries still hiding a part.
    pub parts_remaining: Vec<String>,
}

impl StatusView {
    /// Status panel contents, or `None` unless both snapshots are cached.
    #[must_use]
    pub fn from_cache(state: Option<&GameState>, player: Option<&PlayerState>) -> Option<Self> {
        let (state, player) = (state?, player?);
        Some(Self {
            location: state.location.name.clone(),
            country: state.location.iso_country.clone(),
            fuel: player.fuel,
            food: player.ruoka,
            ammo: player.ammo,
            hp: hp_label(player.hp),
            time_left: state.time_left,
            range_km: state.range_km,
            parts_collected: player.rakettiosat,
            part_badges: (1..=ROCKET_PARTS_REQUIRED)
                .map(|n| player.rakettiosat >= n)
                .collect(),
            parts_remaining: state.parts.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationCard {
    pub country: String,
    pub iso: String,
    pub icao: String,
    pub distance_km: f64,
    pub can_fly: bool,
    /// Flagged when the country still hides a rocket part.
    pub has_part: bool,
    pub label: &'static str,
}

impl DestinationCard {
    #[must_use]
    pub fn distance_label(&self) -> String {
        format!("{:.0} km", self.distance_km)
    }
}

/// Build the full destination grid for the cached snapshots.
#[must_use]
pub fn destination_cards(
    destinations: &[Destination],
    state: Option<&GameState>,
    player: Option<&PlayerState>,
) -> Vec<DestinationCard> {
    destinations
        .iter()
        .map(|dest| {
            let eligible = can_fly(player, state, dest);
            DestinationCard {
                country: dest.country.clone(),
                iso: dest.iso.clone(),
                icao: dest.icao.clone(),
                distance_km: dest.distance,
                can_fly: eligible,
                has_part: state.is_some_and(|s| s.has_part_in(&dest.iso)),
                label: if eligible { LABEL_FLY } else { LABEL_CANNOT_FLY },
            }
        })
        .collect()
}

/// Read-only inventory modal contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryView {
    pub food: i32,
    pub fuel: i32,
    pub ammo: i32,
    pub hp: String,
}

impl From<&PlayerState> for InventoryView {
    fn from(player: &PlayerState) -> Self {
        Self {
            food: player.ruoka,
            fuel: player.fuel,
            ammo: player.ammo,
            hp: hp_label(player.hp),
        }
    }
}

fn hp_label(hp: i32) -> String {
    format!("{hp}/{MAX_HP}")
}

/// Render-command sink for the controller.
///
/// All methods take `&self`; implementations own whatever interior
/// mutability their surface needs.
pub trait GameView {
    fn render_status(&self, status: &StatusView);

    /// Replace the whole destination grid.
    fn render_destinations(&self, cards: &[DestinationCard]);

    fn show_messages(&self, messages: &[String]);

    fn clear_messages(&self);

    fn open_inventory(&self, inventory: &InventoryView);

    fn close_inventory(&self);

    /// Blocking alert.
    fn alert(&self, message: &str);

    fn navigate(&self, page: Page);

    /// Fire-and-forget plane animation; reverts on its own.
    fn play_travel_animation(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{helsinki, pilot, state_at};

    fn destinations() -> Vec<Destination> {
        vec![
            Destination {
                country: "Estonia".to_string(),
                iso: "EE".to_string(),
                icao: "EETN".to_string(),
                distance: 101.4,
            },
            Destination {
                country: "Latvia".to_string(),
                iso: "LV".to_string(),
                icao: "EVRA".to_string(),
                distance: 612.0,
            },
        ]
    }

    #[test]
    fn status_requires_both_snapshots() {
        let state = state_at(helsinki());
        assert!(StatusView::from_cache(Some(&state), None).is_none());
        assert!(StatusView::from_cache(None, Some(&pilot())).is_none());
    }

    #[test]
    fn status_lights_collected_badges() {
        let mut player = pilot();
        player.rakettiosat = 2;
        player.hp = 80;
        let status = StatusView::from_cache(Some(&state_at(helsinki())), Some(&player)).unwrap();
        assert_eq!(status.part_badges, vec![true, true, false, false]);
        assert_eq!(status.hp, "80/100");
        assert_eq!(status.parts_remaining, vec!["SE", "EE"]);
        assert_eq!(status.country, "FI");
    }

    #[test]
    fn cards_flag_part_countries_and_eligibility() {
        let state = state_at(helsinki());
        let player = pilot();
        let cards = destination_cards(&destinations(), Some(&state), Some(&player));
        assert_eq!(cards.len(), 2);

        assert!(cards[0].has_part);
        assert!(cards[0].can_fly);
        assert_eq!(cards[0].label, LABEL_FLY);
        assert_eq!(cards[0].distance_label(), "101 km");

        assert!(!cards[1].has_part);
        assert!(!cards[1].can_fly);
        assert_eq!(cards[1].label, LABEL_CANNOT_FLY);
    }

    #[test]
    fn cards_without_player_are_all_disabled() {
        let cards = destination_cards(&destinations(), Some(&state_at(helsinki())), None);
        assert!(cards.iter().all(|card| !card.can_fly));
    }

    #[test]
    fn inventory_reflects_player() {
        let view = InventoryView::from(&pilot());
        assert_eq!(view.fuel, 130);
        assert_eq!(view.food, 3);
        assert_eq!(view.hp, "100/100");
    }
}
