//! In-process stand-in for the game service.
//!
//! Replies are rendered to JSON and decoded through the same path the
//! browser client uses, so wire-format drift shows up here too.
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rocketrun_game::constants::{FLIGHT_FUEL_COST, HOME_COUNTRY, MAX_HP, ROCKET_PARTS_REQUIRED};
use rocketrun_game::{
    ActionResponse, ApiError, Destination, GameApi, GameState, Location, PlayerState, Role,
    interpret_destinations, interpret_reply,
};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const START_AIRPORT: &str = "EFHK";
pub const START_RANGE_KM: f64 = 400.0;
pub const START_TIME_H: i32 = 168;
pub const FLIGHT_TIME_H: i32 = 12;
pub const RANGE_GAIN_KM: f64 = 50.0;
pub const FLIGHT_HP_LOSS: i32 = 10;
pub const MEAL_HP_GAIN: i32 = 10;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airport {
    pub ident: &'static str,
    pub name: &'static str,
    pub municipality: &'static str,
    pub iso: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    fn location(&self) -> Location {
        Location {
            name: self.name.to_string(),
            iso_country: self.iso.to_string(),
            ident: Some(self.ident.to_string()),
            municipality: Some(self.municipality.to_string()),
            lat: Some(self.lat),
            lon: Some(self.lon),
        }
    }
}

macro_rules! airport {
    ($ident:literal, $name:literal, $city:literal, $iso:literal, $country:literal, $lat:literal, $lon:literal) => {
        Airport {
            ident: $ident,
            name: $name,
            municipality: $city,
            iso: $iso,
            country: $country,
            lat: $lat,
            lon: $lon,
        }
    };
}

/// Main airports of the simulated map, one or two per country.
pub const AIRPORTS: &[Airport] = &[
    airport!("EFHK", "Helsinki Vantaa Airport", "Helsinki", "FI", "Finland", 60.3172, 24.9633),
    airport!("EFTU", "Turku Airport", "Turku", "FI", "Finland", 60.5141, 22.2628),
    airport!("ESSA", "Stockholm-Arlanda Airport", "Stockholm", "SE", "Sweden", 59.6519, 17.9186),
    airport!("ESGG", "Gothenburg-Landvetter Airport", "Gothenburg", "SE", "Sweden", 57.6628, 12.2798),
    airport!("EETN", "Lennart Meri Tallinn Airport", "Tallinn", "EE", "Estonia", 59.4133, 24.8328),
    airport!("EVRA", "Riga International Airport", "Riga", "LV", "Latvia", 56.9236, 23.9711),
    airport!("EYVI", "Vilnius International Airport", "Vilnius", "LT", "Lithuania", 54.6341, 25.2858),
    airport!("ENGM", "Oslo Airport, Gardermoen", "Oslo", "NO", "Norway", 60.1939, 11.1004),
    airport!("EKCH", "Copenhagen Kastrup Airport", "Copenhagen", "DK", "Denmark", 55.6179, 12.6560),
    airport!("EPWA", "Warsaw Chopin Airport", "Warsaw", "PL", "Poland", 52.1657, 20.9671),
    airport!("EDDB", "Berlin Brandenburg Airport", "Berlin", "DE", "Germany", 52.3667, 13.5033),
    airport!("ULLI", "Pulkovo Airport", "St. Petersburg", "RU", "Russia", 59.8003, 30.2625),
    airport!("UMMS", "Minsk National Airport", "Minsk", "BY", "Belarus", 53.8825, 28.0325),
    airport!("EHAM", "Amsterdam Airport Schiphol", "Amsterdam", "NL", "Netherlands", 52.3086, 4.7639),
    airport!("LKPR", "Vaclav Havel Airport Prague", "Prague", "CZ", "Czechia", 50.1008, 14.2600),
    airport!("EBBR", "Brussels Airport", "Brussels", "BE", "Belgium", 50.9014, 4.4844),
];

#[must_use]
pub fn airport(icao: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|ap| ap.ident == icao)
}

fn country_name(iso: &str) -> &str {
    AIRPORTS
        .iter()
        .find(|ap| ap.iso == iso)
        .map_or(iso, |ap| ap.country)
}

/// Great-circle distance between two `(lat, lon)` points in degrees.
#[must_use]
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lat2) = (from.0.to_radians(), to.0.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (to.1 - from.1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

fn coords(location: &Location) -> Option<(f64, f64)> {
    Some((location.lat?, location.lon?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loot {
    pub food: i32,
    pub fuel: i32,
    pub ammo: i32,
}

impl Loot {
    fn roll(rng: &mut ChaCha8Rng) -> Self {
        let food = match rng.gen_range(1..=5) {
            3 | 4 => 1,
            5 => 2,
            _ => 0,
        };
        let fuel = rng.gen_range(5..=30);
        let ammo = i32::from(rng.gen_range(1..=5) <= 2);
        Self { food, fuel, ammo }
    }

    fn apply(self, player: &mut PlayerState) {
        player.ruoka += self.food;
        player.fuel += self.fuel;
        player.ammo += self.ammo;
    }

    fn describe(self) -> Option<String> {
        let gained: Vec<String> = [("ruoka", self.food), ("fuel", self.fuel), ("ammo", self.ammo)]
            .into_iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(key, amount)| format!("{key}+{amount}"))
            .collect();
        (!gained.is_empty()).then(|| format!("You got loot: {}.", gained.join(", ")))
    }
}

/// Spend one ammo to win and collect loot; no ammo means a lost fight.
fn skirmish(rng: &mut ChaCha8Rng, player: &mut PlayerState) -> bool {
    if player.ammo <= 0 {
        return false;
    }
    player.ammo -= 1;
    Loot::roll(rng).apply(player);
    true
}

fn kit_for(server_name: &str) -> Option<PlayerState> {
    let name = server_name.to_lowercase();
    let role = Role::ALL.into_iter().find(|role| role.server_name() == name)?;
    let kit = role.kit();
    Some(PlayerState {
        fuel: kit.fuel,
        ruoka: kit.food,
        ammo: kit.ammo,
        hp: MAX_HP,
        rakettiosat: 0,
        rooli: Some(name),
    })
}

fn reply(status: u16, body: &Value) -> Result<ActionResponse, ApiError> {
    interpret_reply((200..300).contains(&status), status, &body.to_string())
}

fn no_game() -> Result<ActionResponse, ApiError> {
    reply(400, &json!({ "Error": "No game running" }))
}

#[derive(Debug, Default)]
struct World {
    state: Option<GameState>,
    player: Option<PlayerState>,
}

/// Single-game service simulation, deterministic for a given seed.
#[derive(Debug)]
pub struct SimulatedBackend {
    rng: RefCell<ChaCha8Rng>,
    world: RefCell<World>,
}

impl SimulatedBackend {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
            world: RefCell::default(),
        }
    }

    /// Current server-side state, for assertions.
    #[must_use]
    pub fn state(&self) -> Option<GameState> {
        self.world.borrow().state.clone()
    }

    #[must_use]
    pub fn player(&self) -> Option<PlayerState> {
        self.world.borrow().player.clone()
    }

    fn spawn_parts(&self) -> Vec<String> {
        let mut countries: Vec<&str> = AIRPORTS
            .iter()
            .map(|ap| ap.iso)
            .filter(|iso| *iso != HOME_COUNTRY)
            .collect();
        countries.sort_unstable();
        countries.dedup();
        countries
            .choose_multiple(&mut *self.rng.borrow_mut(), usize::from(ROCKET_PARTS_REQUIRED))
            .map(ToString::to_string)
            .collect()
    }

    fn new_game(&self) -> Option<GameState> {
        let start = airport(START_AIRPORT)?;
        Some(GameState {
            location: start.location(),
            time_left: START_TIME_H,
            range_km: START_RANGE_KM,
            parts: self.spawn_parts(),
        })
    }

    fn options(state: &GameState) -> Vec<Destination> {
        let Some(origin) = coords(&state.location) else {
            return Vec::new();
        };
        let mut best: BTreeMap<&str, Destination> = BTreeMap::new();
        for ap in AIRPORTS
            .iter()
            .filter(|ap| ap.iso != state.location.iso_country)
        {
            let distance = haversine_km(origin, (ap.lat, ap.lon));
            if distance > state.range_km {
                continue;
            }
            let closer = best.get(ap.iso).is_none_or(|prev| distance < prev.distance);
            if closer {
                best.insert(
                    ap.iso,
                    Destination {
                        country: ap.country.to_string(),
                        iso: ap.iso.to_string(),
                        icao: ap.ident.to_string(),
                        distance,
                    },
                );
            }
        }
        let mut options: Vec<Destination> = best.into_values().collect();
        options.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        options
    }

    fn travel(&self, world: &mut World, icao: &str) -> Option<Vec<String>> {
        let dest = airport(icao)?;
        let (Some(state), Some(player)) = (world.state.as_mut(), world.player.as_mut()) else {
            return None;
        };
        let distance = haversine_km(coords(&state.location)?, (dest.lat, dest.lon));
        if distance > state.range_km || player.fuel < FLIGHT_FUEL_COST {
            return None;
        }

        player.fuel -= FLIGHT_FUEL_COST;
        player.hp = (player.hp - FLIGHT_HP_LOSS).max(0);
        state.time_left -= FLIGHT_TIME_H;
        state.range_km += RANGE_GAIN_KM;
        state.location = dest.location();

        let country = country_name(dest.iso);
        let mut messages = vec![format!(
            "Flew to {country}. Time -{FLIGHT_TIME_H}h, Fuel -{FLIGHT_FUEL_COST}, Range +{RANGE_GAIN_KM:.0}, HP -{FLIGHT_HP_LOSS}."
        )];
        if state.has_part_in(dest.iso) {
            state.parts.retain(|iso| iso != dest.iso);
            player.rakettiosat += 1;
            messages.push(format!("You found a rocket part in {country}!"));
        }

        let mut rng = self.rng.borrow_mut();
        let loot = Loot::roll(&mut rng);
        loot.apply(player);
        messages.extend(loot.describe());
        if rng.gen_bool(0.5) {
            if skirmish(&mut rng, player) {
                messages.push("Enemy encountered! You used one ammo and won.".to_string());
            } else {
                messages
                    .push("Enemy encountered but you had no ammo. You lost the fight!".to_string());
            }
        }
        Some(messages)
    }
}

#[async_trait(?Send)]
impl GameApi for SimulatedBackend {
    async fn start_game(&self) -> Result<ActionResponse, ApiError> {
        let state = self.new_game();
        let mut world = self.world.borrow_mut();
        world.state = state;
        world.player = None;
        reply(200, &json!({ "state": world.state, "player": null }))
    }

    async fn choose_role(&self, role: &str) -> Result<ActionResponse, ApiError> {
        let Some(player) = kit_for(role) else {
            return reply(
                400,
                &json!({ "error": format!("Unknown role {role:?}: use kokki, pilotti or taistelija") }),
            );
        };
        let mut world = self.world.borrow_mut();
        world.player = Some(player);
        reply(200, &json!({ "state": world.state, "player": world.player }))
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        let world = self.world.borrow();
        let Some(state) = world.state.as_ref() else {
            let body = json!({ "Error": "No game running" }).to_string();
            return interpret_destinations(false, 400, &body);
        };
        let body = serde_json::to_string(&Self::options(state))
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        interpret_destinations(true, 200, &body)
    }

    async fn fly(&self, icao: &str) -> Result<ActionResponse, ApiError> {
        let mut world = self.world.borrow_mut();
        if world.state.is_none() {
            return no_game();
        }
        if icao.is_empty() {
            return reply(400, &json!({ "Error": "No ICAO provided" }));
        }
        if world.player.is_none() {
            return reply(400, &json!({ "Error": "No player" }));
        }
        match self.travel(&mut world, icao) {
            Some(messages) => reply(
                200,
                &json!({ "state": world.state, "player": world.player, "messages": messages }),
            ),
            None => reply(200, &json!({ "Error": "Flying failed" })),
        }
    }

    async fn eat(&self) -> Result<ActionResponse, ApiError> {
        let mut world = self.world.borrow_mut();
        if world.state.is_none() {
            return no_game();
        }
        let Some(player) = world.player.as_mut() else {
            return reply(400, &json!({ "Error": "No player" }));
        };
        if player.ruoka <= 0 {
            return reply(400, &json!({ "error": "You have no food to eat." }));
        }
        if player.hp >= MAX_HP {
            return reply(400, &json!({ "error": "Your HP is already full." }));
        }
        player.ruoka -= 1;
        player.hp = (player.hp + MEAL_HP_GAIN).min(MAX_HP);
        reply(200, &json!({ "state": world.state, "player": world.player }))
    }

    async fn fight(&self) -> Result<ActionResponse, ApiError> {
        let mut world = self.world.borrow_mut();
        if world.state.is_none() {
            return no_game();
        }
        let Some(player) = world.player.as_mut() else {
            return reply(400, &json!({ "Error": "No player" }));
        };
        let won = skirmish(&mut self.rng.borrow_mut(), player);
        reply(
            200,
            &json!({ "state": world.state, "player": world.player, "result": won }),
        )
    }
}
