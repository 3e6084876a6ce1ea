//! Scripted sessions driving the real controller against the simulation.
use anyhow::{Result, anyhow, ensure};
use rocketrun_game::constants::{
    HOME_COUNTRY, ROCKET_PARTS_REQUIRED, STORAGE_KEY_PLAYER, STORAGE_KEY_STATE,
};
use rocketrun_game::testing::RecordingView;
use rocketrun_game::{Ending, GameController, MemoryStore, Page, Role};
use serde::Serialize;
use std::rc::Rc;

use crate::policy::{Move, next_move};
use crate::sim::SimulatedBackend;

pub type Controller = GameController<Rc<SimulatedBackend>, Rc<MemoryStore>, RecordingView>;

/// Upper bound on autopilot moves in one run.
pub const MAX_STEPS: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Smoke,
    RoleMapping,
    Persistence,
    FullRun,
}

impl ScenarioKind {
    pub const ALL: [Self; 4] = [Self::Smoke, Self::RoleMapping, Self::Persistence, Self::FullRun];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::RoleMapping => "role-mapping",
            Self::Persistence => "persistence",
            Self::FullRun => "full-run",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Smoke => "Start, pick a role and render the game view",
            Self::RoleMapping => "Every role reaches the service under its service name",
            Self::Persistence => "A reloaded game page renders the stored session",
            Self::FullRun => "Autopilot plays until the game ends",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// # Errors
    ///
    /// Returns the first expectation the run violated.
    pub async fn run(self, seed: u64) -> Result<RunSummary> {
        match self {
            Self::Smoke => smoke(seed).await,
            Self::RoleMapping => role_mapping(seed).await,
            Self::Persistence => persistence(seed).await,
            Self::FullRun => full_run(seed).await,
        }
    }
}

/// What happened during one scripted session.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub role: String,
    pub steps: usize,
    pub flights: usize,
    pub ending: Option<Ending>,
    pub stranded: bool,
    pub parts_collected: u8,
    pub decisions: Vec<String>,
}

impl RunSummary {
    fn new(seed: u64, role: Role) -> Self {
        Self {
            seed,
            role: role.id().to_string(),
            steps: 0,
            flights: 0,
            ending: None,
            stranded: false,
            parts_collected: 0,
            decisions: Vec::new(),
        }
    }

    #[must_use]
    pub fn outcome(&self) -> String {
        match (self.ending, self.stranded) {
            (Some(ending), _) => ending.to_string(),
            (None, true) => "stranded".to_string(),
            (None, false) => "in progress".to_string(),
        }
    }
}

/// One browser profile: a service connection plus `localStorage`.
struct Session {
    backend: Rc<SimulatedBackend>,
    storage: Rc<MemoryStore>,
}

impl Session {
    fn new(seed: u64) -> Self {
        Self {
            backend: Rc::new(SimulatedBackend::new(seed)),
            storage: Rc::new(MemoryStore::new()),
        }
    }

    /// A freshly loaded page.
    fn page(&self) -> Controller {
        GameController::new(
            Rc::clone(&self.backend),
            Rc::clone(&self.storage),
            RecordingView::new(),
        )
    }

    /// Load the selection page, choose `role`, then load the game page.
    async fn enter(&self, role: Role) -> Result<Controller> {
        let select = self.page();
        select.enter_role_select().await;
        ensure!(select.cache().state.is_some(), "start did not cache a state");
        ensure!(
            select.choose_role(role.id()).await,
            "role {role} was rejected: {:?}",
            select.view().take_alerts()
        );
        ensure!(
            select.view().snapshot().pages == [Page::Game],
            "role selection did not navigate to the game"
        );

        let game = self.page();
        game.enter_game().await;
        Ok(game)
    }
}

fn role_for(seed: u64) -> Role {
    let idx = usize::try_from(seed % 3).unwrap_or(0);
    Role::ALL[idx]
}

async fn smoke(seed: u64) -> Result<RunSummary> {
    let role = role_for(seed);
    let session = Session::new(seed);
    let game = session.enter(role).await?;

    let view = game.view().snapshot();
    let status = view
        .status
        .ok_or_else(|| anyhow!("status panel never rendered"))?;
    ensure!(status.country == HOME_COUNTRY, "run did not start at home");
    ensure!(!view.cards.is_empty(), "no destinations offered from Helsinki");
    ensure!(
        view.cards.iter().all(|card| card.can_fly),
        "a fresh {role} cannot reach every listed destination"
    );
    ensure!(view.alerts.is_empty(), "unexpected alerts: {:?}", view.alerts);

    let mut summary = RunSummary::new(seed, role);
    summary.decisions.push(format!("{} destinations", view.cards.len()));
    Ok(summary)
}

async fn role_mapping(seed: u64) -> Result<RunSummary> {
    for role in Role::ALL {
        let session = Session::new(seed);
        let game = session.enter(role).await?;
        let player = game
            .cache()
            .player
            .clone()
            .ok_or_else(|| anyhow!("no player cached for {role}"))?;
        let kit = role.kit();
        ensure!(
            player.rooli.as_deref() == Some(role.server_name()),
            "{role} arrived as {:?}",
            player.rooli
        );
        ensure!(
            (player.ruoka, player.fuel, player.ammo) == (kit.food, kit.fuel, kit.ammo),
            "{role} got the wrong kit"
        );
    }

    let session = Session::new(seed);
    let select = session.page();
    select.enter_role_select().await;
    ensure!(
        !select.choose_role("astronaut").await,
        "unknown role was accepted"
    );
    let alerts = select.view().take_alerts();
    ensure!(
        alerts.len() == 1 && alerts[0].starts_with("Error choosing character: "),
        "unexpected alerts for an unknown role: {alerts:?}"
    );
    ensure!(
        select.view().snapshot().pages.is_empty(),
        "navigated despite a rejected role"
    );

    let mut summary = RunSummary::new(seed, role_for(seed));
    summary.decisions.push("all roles mapped".to_string());
    Ok(summary)
}

async fn persistence(seed: u64) -> Result<RunSummary> {
    let role = role_for(seed);
    let session = Session::new(seed);
    let game = session.enter(role).await?;
    let mut summary = RunSummary::new(seed, role);

    for _ in 0..3 {
        if step(&game, &mut summary).await?.is_break() {
            break;
        }
    }
    if summary.ending.is_some() {
        return Ok(summary);
    }

    let reloaded = session.page();
    reloaded.enter_game().await;
    ensure!(
        *reloaded.cache() == *game.cache(),
        "reloaded page disagrees with the last render"
    );
    ensure!(
        reloaded.view().snapshot().status == game.view().snapshot().status,
        "reloaded status panel differs"
    );

    session.storage.insert_raw(STORAGE_KEY_PLAYER, "{\"fuel\": ");
    let degraded = session.page();
    degraded.enter_game().await;
    let view = degraded.view().snapshot();
    ensure!(degraded.cache().player.is_none(), "corrupt player was loaded");
    ensure!(view.status_renders == 0, "status rendered without a player");
    ensure!(
        view.cards.iter().all(|card| !card.can_fly),
        "destinations flyable without a player"
    );
    Ok(summary)
}

async fn full_run(seed: u64) -> Result<RunSummary> {
    let role = role_for(seed);
    let session = Session::new(seed);
    let game = session.enter(role).await?;
    let mut summary = RunSummary::new(seed, role);

    while summary.steps < MAX_STEPS {
        if step(&game, &mut summary).await?.is_break() {
            break;
        }
    }
    ensure!(
        summary.ending.is_some() || summary.stranded,
        "no ending after {MAX_STEPS} moves"
    );

    if let Some(ending) = summary.ending {
        let view = game.view().snapshot();
        ensure!(
            view.alerts.last().map(String::as_str) == Some(ending.message()),
            "ending was not announced"
        );
        ensure!(
            view.pages.last() == Some(&Page::RoleSelect),
            "ending did not return to character selection"
        );
        ensure!(
            session.storage.raw(STORAGE_KEY_STATE).is_none()
                && session.storage.raw(STORAGE_KEY_PLAYER).is_none(),
            "finished session left in storage"
        );
        if ending.is_victory() {
            let cache = game.cache();
            let home = cache
                .state
                .as_ref()
                .is_some_and(|state| state.location.iso_country == HOME_COUNTRY);
            ensure!(
                home && summary.parts_collected == ROCKET_PARTS_REQUIRED,
                "victory away from home or short of parts"
            );
        }
    }
    Ok(summary)
}

/// Play one autopilot move, checking the cache against the service.
async fn step(game: &Controller, summary: &mut RunSummary) -> Result<std::ops::ControlFlow<()>> {
    use std::ops::ControlFlow::{Break, Continue};

    let player = game
        .cache()
        .player
        .clone()
        .ok_or_else(|| anyhow!("no player cached"))?;
    let cards = game.view().snapshot().cards;
    let next = next_move(&player, &cards);
    summary.steps += 1;
    log::debug!("seed {} step {}: {next:?}", summary.seed, summary.steps);

    match next {
        Move::Eat => {
            ensure!(game.eat().await, "eating failed at hp {}", player.hp);
            summary.decisions.push("eat".to_string());
        }
        Move::Fight => {
            let won = game.fight().await;
            summary.decisions.push(format!("fight ({won:?})"));
        }
        Move::Fly { icao, reason } => {
            let ending = game.fly(&icao).await;
            summary.flights += 1;
            summary.decisions.push(format!("fly {icao} ({reason})"));
            if let Some(ending) = ending {
                log::info!("seed {} ended in {ending} after {} flights", summary.seed, summary.flights);
                summary.ending = Some(ending);
            }
        }
        Move::Stranded => {
            summary.stranded = true;
            summary.decisions.push("stranded".to_string());
            return Ok(Break(()));
        }
    }

    let collected = game.cache().player.as_ref().map_or(0, |p| p.rakettiosat);
    ensure!(
        collected >= summary.parts_collected,
        "rocket parts dropped from {} to {collected}",
        summary.parts_collected
    );
    summary.parts_collected = collected;

    let server = game.api().player();
    ensure!(
        game.cache().player == server,
        "cache drifted from the service: {:?} vs {server:?}",
        game.cache().player
    );

    if summary.ending.is_some() {
        Ok(Break(()))
    } else {
        Ok(Continue(()))
    }
}
