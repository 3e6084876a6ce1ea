use futures::executor::block_on;
use rocketrun_game::testing::{ApiCall, RecordingView, ScriptedApi};
use rocketrun_game::{
    ActionResponse, Destination, Ending, GameController, GameState, Location, MemoryStore, Page,
    PlayerState,
};
use std::rc::Rc;

fn location(name: &str, iso: &str) -> Location {
    Location {
        name: name.to_string(),
        iso_country: iso.to_string(),
        ..Location::default()
    }
}

fn state(at: Location, parts: &[&str], time_left: i32) -> GameState {
    GameState {
        location: at,
        time_left,
        range_km: 400.0,
        parts: parts.iter().map(ToString::to_string).collect(),
    }
}

fn fighter(fuel: i32, parts: u8) -> PlayerState {
    PlayerState {
        fuel,
        ruoka: 3,
        ammo: 60,
        hp: 100,
        rakettiosat: parts,
        rooli: Some("taistelija".to_string()),
    }
}

fn estonia() -> Destination {
    Destination {
        country: "Estonia".to_string(),
        iso: "EE".to_string(),
        icao: "EETN".to_string(),
        distance: 101.0,
    }
}

#[test]
fn session_survives_page_navigation() {
    let storage = Rc::new(MemoryStore::new());

    let select = GameController::new(ScriptedApi::new(), Rc::clone(&storage), RecordingView::new());
    select.api().queue_start(Ok(ActionResponse {
        state: Some(state(location("Helsinki", "FI"), &["EE"], 168)),
        player: None,
        ..ActionResponse::default()
    }));
    block_on(select.enter_role_select());
    select.api().queue_role(Ok(ActionResponse {
        player: Some(fighter(100, 0)),
        ..ActionResponse::default()
    }));
    assert!(block_on(select.choose_role("fighter")));
    assert_eq!(select.view().snapshot().pages, vec![Page::Game]);

    let game = GameController::new(ScriptedApi::new(), Rc::clone(&storage), RecordingView::new());
    game.api().queue_destinations(Ok(vec![estonia()]));
    block_on(game.enter_game());

    let view = game.view().snapshot();
    let status = view.status.expect("status rendered from storage");
    assert_eq!(status.location, "Helsinki");
    assert_eq!(status.ammo, 60);
    assert_eq!(view.cards.len(), 1);
    assert!(view.cards[0].has_part);
    assert!(view.cards[0].can_fly);
}

#[test]
fn full_trip_collects_parts_and_wins_at_home() {
    let storage = Rc::new(MemoryStore::new());
    storage.insert_raw(
        "game_state",
        &serde_json::to_string(&state(location("Helsinki", "FI"), &["EE"], 168)).unwrap(),
    );
    storage.insert_raw("player", &serde_json::to_string(&fighter(100, 3)).unwrap());

    let game = GameController::new(ScriptedApi::new(), Rc::clone(&storage), RecordingView::new());
    game.api().queue_destinations(Ok(vec![estonia()]));
    block_on(game.enter_game());

    game.api()
        .queue_fly(Ok(ActionResponse {
            state: Some(state(location("Tallinn", "EE"), &[], 156)),
            player: Some(fighter(70, 4)),
            messages: vec!["You found a rocket part in Estonia!".to_string()],
            ..ActionResponse::default()
        }))
        .queue_destinations(Ok(Vec::new()));
    assert_eq!(block_on(game.fly("EETN")), None);
    assert_eq!(game.view().snapshot().messages.len(), 1);

    // A stale reply claiming fewer parts must not undo the pickup.
    game.api().queue_fly(Ok(ActionResponse {
        state: Some(state(location("Helsinki", "FI"), &[], 144)),
        player: Some(fighter(40, 2)),
        ..ActionResponse::default()
    }));
    assert_eq!(block_on(game.fly("EFHK")), Some(Ending::Victory));

    let view = game.view().snapshot();
    assert_eq!(view.pages, vec![Page::RoleSelect]);
    assert_eq!(view.alerts, vec![Ending::Victory.message()]);
    assert!(storage.raw("game_state").is_none());
    assert_eq!(
        game.api().calls(),
        vec![
            ApiCall::Destinations,
            ApiCall::Fly("EETN".to_string()),
            ApiCall::Destinations,
            ApiCall::Fly("EFHK".to_string()),
        ]
    );
}

#[test]
fn running_out_of_time_ends_the_game() {
    let storage = Rc::new(MemoryStore::new());
    let game = GameController::new(ScriptedApi::new(), storage, RecordingView::new());
    game.api().queue_fly(Ok(ActionResponse {
        state: Some(state(location("Riga", "LV"), &["EE"], 0)),
        player: Some(fighter(40, 1)),
        ..ActionResponse::default()
    }));
    assert_eq!(block_on(game.fly("EVRA")), Some(Ending::OutOfTime));
}

#[test]
fn corrupt_storage_still_renders_what_survived() {
    let storage = Rc::new(MemoryStore::new());
    storage.insert_raw("game_state", "{\"location\": ");
    storage.insert_raw("player", &serde_json::to_string(&fighter(100, 0)).unwrap());

    let game = GameController::new(ScriptedApi::new(), storage, RecordingView::new());
    block_on(game.enter_game());

    assert!(game.cache().state.is_none());
    assert_eq!(game.cache().player, Some(fighter(100, 0)));
    assert_eq!(game.view().snapshot().status_renders, 0);
}
