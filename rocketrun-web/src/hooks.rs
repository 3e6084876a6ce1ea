use rocketrun_game::GameController;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::HttpGameApi;
use crate::config::AppConfig;
use crate::storage::BrowserStorage;
use crate::view::YewView;

pub type WebController = GameController<HttpGameApi, BrowserStorage, YewView>;

/// Fresh view state for one page.
#[hook]
pub fn use_game_view() -> YewView {
    YewView {
        status: use_state(|| None),
        cards: use_state(Vec::new),
        messages: use_state(Vec::new),
        inventory: use_state(|| None),
        traveling: use_state(|| false),
        navigator: use_navigator(),
    }
}

/// Controller bound to the page's view, built once per mount.
#[hook]
pub fn use_controller(view: &YewView) -> Rc<WebController> {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let view = view.clone();
    use_memo((), move |_| {
        GameController::new(HttpGameApi::new(config), BrowserStorage, view)
    })
}
