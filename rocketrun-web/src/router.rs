use rocketrun_game::Page;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::game::GamePage;
use crate::pages::not_found::NotFound;
use crate::pages::select::SelectPage;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Select,
    #[at("/game")]
    Game,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::RoleSelect => Self::Select,
            Page::Game => Self::Game,
        }
    }
}

#[allow(clippy::needless_pass_by_value)] // `Switch` hands routes over by value.
#[must_use]
pub fn switch(route: Route) -> Html {
    match route {
        Route::Select => html! { <SelectPage /> },
        Route::Game => html! { <GamePage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
