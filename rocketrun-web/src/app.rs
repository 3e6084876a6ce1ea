use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::AppConfig;
use crate::router::{Route, switch};

#[derive(Properties, PartialEq, Default)]
pub struct Props {
    #[prop_or_default]
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &Props) -> Html {
    html! {
        <ContextProvider<AppConfig> context={props.config.clone()}>
            <BrowserRouter>
                <main class="rocketrun">
                    <Switch<Route> render={switch} />
                </main>
            </BrowserRouter>
        </ContextProvider<AppConfig>>
    }
}
