use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{"Lost in the clouds"}</h1>
            <p>{"There is no airport at this address."}</p>
            <Link<Route> to={Route::Select}>{"Back to character selection"}</Link<Route>>
        </section>
    }
}
