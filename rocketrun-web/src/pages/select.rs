use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::role_select::RoleSelect;
use crate::hooks::{use_controller, use_game_view};

/// Character selection. Mounting it starts a fresh game on the service.
#[function_component(SelectPage)]
pub fn select_page() -> Html {
    let view = use_game_view();
    let controller = use_controller(&view);
    let choosing = use_state(|| false);

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            spawn_local(async move { controller.enter_role_select().await });
            || {}
        });
    }

    let on_select = {
        let choosing = choosing.clone();
        Callback::from(move |role: String| {
            let controller = controller.clone();
            let choosing = choosing.clone();
            choosing.set(true);
            spawn_local(async move {
                if !controller.choose_role(&role).await {
                    choosing.set(false);
                }
            });
        })
    };

    html! {
        <section class="panel role-select">
            <h1>{"Choose your character"}</h1>
            <p>{"Collect four rocket parts around Europe and bring them home to Finland."}</p>
            <RoleSelect {on_select} disabled={*choosing} />
        </section>
    }
}
