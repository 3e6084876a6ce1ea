use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::destination_grid::DestinationGrid;
use crate::components::inventory_modal::InventoryModal;
use crate::components::messages_panel::MessagesPanel;
use crate::components::status_panel::StatusPanel;
use crate::hooks::{use_controller, use_game_view};

#[function_component(GamePage)]
pub fn game_page() -> Html {
    let view = use_game_view();
    let controller = use_controller(&view);

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            spawn_local(async move { controller.enter_game().await });
            || {}
        });
    }

    let on_fly = {
        let controller = controller.clone();
        Callback::from(move |icao: String| {
            let controller = controller.clone();
            spawn_local(async move {
                if let Some(ending) = controller.fly(&icao).await {
                    log::info!("Run finished: {ending}");
                }
            });
        })
    };
    let on_eat = {
        let controller = controller.clone();
        Callback::from(move |()| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.eat().await;
            });
        })
    };
    let on_fight = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.fight().await;
            });
        })
    };
    let on_open_inventory = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.open_inventory())
    };
    let on_close_inventory = {
        let controller = controller.clone();
        Callback::from(move |()| controller.close_inventory())
    };
    let on_acknowledge = {
        let controller = controller.clone();
        Callback::from(move |()| controller.acknowledge_messages())
    };
    let on_to_inventory = Callback::from(move |()| controller.messages_to_inventory());

    html! {
        <section class="panel game">
            <StatusPanel status={(*view.status).clone()} />
            <div
                id="plane"
                class={classes!("plane", (*view.traveling).then_some("plane--flying"))}
                aria-hidden="true"
            >
                {"✈"}
            </div>
            <DestinationGrid cards={(*view.cards).clone()} {on_fly} />
            <div class="game-actions">
                <button id="inventory-btn" type="button" onclick={on_open_inventory}>
                    {"Inventory"}
                </button>
                <button id="fight-btn" type="button" onclick={on_fight}>{"Look for trouble"}</button>
            </div>
            <MessagesPanel
                messages={(*view.messages).clone()}
                {on_acknowledge}
                on_inventory={on_to_inventory}
            />
            <InventoryModal
                inventory={(*view.inventory).clone()}
                {on_eat}
                on_close={on_close_inventory}
            />
        </section>
    }
}
