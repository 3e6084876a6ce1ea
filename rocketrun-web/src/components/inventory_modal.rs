use rocketrun_game::InventoryView;
use yew::prelude::*;

use crate::components::modal::Modal;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub inventory: Option<InventoryView>,
    pub on_eat: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(InventoryModal)]
pub fn inventory_modal(props: &Props) -> Html {
    let body = props.inventory.as_ref().map_or_else(Html::default, |inv| {
        let eat = {
            let cb = props.on_eat.clone();
            Callback::from(move |_| cb.emit(()))
        };
        html! {
            <>
                <dl class="inventory">
                    <dt>{"Food"}</dt><dd id="inventory-food">{ inv.food }</dd>
                    <dt>{"Fuel"}</dt><dd id="inventory-fuel">{ inv.fuel }</dd>
                    <dt>{"Ammo"}</dt><dd id="inventory-ammo">{ inv.ammo }</dd>
                    <dt>{"HP"}</dt><dd id="inventory-hp">{ inv.hp.clone() }</dd>
                </dl>
                <button id="eat-btn" type="button" onclick={eat}>
                    {"Eat"}
                </button>
            </>
        }
    });

    html! {
        <Modal
            id="inventory-modal"
            open={props.inventory.is_some()}
            title="Inventory"
            on_close={props.on_close.clone()}
        >
            { body }
        </Modal>
    }
}
