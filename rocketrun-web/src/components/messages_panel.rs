use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub messages: Vec<String>,
    pub on_acknowledge: Callback<()>,
    pub on_inventory: Callback<()>,
}

#[function_component(MessagesPanel)]
pub fn messages_panel(props: &Props) -> Html {
    if props.messages.is_empty() {
        return Html::default();
    }
    let ack = {
        let cb = props.on_acknowledge.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let to_inventory = {
        let cb = props.on_inventory.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div id="messages-panel" class="messages-panel" role="status">
            <ul>
                { for props.messages.iter().map(|msg| html! { <li>{ msg.clone() }</li> }) }
            </ul>
            <div class="messages-panel__actions">
                <button id="messages-ok" type="button" onclick={ack}>{"OK"}</button>
                <button id="messages-inventory" type="button" onclick={to_inventory}>
                    {"Open inventory"}
                </button>
            </div>
        </div>
    }
}
