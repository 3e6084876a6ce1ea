use rocketrun_game::Role;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Emits the role identifier of the activated button.
    pub on_select: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(RoleSelect)]
pub fn role_select(props: &Props) -> Html {
    html! {
        <ul class="role-list">
            { for Role::ALL.iter().map(|role| {
                let kit = role.kit();
                let onclick = {
                    let cb = props.on_select.clone();
                    let id = role.id();
                    Callback::from(move |_| cb.emit(id.to_string()))
                };
                html! {
                    <li class="role-card" key={role.id()}>
                        <h2>{ role.title() }</h2>
                        <p class="role-kit">
                            { format!("Food {} · Fuel {} · Ammo {}", kit.food, kit.fuel, kit.ammo) }
                        </p>
                        <button
                            type="button"
                            class="select-btn"
                            data-character={role.id()}
                            disabled={props.disabled}
                            {onclick}
                        >
                            { format!("Play as {}", role.title()) }
                        </button>
                    </li>
                }
            }) }
        </ul>
    }
}
