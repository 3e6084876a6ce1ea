use rocketrun_game::StatusView;
use rocketrun_game::constants::ROCKET_PARTS_REQUIRED;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// `None` until the first complete snapshot has been rendered.
    #[prop_or_default]
    pub status: Option<StatusView>,
}

const BLANK: &str = "-";

#[function_component(StatusPanel)]
pub fn status_panel(props: &Props) -> Html {
    let Some(status) = props.status.as_ref() else {
        return html! {
            <aside class="status-panel status-panel--pending" aria-busy="true">
                <span id="current-location">{ BLANK }</span>
            </aside>
        };
    };

    html! {
        <aside class="status-panel" aria-live="polite">
            <h2 id="current-location">
                { format!("{} ({})", status.location, status.country) }
            </h2>
            <dl class="stats">
                <dt>{"Fuel"}</dt><dd id="fuel">{ status.fuel }</dd>
                <dt>{"Food"}</dt><dd id="food">{ status.food }</dd>
                <dt>{"Ammo"}</dt><dd id="ammo">{ status.ammo }</dd>
                <dt>{"HP"}</dt><dd id="hp">{ status.hp.clone() }</dd>
                <dt>{"Time left"}</dt><dd id="time">{ format!("{} h", status.time_left) }</dd>
                <dt>{"Range"}</dt><dd id="range">{ format!("{:.0} km", status.range_km) }</dd>
            </dl>
            <div class="part-badges" aria-label={format!("Rocket parts {}/{ROCKET_PARTS_REQUIRED}", status.parts_collected)}>
                { for status.part_badges.iter().enumerate().map(|(idx, collected)| html! {
                    <span
                        id={format!("part-{}", idx + 1)}
                        class={classes!("part-badge", collected.then_some("collected"))}
                    >
                        { idx + 1 }
                    </span>
                }) }
            </div>
            <h3>{"Parts still hidden in"}</h3>
            <ul id="parts-remaining">
                { for status.parts_remaining.iter().map(|iso| html! { <li key={iso.clone()}>{ iso.clone() }</li> }) }
            </ul>
        </aside>
    }
}
