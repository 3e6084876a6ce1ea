use rocketrun_game::DestinationCard;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub cards: Vec<DestinationCard>,
    /// Emits the ICAO code of the chosen airport.
    pub on_fly: Callback<String>,
}

#[function_component(DestinationGrid)]
pub fn destination_grid(props: &Props) -> Html {
    html! {
        <div id="destinations-grid" class="destinations-grid">
            { for props.cards.iter().map(|card| {
                let onclick = {
                    let cb = props.on_fly.clone();
                    let icao = card.icao.clone();
                    Callback::from(move |_| cb.emit(icao.clone()))
                };
                html! {
                    <div
                        key={card.icao.clone()}
                        class={classes!("destination-card", card.has_part.then_some("has-part"))}
                    >
                        <h3>{ card.country.clone() }</h3>
                        <p class="destination-meta">
                            { format!("{} · {}", card.icao, card.distance_label()) }
                        </p>
                        if card.has_part {
                            <span class="part-flag">{"Rocket part"}</span>
                        }
                        <button type="button" class="fly-btn" disabled={!card.can_fly} {onclick}>
                            { card.label }
                        </button>
                    </div>
                }
            }) }
        </div>
    }
}
