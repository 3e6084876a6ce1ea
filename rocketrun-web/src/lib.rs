#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod dom;
pub mod hooks;
pub mod logging;
pub mod pages;
pub mod router;
pub mod storage;
pub mod view;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Debug);
    let config = config::AppConfig::load();
    log::info!("Using game service at {}", config.api_base);
    yew::Renderer::<app::App>::with_props(app::Props { config }).render();
}
