pub mod app;
pub mod components;
pub mod data;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod pages;
pub mod settings;
pub mod utils;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    logging::init_browser(log::LevelFilter::Info);
    leptos::mount::hydrate_body(App);
}
