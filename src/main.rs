//! Todo List Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod domain;
mod logging;
mod persistence;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::default();
    logging::init(config.log_level);
    log::info!("[APP] starting ({:?}, {:?})", config.persistence, config.display_order);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
