//! Todo Sync Frontend Entry Point

mod models;
mod error;
mod config;
mod commands;
mod sync;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("[APP] starting");
    mount_to_body(App);
}
