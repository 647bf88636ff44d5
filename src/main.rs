#![allow(warnings)]
//! Todo Lists Frontend Entry Point

mod models;
mod config;
mod ids;
mod store;
mod controller;
mod todo_app;
mod presentation;
mod dom;
mod context;
mod components;
mod app;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    init_logging(&AppConfig::default());
    mount_to_body(App);
}

#[cfg(target_arch = "wasm32")]
fn init_logging(config: &AppConfig) {
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(_config: &AppConfig) {}
