#![allow(warnings)]
//! Campus Swap Frontend Entry Point

mod models;
mod config;
mod storage;
mod context;
mod store;
mod actions;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    // Only fails when a logger is already installed
    let _ = console_logger::init_logger("CampusSwap", log::LevelFilter::Info);
    mount_to_body(App);
}
