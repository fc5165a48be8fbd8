//! # piot-console
//!
//! Leptos + WASM shell for the PIOT device/organization management console.
//!
//! The crate owns three contracts the pages build on: the session store
//! (token, login progress, profile), the GraphQL query gateway that attaches
//! the token and normalizes failures, and the ordered route table that maps a
//! path to a view plus captured params. Page markup is deliberately thin.

pub mod actions;
pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod routing;
pub mod state;
pub mod util;

/// WASM entry point: set up logging, build the console, mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    match app::Console::from_build_env() {
        Ok(console) => leptos::mount::mount_to_body(move || view! { <app::App console/> }),
        Err(e) => log::error!("console failed to start: {e}"),
    }
}
