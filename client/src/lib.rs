//! # client
//!
//! Leptos + WASM frontend for the MedGem research assistant.
//!
//! This crate contains pages, components, view-local state, the typed API
//! client and browser storage helpers. It is compiled twice: with `hydrate`
//! for the browser bundle and with `ssr` for server-side rendering inside
//! the `server` binary.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and hydrates the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
