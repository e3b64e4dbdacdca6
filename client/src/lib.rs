//! # client
//!
//! Leptos + WASM frontend for the STEM Inspire site and its admin panel.
//!
//! Public pages render for everyone; admin pages sit behind the
//! `RequireAuth` guard and talk to the REST backend with the bearer token
//! held by the session provider from the `session` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
