//! BankDash web server and UI.
//!
//! This crate provides the Leptos-based banking dashboard: the page shell,
//! client-side navigation through the BankDash route table and sign-in
//! guard, and the server endpoints that manage the session cookie.

#![allow(non_snake_case)]

pub mod app;
#[cfg(feature = "ssr")]
pub mod auth;
pub mod config;
pub mod pages;
pub mod user;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
