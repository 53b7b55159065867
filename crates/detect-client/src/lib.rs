#![warn(unused_crate_dependencies)]

#[cfg(target_arch = "wasm32")]
mod suppress_wasm_warnings {
    // Only used in binary and triggers unused warning
    use wasm_bindgen_futures as _;
    use web_sys as _;
}

mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod background_worker;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod configuration;
mod pages;
mod toasts;
#[cfg(not(target_arch = "wasm32"))]
pub mod tracing;
mod ui_helpers;

pub use app::DetectApp;

/// Used as the window title and to name the folder the token is kept in
pub const APP_NAME: &str = "detect-client";

/// Function is here to ensure lib also uses the log create to prevent the warning that it is not used
#[cfg(target_arch = "wasm32")]
pub fn wasm_log_level() -> log::LevelFilter {
    log::LevelFilter::Debug
}
