//! Stores functionality that should be shared between different clients
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]

#[cfg(all(test, target_arch = "wasm32"))] // Included to prevent unused crate warning
mod warning_suppress {
    use wasm_bindgen_test as _;
}

#[cfg(all(test, not(target_arch = "wasm32")))] // Only used by the integration tests
use detect_test_helper as _;

mod client;
pub mod controller;
mod error;
mod session;

pub use client::{Client, UiCallBack};
pub use error::ClientError;
pub use session::{MemoryTokenStore, Session, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use session::FileTokenStore;

#[cfg(target_arch = "wasm32")]
pub use session::LocalStorageTokenStore;
