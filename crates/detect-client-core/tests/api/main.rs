#![cfg(not(target_arch = "wasm32"))]

mod admin;
mod helpers;
mod login;
mod predict;
mod profile;
mod register;
mod session;
