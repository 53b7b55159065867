//! Code shared between the clients of the detection service and the tests that
//! stand in for its backend

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
mod macros;
pub mod prediction;
pub mod req_args;
pub mod token;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
