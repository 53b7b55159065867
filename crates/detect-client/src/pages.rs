//! One module per section of the app. Each only reads from the controller and
//! edits its forms; responses are applied by the controller itself

pub mod admin;
pub mod login;
pub mod predict;
pub mod profile;
pub mod register;

pub use predict::UiPredict;
