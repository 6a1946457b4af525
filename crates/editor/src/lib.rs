// Library crate: the headless editing core shared by the `forma` CLI, the
// browser handle and integration tests. Rendering stays on the host side.

pub mod build;
pub mod codec;
pub mod command;
pub mod controller;
pub mod fixtures;
pub mod harness;
pub mod notification;
pub mod state;
pub mod validation;
pub mod viewport;

pub use controller::{Editor, Modifiers};
