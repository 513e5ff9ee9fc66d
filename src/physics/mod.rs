//! Physics module - rigid body components and fixed-step integration

mod components;
mod integrate;

pub use components::*;
pub use integrate::*;
