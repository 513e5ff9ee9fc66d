//! Ball module - controller components, torque, and spawn-on-action systems

mod components;
mod spawning;
mod torque;

pub use components::*;
pub use spawning::*;
pub use torque::*;
