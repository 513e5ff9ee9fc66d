//! Camera module - smoothed follow camera

mod follow;

pub use follow::*;
