//! Headless simulation support

mod app_builder;

pub use app_builder::HeadlessAppBuilder;
