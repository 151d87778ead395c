//! CLI library components for csvrows.

pub mod logging;
pub mod render;
