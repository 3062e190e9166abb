//! Small helpers shared by the weather workspace crates.

pub mod config;
pub mod env;
