//! CLI command implementations.

pub mod browse;
pub mod common;
pub mod config;
pub mod install;
pub mod list;
pub mod location;
