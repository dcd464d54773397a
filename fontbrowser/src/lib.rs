//! Font Browser - browse and install programming fonts
//!
//! This library provides the catalog of installable font packages and the
//! pipeline that downloads a package into the user's font directory.
//!
//! - [`catalog`]: the fixed package list and case-insensitive search
//! - [`platform`]: OS to font directory mapping
//! - [`manager`]: listing, downloading and placing font files
//! - [`config`]: the INI configuration file
//! - [`logging`]: tracing subscriber setup

pub mod catalog;
pub mod config;
pub mod logging;
pub mod manager;
pub mod platform;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
