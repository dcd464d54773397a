//! Terminal UI for Font Browser.
//!
//! # Module Structure
//!
//! - `state` - Browser state: filtered list, cursor, search and install status
//! - `events` - Key bindings mapped onto state changes
//! - `render` - Drawing the panels with ratatui

pub mod events;
pub mod render;
pub mod state;

pub use events::{apply, map_key, Action};
pub use render::{draw, InfoContext};
pub use state::{BrowserState, InputMode, Status};
