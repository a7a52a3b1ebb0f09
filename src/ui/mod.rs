//! Terminal interface built on ratatui.

pub mod app;
pub mod input;
pub mod modal;
pub mod preview;
pub mod progress;
pub mod table;

pub use app::{App, ExploreOutcome};
