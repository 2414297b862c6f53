//! linbo-tui - Terminal front end for the LINBO kiosk
//!
//! This crate draws the [`linbo_app::ViewOrchestrator`] with ratatui and feeds
//! crossterm keyboard, mouse and resize events back into the TEA loop.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use render::view;
pub use runner::run;
