//! LINBO Kiosk Library
//!
//! Kiosk front end for the LINBO network-boot imaging client: the terminal
//! UI and a headless NDJSON driver on top of the shared view core.

pub mod app;
pub mod headless;

// Re-export main entry points
pub use app::{run, LaunchOptions};
pub use headless::runner::run_headless;
