//! Configuration for the LINBO kiosk
//!
//! Supports:
//! - `<config dir>/linbo-kiosk/settings.toml` - animation timing, terminal and simulation settings

pub mod settings;
pub mod types;

pub use settings::{default_settings_path, init_settings_file, load_default_settings, load_settings};
pub use types::*;
