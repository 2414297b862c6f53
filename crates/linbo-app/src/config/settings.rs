//! Settings loader for settings.toml

use super::types::KioskSettings;
use linbo_core::prelude::*;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.toml";
const KIOSK_DIR: &str = "linbo-kiosk";

/// Default location: `<config dir>/linbo-kiosk/settings.toml`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(KIOSK_DIR).join(SETTINGS_FILENAME))
}

/// Load settings from `path`, falling back to defaults.
///
/// A missing file is normal; an unreadable or malformed one is logged and
/// ignored so the kiosk always comes up.
pub fn load_settings(path: &Path) -> KioskSettings {
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return KioskSettings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                KioskSettings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            KioskSettings::default()
        }
    }
}

/// Load from the default location, or defaults when no config dir exists
pub fn load_default_settings() -> KioskSettings {
    match default_settings_path() {
        Some(path) => load_settings(&path),
        None => KioskSettings::default(),
    }
}

/// Write a commented default settings file if none exists
pub fn init_settings_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::settings(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    let default_content = r#"# LINBO kiosk settings

[animation]
height_ms = 400
grid_geometry_ms = 300
sidebar_item_ms = 200
sidebar_slide_ms = 300
drawer_slide_ms = 250

[ui]
frame_interval_ms = 16
mouse = true
allow_quit = true

[simulation]
password = "linbo"
autostart_secs = 0
"#;
    std::fs::write(path, default_content)?;
    info!("Created default settings at {:?}", path);
    Ok(())
}
