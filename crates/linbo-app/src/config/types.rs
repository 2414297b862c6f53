//! Configuration types for the kiosk settings file

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{Easing, Transition};

/// Kiosk settings (`<config dir>/linbo-kiosk/settings.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KioskSettings {
    #[serde(default)]
    pub animation: AnimationSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Animation durations in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnimationSettings {
    /// Main page height changes (OS row, action area)
    #[serde(default = "default_height_ms")]
    pub height_ms: u64,

    /// OS entry geometry changes inside the grid
    #[serde(default = "default_grid_geometry_ms")]
    pub grid_geometry_ms: u64,

    /// Delay before the grid starts shrinking
    #[serde(default = "default_grid_shrink_delay_ms")]
    pub grid_shrink_delay_ms: u64,

    /// Grid shrink animation
    #[serde(default = "default_grid_shrink_ms")]
    pub grid_shrink_ms: u64,

    /// Delay before an OS entry is removed after an animated hide
    #[serde(default = "default_entry_hide_delay_ms")]
    pub entry_hide_delay_ms: u64,

    /// Admin sidebar item expand and collapse
    #[serde(default = "default_sidebar_item_ms")]
    pub sidebar_item_ms: u64,

    /// Admin sidebar slide in and out
    #[serde(default = "default_sidebar_slide_ms")]
    pub sidebar_slide_ms: u64,

    /// Client info drawer slide
    #[serde(default = "default_drawer_slide_ms")]
    pub drawer_slide_ms: u64,

    /// Dialog slide in and out
    #[serde(default = "default_dialog_slide_ms")]
    pub dialog_slide_ms: u64,

    /// One step of the wrong-password shake
    #[serde(default = "default_shake_step_ms")]
    pub shake_step_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            height_ms: default_height_ms(),
            grid_geometry_ms: default_grid_geometry_ms(),
            grid_shrink_delay_ms: default_grid_shrink_delay_ms(),
            grid_shrink_ms: default_grid_shrink_ms(),
            entry_hide_delay_ms: default_entry_hide_delay_ms(),
            sidebar_item_ms: default_sidebar_item_ms(),
            sidebar_slide_ms: default_sidebar_slide_ms(),
            drawer_slide_ms: default_drawer_slide_ms(),
            dialog_slide_ms: default_dialog_slide_ms(),
            shake_step_ms: default_shake_step_ms(),
        }
    }
}

impl AnimationSettings {
    pub fn height(&self) -> Transition {
        Transition::millis(self.height_ms, Easing::InOutQuad)
    }

    pub fn grid_geometry(&self) -> Transition {
        Transition::millis(self.grid_geometry_ms, Easing::InOutQuad)
    }

    pub fn grid_shrink_delay(&self) -> Duration {
        Duration::from_millis(self.grid_shrink_delay_ms)
    }

    pub fn grid_shrink(&self) -> Transition {
        Transition::millis(self.grid_shrink_ms, Easing::OutQuad)
    }

    pub fn entry_hide_delay(&self) -> Duration {
        Duration::from_millis(self.entry_hide_delay_ms)
    }

    pub fn sidebar_item(&self) -> Transition {
        Transition::millis(self.sidebar_item_ms, Easing::InOutQuad)
    }

    pub fn sidebar_slide(&self) -> Transition {
        Transition::millis(self.sidebar_slide_ms, Easing::InOutQuad)
    }

    pub fn drawer_slide(&self) -> Transition {
        Transition::millis(self.drawer_slide_ms, Easing::OutQuad)
    }

    pub fn dialog_slide(&self) -> Transition {
        Transition::millis(self.dialog_slide_ms, Easing::OutQuad)
    }

    pub fn shake_step(&self) -> Duration {
        Duration::from_millis(self.shake_step_ms)
    }
}

fn default_height_ms() -> u64 {
    400
}

fn default_grid_geometry_ms() -> u64 {
    300
}

fn default_grid_shrink_delay_ms() -> u64 {
    300
}

fn default_grid_shrink_ms() -> u64 {
    100
}

fn default_entry_hide_delay_ms() -> u64 {
    300
}

fn default_sidebar_item_ms() -> u64 {
    200
}

fn default_sidebar_slide_ms() -> u64 {
    300
}

fn default_drawer_slide_ms() -> u64 {
    250
}

fn default_dialog_slide_ms() -> u64 {
    300
}

fn default_shake_step_ms() -> u64 {
    30
}

/// Terminal front end settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Frame interval while animations run
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Capture mouse events
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Allow Ctrl+C to leave the kiosk
    #[serde(default = "default_true")]
    pub allow_quit: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            mouse: true,
            allow_quit: true,
        }
    }
}

impl UiSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_true() -> bool {
    true
}

/// Behaviour of the built-in simulated backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Password accepted by the simulated login
    #[serde(default = "default_password")]
    pub password: String,

    /// Seconds before the default OS autostarts; 0 disables autostart
    #[serde(default)]
    pub autostart_secs: u64,

    /// How long a simulated start or root action runs
    #[serde(default = "default_action_secs")]
    pub action_secs: u64,

    /// Inactivity before an authenticated session starts its logout countdown
    #[serde(default = "default_root_timeout_secs")]
    pub root_timeout_secs: u64,

    /// Length of the logout countdown
    #[serde(default = "default_root_countdown_secs")]
    pub root_countdown_secs: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            password: default_password(),
            autostart_secs: 0,
            action_secs: default_action_secs(),
            root_timeout_secs: default_root_timeout_secs(),
            root_countdown_secs: default_root_countdown_secs(),
        }
    }
}

fn default_password() -> String {
    "linbo".to_string()
}

fn default_action_secs() -> u64 {
    5
}

fn default_root_timeout_secs() -> u64 {
    120
}

fn default_root_countdown_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_main_page_timing() {
        let settings = AnimationSettings::default();
        assert_eq!(settings.height().duration, Duration::from_millis(400));
        assert_eq!(settings.height().easing, Easing::InOutQuad);
        assert_eq!(settings.grid_shrink().easing, Easing::OutQuad);
        assert_eq!(settings.sidebar_item().duration, Duration::from_millis(200));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: KioskSettings = toml::from_str(
            r#"
            [animation]
            height_ms = 100

            [ui]
            mouse = false
            "#,
        )
        .unwrap();
        assert_eq!(settings.animation.height_ms, 100);
        assert_eq!(settings.animation.sidebar_slide_ms, 300);
        assert!(!settings.ui.mouse);
        assert_eq!(settings.ui.frame_interval_ms, 16);
        assert_eq!(settings.simulation.password, "linbo");
    }

    #[test]
    fn test_frame_interval_never_zero() {
        let ui = UiSettings {
            frame_interval_ms: 0,
            ..UiSettings::default()
        };
        assert_eq!(ui.frame_interval(), Duration::from_millis(1));
    }
}
