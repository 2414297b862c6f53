//! Operating system descriptors
//!
//! An [`OsDescriptor`] is one entry of the client's start configuration. The
//! view layer never mutates descriptors; entries hold them through an `Arc`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of an operating system in the client configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OsId(pub usize);

impl fmt::Display for OsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "os#{}", self.0)
    }
}

/// Action an operator can run on an operating system without authenticating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartAction {
    #[default]
    Start,
    Sync,
    Reinstall,
}

impl StartAction {
    pub const ALL: [StartAction; 3] = [StartAction::Start, StartAction::Sync, StartAction::Reinstall];

    /// Pill caption
    pub fn label(self) -> &'static str {
        match self {
            StartAction::Start => "Start",
            StartAction::Sync => "Sync",
            StartAction::Reinstall => "Reinstall",
        }
    }

    /// Tooltip for this action on the given OS name
    pub fn tooltip(self, os_name: &str) -> String {
        match self {
            StartAction::Start => format!("Start {os_name}"),
            StartAction::Sync => format!("Sync and start {os_name}"),
            StartAction::Reinstall => format!("Reinstall {os_name}"),
        }
    }
}

/// Which start actions the server allows for an OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledActions {
    #[serde(default = "default_true")]
    pub start: bool,
    #[serde(default = "default_true")]
    pub sync: bool,
    #[serde(default = "default_true")]
    pub reinstall: bool,
}

impl Default for EnabledActions {
    fn default() -> Self {
        Self {
            start: true,
            sync: true,
            reinstall: true,
        }
    }
}

impl EnabledActions {
    pub fn contains(&self, action: StartAction) -> bool {
        match action {
            StartAction::Start => self.start,
            StartAction::Sync => self.sync,
            StartAction::Reinstall => self.reinstall,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One configured operating system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsDescriptor {
    /// Position in the configuration; assigned on load
    #[serde(skip, default = "default_os_id")]
    pub id: OsId,

    /// Display name, e.g. "Windows 11"
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: String,

    /// Icon file name relative to the icon directory
    #[serde(default)]
    pub icon: String,

    /// Whether the server defines a base image for this OS
    #[serde(default = "default_true")]
    pub has_base_image: bool,

    #[serde(default)]
    pub default_action: StartAction,

    #[serde(default)]
    pub enabled_actions: EnabledActions,
}

fn default_os_id() -> OsId {
    OsId(0)
}

impl OsDescriptor {
    /// Build a descriptor with every action enabled and `Start` as default
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id: OsId(id),
            name: name.into(),
            version: String::new(),
            description: String::new(),
            icon: String::new(),
            has_base_image: true,
            default_action: StartAction::Start,
            enabled_actions: EnabledActions::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_default_action(mut self, action: StartAction) -> Self {
        self.default_action = action;
        self
    }

    pub fn with_enabled_actions(mut self, enabled: EnabledActions) -> Self {
        self.enabled_actions = enabled;
        self
    }

    pub fn without_base_image(mut self) -> Self {
        self.has_base_image = false;
        self
    }

    pub fn action_enabled(&self, action: StartAction) -> bool {
        self.enabled_actions.contains(action)
    }

    /// Card caption: "name  version", or a warning when no base image exists
    pub fn display_name(&self) -> String {
        if !self.has_base_image {
            return "No baseimage defined".to_string();
        }
        if self.version.is_empty() {
            self.name.clone()
        } else {
            format!("{}  {}", self.name, self.version)
        }
    }
}
