//! Backend state as observed by the kiosk
//!
//! The backend owns the authoritative state machine. The view layer only reads
//! the current [`BackendState`] and reacts to changes of it.
//!
//! Several view components compare states against [`BackendState::Root`]
//! ("is the operator authenticated?"). That comparison goes through the explicit
//! rank table in [`BackendState::rank`], not the enum discriminant.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete state published by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendState {
    /// Nothing running, waiting for the operator
    #[default]
    Idle,
    /// Default action will run when the countdown expires
    Autostarting,
    Starting,
    Syncing,
    Reinstalling,
    CreatingImage,
    UploadingImage,
    /// A start/sync/reinstall failed; an error message is shown
    StartActionError,
    /// Operator is authenticated and may use administrative actions
    Root,
    /// Authenticated session is about to time out
    RootTimeout,
    Partitioning,
    UpdatingCache,
    Registering,
    /// An administrative action failed; an error message is shown
    RootActionError,
    /// An administrative action finished; a success message is shown
    RootActionSuccess,
    /// The client is disabled by the server and accepts no actions
    Disabled,
}

impl BackendState {
    /// Every state, in rank order
    pub const ALL: [BackendState; 16] = [
        BackendState::Disabled,
        BackendState::Idle,
        BackendState::Autostarting,
        BackendState::Starting,
        BackendState::Syncing,
        BackendState::Reinstalling,
        BackendState::StartActionError,
        BackendState::Root,
        BackendState::RootTimeout,
        BackendState::Partitioning,
        BackendState::UpdatingCache,
        BackendState::Registering,
        BackendState::CreatingImage,
        BackendState::UploadingImage,
        BackendState::RootActionError,
        BackendState::RootActionSuccess,
    ];

    /// Position of this state in the total order.
    ///
    /// Ranks below [`BackendState::Root`]'s rank are the unauthenticated tier.
    /// Image creation and upload are administrative actions and rank above it.
    pub const fn rank(self) -> u8 {
        match self {
            BackendState::Disabled => 0,
            BackendState::Idle => 1,
            BackendState::Autostarting => 2,
            BackendState::Starting => 3,
            BackendState::Syncing => 4,
            BackendState::Reinstalling => 5,
            BackendState::StartActionError => 6,
            BackendState::Root => 7,
            BackendState::RootTimeout => 8,
            BackendState::Partitioning => 9,
            BackendState::UpdatingCache => 10,
            BackendState::Registering => 11,
            BackendState::CreatingImage => 12,
            BackendState::UploadingImage => 13,
            BackendState::RootActionError => 14,
            BackendState::RootActionSuccess => 15,
        }
    }

    /// True once the operator has logged in (`self >= Root`)
    pub fn is_authenticated(self) -> bool {
        self >= BackendState::Root
    }

    /// True while a start/sync/reinstall is running
    pub fn is_start_action(self) -> bool {
        matches!(
            self,
            BackendState::Starting | BackendState::Syncing | BackendState::Reinstalling
        )
    }

    /// True while an administrative action is running
    pub fn is_root_action(self) -> bool {
        matches!(
            self,
            BackendState::Partitioning
                | BackendState::UpdatingCache
                | BackendState::Registering
                | BackendState::CreatingImage
                | BackendState::UploadingImage
        )
    }

    /// True for states that display a message the operator acknowledges
    pub fn is_message(self) -> bool {
        matches!(
            self,
            BackendState::StartActionError
                | BackendState::RootActionError
                | BackendState::RootActionSuccess
        )
    }

    /// Short human-readable label
    pub fn label(self) -> &'static str {
        match self {
            BackendState::Idle => "Idle",
            BackendState::Autostarting => "Autostarting",
            BackendState::Starting => "Starting",
            BackendState::Syncing => "Syncing",
            BackendState::Reinstalling => "Reinstalling",
            BackendState::CreatingImage => "Creating image",
            BackendState::UploadingImage => "Uploading image",
            BackendState::StartActionError => "Error",
            BackendState::Root => "Administration",
            BackendState::RootTimeout => "Session timeout",
            BackendState::Partitioning => "Partitioning",
            BackendState::UpdatingCache => "Updating cache",
            BackendState::Registering => "Registering",
            BackendState::RootActionError => "Error",
            BackendState::RootActionSuccess => "Done",
            BackendState::Disabled => "Disabled",
        }
    }
}

impl PartialOrd for BackendState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BackendState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
