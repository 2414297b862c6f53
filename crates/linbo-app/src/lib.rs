//! linbo-app - View orchestration for the LINBO kiosk
//!
//! This crate holds the front-end independent part of the kiosk: the widget
//! tree with its animations, the mapping from backend state to layout, input
//! routing and the TEA (The Elm Architecture) update function. Front ends
//! (the terminal UI, the headless driver) feed it [`Message`]s and render the
//! resulting [`ViewOrchestrator`].
//!
//! Time is passed in explicitly as a [`std::time::Duration`] since startup, so
//! every animation is deterministic under test.

pub mod admin_sidebar;
pub mod animation;
pub mod backend;
pub mod client_info;
pub mod config;
pub mod dialog;
pub mod events;
pub mod handler;
pub mod input_key;
pub mod interactive;
pub mod message;
pub mod orchestrator;
pub mod os_entry;
pub mod os_grid;
pub mod process;
pub mod sidebar_item;
pub mod signals;
pub mod sliding_panel;
pub mod state;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod timer;
pub mod visibility;

// Re-export primary types
pub use backend::{Backend, PowerRequest, SimulatedBackend};
pub use events::ViewEvent;
pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use orchestrator::{ControlId, ViewOrchestrator};
pub use process::process_message;
pub use state::{KioskPhase, KioskState};
