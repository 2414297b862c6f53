//! Backend seam
//!
//! The backend owns the LINBO client: it runs actions, publishes the
//! [`BackendState`] and exposes the client configuration. The view core only
//! talks to it through the [`Backend`] trait. State changes are published on a
//! `tokio::sync::watch` channel; the runner turns them into
//! `Message::StateChanged`.

mod simulated;

pub use simulated::{PowerRequest, SimulatedBackend};

use std::time::Duration;

use linbo_core::{BackendState, ClientConfig, DownloadMethod, OsId, StartAction};
use tokio::sync::watch;

#[cfg_attr(test, mockall::automock)]
pub trait Backend {
    fn state(&self) -> BackendState;

    /// Receiver that observes every published state
    fn subscribe(&self) -> watch::Receiver<BackendState>;

    fn config(&self) -> &ClientConfig;

    /// OS targeted by the running (or last) action
    fn os_of_current_action(&self) -> Option<OsId>;

    /// Returns whether the password was accepted
    fn login(&mut self, password: &str) -> bool;

    fn logout(&mut self);

    fn reboot(&mut self);

    fn shutdown(&mut self);

    fn cancel_current_action(&mut self);

    /// Acknowledge a message state (error or success)
    fn reset_message(&mut self);

    /// Operator activity; restarts the authenticated-session timeout
    fn restart_activity_timer(&mut self);

    fn update_cache(&mut self, method: DownloadMethod, format_first: bool);

    fn partition_drive(&mut self);

    fn register_client(&mut self);

    fn create_image(&mut self, os: OsId);

    fn upload_image(&mut self, os: OsId);

    /// Run a start action on an operating system
    fn execute(&mut self, os: OsId, action: StartAction);

    /// Drive time-based behaviour. Real backends run their own timers.
    fn advance(&mut self, _now: Duration) {}
}
