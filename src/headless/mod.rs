//! Headless mode - JSON event output for scripted testing
//!
//! The kiosk runs without a terminal UI: commands are read from stdin (see
//! [`command`]) and observable changes are written to stdout as NDJSON, one
//! event per line. The kiosk clock only advances on `tick` commands, so a
//! script sees the same events on every run; only the wall-clock `timestamp`
//! fields differ.
//!
//! # Example Output
//!
//! ```json
//! {"event":"state_applied","state":"idle","timestamp":1704700001000}
//! {"event":"dialog_opened","dialog":"login","timestamp":1704700002000}
//! {"event":"view_event","name":"terminal_requested","os":null,"timestamp":1704700003000}
//! ```

pub mod command;
pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use linbo_app::dialog::DialogKind;
use linbo_app::{PowerRequest, ViewEvent};
use linbo_core::{BackendState, OsId};
use serde::Serialize;
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The view now shows a new backend state
    StateApplied { state: BackendState, timestamp: i64 },

    /// A view event was reported (dialog request)
    ViewEvent {
        name: &'static str,
        os: Option<OsId>,
        timestamp: i64,
    },

    DialogOpened { dialog: DialogKind, timestamp: i64 },

    DialogClosed { dialog: DialogKind, timestamp: i64 },

    /// The backend asked the machine to reboot or power off
    PowerRequested { request: &'static str, timestamp: i64 },

    /// Invalid command or runtime error
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event as one JSON line
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Emit this event to stdout
    pub fn emit(&self) {
        if let Err(e) = self.write_to(&mut io::stdout().lock()) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn state_applied(state: BackendState) -> Self {
        Self::StateApplied {
            state,
            timestamp: Self::now(),
        }
    }

    pub fn view_event(event: ViewEvent) -> Self {
        let os = match event {
            ViewEvent::ImageCreationRequested { os } | ViewEvent::ImageUploadRequested { os } => {
                Some(os)
            }
            _ => None,
        };
        Self::ViewEvent {
            name: event.name(),
            os,
            timestamp: Self::now(),
        }
    }

    pub fn dialog_opened(dialog: DialogKind) -> Self {
        Self::DialogOpened {
            dialog,
            timestamp: Self::now(),
        }
    }

    pub fn dialog_closed(dialog: DialogKind) -> Self {
        Self::DialogClosed {
            dialog,
            timestamp: Self::now(),
        }
    }

    pub fn power_requested(request: PowerRequest) -> Self {
        let request = match request {
            PowerRequest::Reboot => "reboot",
            PowerRequest::Shutdown => "shutdown",
        };
        Self::PowerRequested {
            request,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(event: &HeadlessEvent) -> serde_json::Value {
        let mut out = Vec::new();
        event.write_to(&mut out).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with('\n'));
        serde_json::from_str(line.trim_end()).unwrap()
    }

    #[test]
    fn test_state_applied_format() {
        let value = json(&HeadlessEvent::state_applied(BackendState::RootTimeout));
        assert_eq!(value["event"], "state_applied");
        assert!(value["state"].is_string());
        assert!(value["timestamp"].is_i64());
    }

    #[test]
    fn test_view_event_carries_os() {
        let value = json(&HeadlessEvent::view_event(
            ViewEvent::ImageUploadRequested { os: OsId(2) },
        ));
        assert_eq!(value["event"], "view_event");
        assert_eq!(value["name"], "image_upload_requested");
        assert_eq!(value["os"], 2);

        let value = json(&HeadlessEvent::view_event(ViewEvent::TerminalRequested));
        assert!(value["os"].is_null());
    }

    #[test]
    fn test_dialog_events_use_snake_case() {
        let value = json(&HeadlessEvent::dialog_opened(DialogKind::PartitionConfirmation));
        assert_eq!(value["event"], "dialog_opened");
        assert_eq!(value["dialog"], "partition_confirmation");
    }

    #[test]
    fn test_power_request() {
        let value = json(&HeadlessEvent::power_requested(PowerRequest::Shutdown));
        assert_eq!(value["request"], "shutdown");
    }
}
