//! Events emitted by the view core
//!
//! These are requests for the dialog layer (or any other consumer). The
//! orchestrator queues them; consumers drain the queue after each update.

use linbo_core::OsId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    /// The login dialog should open
    LoginRequested,
    ImageCreationRequested { os: OsId },
    ImageUploadRequested { os: OsId },
    TerminalRequested,
    CacheUpdateRequested,
    DrivePartitionRequested,
    RegisterRequested,
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::LoginRequested => "login_requested",
            ViewEvent::ImageCreationRequested { .. } => "image_creation_requested",
            ViewEvent::ImageUploadRequested { .. } => "image_upload_requested",
            ViewEvent::TerminalRequested => "terminal_requested",
            ViewEvent::CacheUpdateRequested => "cache_update_requested",
            ViewEvent::DrivePartitionRequested => "drive_partition_requested",
            ViewEvent::RegisterRequested => "register_requested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_event_tag() {
        let json = serde_json::to_string(&ViewEvent::ImageUploadRequested { os: OsId(2) }).unwrap();
        assert_eq!(json, r#"{"event":"image_upload_requested","os":2}"#);
    }

    #[test]
    fn test_name_matches_tag() {
        let json = serde_json::to_value(ViewEvent::TerminalRequested).unwrap();
        assert_eq!(json["event"], ViewEvent::TerminalRequested.name());
    }
}
