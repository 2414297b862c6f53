//! Message types for the kiosk (TEA pattern)

use std::time::Duration;

use linbo_core::{BackendState, Size};

use crate::input_key::{InputKey, PointerEvent};

/// All possible messages
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Keyboard event from the front end
    Key(InputKey),

    /// Pointer event from the front end
    Pointer(PointerEvent),

    /// Screen size changed
    Resize(Size),

    /// Animation frame; carries the time since startup
    Tick(Duration),

    /// The backend published a new state
    StateChanged(BackendState),

    /// Leave the event loop
    Quit,
}
