//! Message processing shared by every front end

use linbo_core::prelude::*;

use crate::backend::Backend;
use crate::events::ViewEvent;
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::KioskState;

/// Process a message and its follow-ups through the TEA update function
///
/// Returns the view events reported along the way, oldest first.
pub fn process_message(
    state: &mut KioskState,
    backend: &mut dyn Backend,
    message: Message,
) -> Vec<ViewEvent> {
    let mut reported = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, backend, m);

        if let Some(UpdateAction::Report(events)) = result.action {
            for event in &events {
                debug!("View event: {}", event.name());
            }
            reported.extend(events);
        }

        // Continue with follow-up message
        msg = result.message;
    }
    reported
}
