//! Main update function - handles state transitions (TEA pattern)

use linbo_core::prelude::*;

use crate::backend::Backend;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{KioskPhase, KioskState};

use super::{UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut KioskState, backend: &mut dyn Backend, message: Message) -> UpdateResult {
    let now = state.now;
    match message {
        Message::Quit => {
            info!("Quit requested");
            state.phase = KioskPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(InputKey::CharCtrl('c')) if state.settings.ui.allow_quit => {
            UpdateResult::message(Message::Quit)
        }

        Message::Key(key) => {
            state.orchestrator.handle_key(&key, backend, now);
            report(state, backend)
        }

        Message::Pointer(event) => {
            if !state.settings.ui.mouse {
                return UpdateResult::none();
            }
            state.orchestrator.handle_pointer(event, backend, now);
            report(state, backend)
        }

        Message::Resize(size) => {
            state.orchestrator.resize(size, now);
            UpdateResult::none()
        }

        Message::Tick(now) => {
            if now < state.now {
                warn!("Tick went backwards ({:?} < {:?})", now, state.now);
                return UpdateResult::none();
            }
            state.now = now;
            backend.advance(now);
            state.orchestrator.tick(now);
            report(state, backend)
        }

        Message::StateChanged(backend_state) => {
            if state.orchestrator.state() == Some(backend_state) {
                trace!("State {:?} already applied", backend_state);
                return UpdateResult::none();
            }
            let current_os = backend.os_of_current_action();
            state
                .orchestrator
                .apply_state(backend_state, current_os, now);
            report(state, backend)
        }
    }
}

/// Emit queued view events, or follow up with a state the backend published
/// synchronously while handling the message
fn report(state: &mut KioskState, backend: &dyn Backend) -> UpdateResult {
    let backend_state = backend.state();
    let message = (state.orchestrator.state() != Some(backend_state))
        .then_some(Message::StateChanged(backend_state));
    let events = state.orchestrator.drain_events();
    let action = (!events.is_empty()).then_some(UpdateAction::Report(events));
    UpdateResult { message, action }
}
