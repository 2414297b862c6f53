use std::time::Duration;

use linbo_core::{BackendState, ClientConfig, OsId, Point, Size};

use super::*;
use crate::backend::{Backend, SimulatedBackend};
use crate::client_info::ClientInfoMetrics;
use crate::config::{KioskSettings, SimulationSettings};
use crate::dialog::DialogKind;
use crate::input_key::{InputKey, PointerEvent, PointerKind};
use crate::orchestrator::PowerAction;
use crate::state::KioskState;

fn setup(simulation: SimulationSettings) -> (KioskState, SimulatedBackend) {
    let settings = KioskSettings {
        simulation: simulation.clone(),
        ..KioskSettings::default()
    };
    let config = ClientConfig::demo();
    let state = KioskState::new(&config, settings, Size::new(120, 50), ClientInfoMetrics::CELLS);
    let backend = SimulatedBackend::new(config, simulation);
    (state, backend)
}

/// Process a message and every follow-up, collecting reported events
fn process(
    state: &mut KioskState,
    backend: &mut SimulatedBackend,
    message: Message,
) -> Vec<ViewEvent> {
    let mut events = Vec::new();
    let mut next = Some(message);
    while let Some(message) = next.take() {
        let result = update(state, backend, message);
        if let Some(UpdateAction::Report(reported)) = result.action {
            events.extend(reported);
        }
        next = result.message;
    }
    events
}

fn started() -> (KioskState, SimulatedBackend) {
    let (mut state, mut backend) = setup(SimulationSettings::default());
    let initial = backend.state();
    process(&mut state, &mut backend, Message::StateChanged(initial));
    (state, backend)
}

fn type_text(state: &mut KioskState, backend: &mut SimulatedBackend, text: &str) {
    for c in text.chars() {
        process(state, backend, Message::Key(InputKey::Char(c)));
    }
}

fn log_in(state: &mut KioskState, backend: &mut SimulatedBackend) {
    state
        .orchestrator
        .dispatch(ViewEvent::LoginRequested, state.now);
    type_text(state, backend, "linbo");
    process(state, backend, Message::Key(InputKey::Enter));
}

#[test]
fn test_initial_state_is_applied() {
    let (state, _backend) = started();
    assert_eq!(state.orchestrator.state(), Some(BackendState::Idle));
    assert!(!state.should_quit());
}

#[test]
fn test_duplicate_state_is_ignored() {
    let (mut state, mut backend) = started();
    let result = update(&mut state, &mut backend, Message::StateChanged(BackendState::Idle));
    assert_eq!(result, UpdateResult::none());
}

#[test]
fn test_login_switches_to_root() {
    let (mut state, mut backend) = started();
    log_in(&mut state, &mut backend);

    assert_eq!(backend.state(), BackendState::Root);
    assert_eq!(state.orchestrator.state(), Some(BackendState::Root));
    assert!(!state.orchestrator.dialogs().is_open(DialogKind::Login));
    assert!(state
        .orchestrator
        .power_row()
        .is_visible(PowerAction::Logout));
}

#[test]
fn test_wrong_password_keeps_dialog_open() {
    let (mut state, mut backend) = started();
    state
        .orchestrator
        .dispatch(ViewEvent::LoginRequested, Duration::ZERO);
    type_text(&mut state, &mut backend, "guess");
    process(&mut state, &mut backend, Message::Key(InputKey::Enter));

    assert_eq!(backend.state(), BackendState::Idle);
    assert!(state.orchestrator.dialogs().is_open(DialogKind::Login));
    assert!(state.orchestrator.dialogs().login().wrong_password());
}

#[test]
fn test_autostart_isolates_running_os() {
    let (mut state, mut backend) = setup(SimulationSettings {
        autostart_secs: 2,
        ..SimulationSettings::default()
    });
    process(&mut state, &mut backend, Message::StateChanged(BackendState::Autostarting));
    assert!(state.orchestrator.grid().is_isolated());

    process(&mut state, &mut backend, Message::Tick(Duration::from_secs(2)));
    assert_eq!(state.orchestrator.state(), Some(BackendState::Starting));
    assert!(state.orchestrator.grid().is_isolated());
    let visible: Vec<bool> = state
        .orchestrator
        .grid()
        .entries()
        .iter()
        .map(|entry| entry.should_be_visible())
        .collect();
    assert_eq!(visible, vec![true, false, false]);
}

#[test]
fn test_escape_cancels_autostart() {
    let (mut state, mut backend) = setup(SimulationSettings {
        autostart_secs: 5,
        ..SimulationSettings::default()
    });
    process(&mut state, &mut backend, Message::StateChanged(BackendState::Autostarting));
    process(&mut state, &mut backend, Message::Key(InputKey::Esc));
    assert_eq!(state.orchestrator.state(), Some(BackendState::Idle));
    assert!(!state.orchestrator.grid().is_isolated());
}

#[test]
fn test_root_timeout_closes_open_dialogs() {
    let (mut state, mut backend) = started();
    log_in(&mut state, &mut backend);
    state
        .orchestrator
        .dispatch(ViewEvent::TerminalRequested, Duration::ZERO);
    assert!(state.orchestrator.dialogs().any_open());

    process(&mut state, &mut backend, Message::Tick(Duration::from_secs(121)));
    assert_eq!(state.orchestrator.state(), Some(BackendState::RootTimeout));
    assert!(!state.orchestrator.dialogs().any_open());
}

#[test]
fn test_click_reports_events() {
    let (mut state, mut backend) = started();
    log_in(&mut state, &mut backend);

    let card = state.orchestrator.grid().entries()[0].rect();
    let at = Point::new(card.x, card.y);
    let mut events = Vec::new();
    for kind in [PointerKind::Down, PointerKind::Up] {
        events.extend(process(
            &mut state,
            &mut backend,
            Message::Pointer(PointerEvent { kind, position: at }),
        ));
    }
    assert_eq!(events, vec![ViewEvent::ImageCreationRequested { os: OsId(0) }]);
}

#[test]
fn test_pointer_ignored_when_mouse_disabled() {
    let (mut state, mut backend) = started();
    state.settings.ui.mouse = false;
    let result = update(
        &mut state,
        &mut backend,
        Message::Pointer(PointerEvent::new(PointerKind::Moved, 1, 1)),
    );
    assert_eq!(result, UpdateResult::none());
    assert_eq!(state.orchestrator.hovered(), None);
}

#[test]
fn test_ctrl_c_quits() {
    let (mut state, mut backend) = started();
    process(&mut state, &mut backend, Message::Key(InputKey::CharCtrl('c')));
    assert!(state.should_quit());
}

#[test]
fn test_ctrl_c_ignored_when_quit_disallowed() {
    let (mut state, mut backend) = started();
    state.settings.ui.allow_quit = false;
    process(&mut state, &mut backend, Message::Key(InputKey::CharCtrl('c')));
    assert!(!state.should_quit());
}

#[test]
fn test_backwards_tick_is_ignored() {
    let (mut state, mut backend) = started();
    process(&mut state, &mut backend, Message::Tick(Duration::from_millis(500)));
    process(&mut state, &mut backend, Message::Tick(Duration::from_millis(100)));
    assert_eq!(state.now, Duration::from_millis(500));
}

#[tokio::test]
async fn test_subscription_sees_login() {
    let (mut state, mut backend) = started();
    let mut receiver = backend.subscribe();
    log_in(&mut state, &mut backend);

    receiver.changed().await.unwrap();
    assert_eq!(*receiver.borrow(), BackendState::Root);
}
