//! Full-screen render tests for the kiosk view

use std::time::Duration;

use insta::assert_snapshot;
use linbo_app::config::SimulationSettings;
use linbo_app::input_key::{InputKey, PointerEvent, PointerKind};
use linbo_app::state::KioskState;
use linbo_app::test_utils::{settle, settled_state};
use linbo_app::{SimulatedBackend, ViewEvent};
use linbo_core::{BackendState, ClientConfig, OsId, Point, Size};

use super::view;
use crate::test_utils::TestTerminal;

const SCREEN: Size = Size {
    width: 120,
    height: 50,
};

fn render(state: &KioskState) -> TestTerminal {
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, state));
    term
}

fn backend() -> SimulatedBackend {
    SimulatedBackend::new(ClientConfig::demo(), SimulationSettings::default())
}

#[test]
fn test_idle_screen_shows_cards_and_power_row() {
    let state = settled_state(&ClientConfig::demo(), SCREEN, BackendState::Idle, None);
    let term = render(&state);

    for text in ["Windows 11", "Ubuntu", "Debian", "Start", "Settings", "Reboot", "Shutdown"] {
        assert!(term.buffer_contains(text), "missing {text:?}\n{}", term.content());
    }
    assert!(term.buffer_contains("LINBO 4.3.0 · 10.0.0.101"));
    assert!(!term.buffer_contains("Logout"));
}

#[test]
fn test_header_line() {
    let state = settled_state(&ClientConfig::demo(), SCREEN, BackendState::Idle, None);
    let term = render(&state);
    let header = state.orchestrator.layout().header;
    let row = (header.y + header.height - 1) as u16;
    assert_snapshot!(term.line(row).trim(), @"LINBO  ·  r101-pc01");
}

#[test]
fn test_running_action_isolates_card() {
    let state = settled_state(
        &ClientConfig::demo(),
        SCREEN,
        BackendState::Syncing,
        Some(OsId(1)),
    );
    let term = render(&state);

    assert!(term.buffer_contains("Syncing Ubuntu"), "{}", term.content());
    assert!(!term.buffer_contains("Windows 11"));
    assert!(!term.buffer_contains("Shutdown"));
}

#[test]
fn test_root_shows_logout_and_image_pills() {
    let state = settled_state(&ClientConfig::demo(), SCREEN, BackendState::Root, None);
    let term = render(&state);

    assert!(term.buffer_contains("Logout"));
    assert!(term.buffer_contains("Image"));
    assert!(!term.buffer_contains("Settings"));
}

#[test]
fn test_empty_configuration_shows_placeholder() {
    let config = ClientConfig {
        operating_systems: Vec::new(),
        ..ClientConfig::demo()
    };
    let state = settled_state(&config, SCREEN, BackendState::Idle, None);
    let term = render(&state);

    assert!(term.buffer_contains("No operating system configured in start.conf"));
    assert!(term.buffer_contains("Hostname: r101-pc01"));
}

#[test]
fn test_login_dialog_masks_password() {
    let mut state = settled_state(&ClientConfig::demo(), SCREEN, BackendState::Idle, None);
    let mut backend = backend();
    let now = state.now;
    state.orchestrator.dispatch(ViewEvent::LoginRequested, now);
    for c in "abc".chars() {
        state
            .orchestrator
            .handle_key(&InputKey::Char(c), &mut backend, now);
    }
    settle(&mut state);
    let term = render(&state);

    assert!(term.buffer_contains("Login"));
    assert!(term.buffer_contains("Password: ●●●"));
    assert!(!term.buffer_contains("abc"));
}

#[test]
fn test_hovered_pill_shows_tooltip() {
    let mut state = settled_state(&ClientConfig::demo(), SCREEN, BackendState::Idle, None);
    let mut backend = backend();
    let pill = state.orchestrator.grid().entries()[0]
        .visible_pills()
        .next()
        .map(|pill| pill.rect())
        .unwrap();
    state.orchestrator.handle_pointer(
        PointerEvent {
            kind: PointerKind::Moved,
            position: Point::new(pill.x, pill.y),
        },
        &mut backend,
        state.now + Duration::from_millis(1),
    );
    let term = render(&state);

    assert!(term.buffer_contains("Start Windows 11"), "{}", term.content());
}

#[test]
fn test_tiny_screen_does_not_panic() {
    let state = settled_state(
        &ClientConfig::demo(),
        Size::new(8, 4),
        BackendState::Idle,
        None,
    );
    let mut term = TestTerminal::with_size(8, 4);
    term.draw_with(|frame| view(frame, &state));
}
