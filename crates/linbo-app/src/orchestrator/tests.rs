use super::*;
use crate::backend::MockBackend;
use crate::sidebar_item::ExpandPhase;
use linbo_core::{Rect, StartAction};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn orchestrator() -> ViewOrchestrator {
    ViewOrchestrator::new(
        &ClientConfig::demo(),
        AnimationSettings::default(),
        Size::new(120, 50),
        ClientInfoMetrics::CELLS,
    )
}

fn in_state(state: BackendState) -> ViewOrchestrator {
    let mut orchestrator = orchestrator();
    orchestrator.apply_state(state, None, ms(0));
    orchestrator
}

/// Backend that accepts activity pings and reports `state`
fn backend(state: BackendState) -> MockBackend {
    let mut backend = MockBackend::new();
    backend.expect_restart_activity_timer().return_const(());
    backend.expect_state().return_const(state);
    backend
}

fn click(orchestrator: &mut ViewOrchestrator, backend: &mut MockBackend, at: Point, now: Duration) {
    for kind in [PointerKind::Moved, PointerKind::Down, PointerKind::Up] {
        orchestrator.handle_pointer(
            PointerEvent {
                kind,
                position: at,
            },
            backend,
            now,
        );
    }
}

fn top_left(rect: Rect) -> Point {
    Point::new(rect.x, rect.y)
}

// ─────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────

#[test]
fn test_three_systems_two_by_two_with_last_centred() {
    let orchestrator = in_state(BackendState::Idle);
    let grid = orchestrator.grid();
    let names: Vec<String> = grid.entries().iter().map(|e| e.display_name()).collect();
    assert_eq!(names, vec!["Windows 11  23H2", "Ubuntu  22.04", "Debian  12"]);

    let rects: Vec<Rect> = grid.entries().iter().map(|e| e.rect()).collect();
    assert_eq!(rects[0].y, rects[1].y);
    assert!(rects[1].x > rects[0].right() - 1);
    assert!(rects[2].y > rects[0].bottom() - 1);

    let grid_centre = grid.rect().x + grid.rect().width / 2;
    let third_centre = rects[2].x + rects[2].width / 2;
    assert!((grid_centre - third_centre).abs() <= 1);
}

#[test]
fn test_root_power_row() {
    let mut orchestrator = in_state(BackendState::Idle);
    assert!(orchestrator.power_row().is_visible(PowerAction::Settings));
    assert!(!orchestrator.power_row().is_visible(PowerAction::Logout));

    orchestrator.apply_state(BackendState::Root, None, ms(10));
    let visible: Vec<PowerAction> = orchestrator
        .power_row()
        .visible()
        .map(PowerButton::action)
        .collect();
    assert_eq!(
        visible,
        vec![PowerAction::Logout, PowerAction::Reboot, PowerAction::Shutdown]
    );
}

#[test]
fn test_power_row_hidden_while_action_runs() {
    let orchestrator = in_state(BackendState::Syncing);
    assert_eq!(orchestrator.power_row().visible().count(), 0);
}

#[test]
fn test_first_state_is_not_animated() {
    let mut orchestrator = in_state(BackendState::Idle);
    assert!(!orchestrator.grid_height.is_running());
    assert_eq!(orchestrator.layout().grid.height, 17);

    orchestrator.apply_state(BackendState::Starting, Some(OsId(0)), ms(100));
    assert!(orchestrator.grid_height.is_running());
    assert!(orchestrator.is_animating());

    orchestrator.tick(ms(500));
    assert_eq!(orchestrator.layout().grid.height, 10);
    assert_eq!(orchestrator.layout().action_area.height, 10);
}

#[test]
fn test_resize_relayouts_without_animation() {
    let mut orchestrator = in_state(BackendState::Idle);
    orchestrator.resize(Size::new(200, 80), ms(50));
    assert_eq!(orchestrator.layout().grid.width, 140);
    assert_eq!(orchestrator.layout().grid.height, 28);
    assert!(!orchestrator.grid_height.is_running());
}

#[test]
fn test_status_text() {
    let mut orchestrator = in_state(BackendState::Idle);
    assert_eq!(orchestrator.status_text(), None);
    orchestrator.apply_state(BackendState::Syncing, Some(OsId(1)), ms(10));
    assert_eq!(orchestrator.status_text().as_deref(), Some("Syncing Ubuntu"));
}

// ─────────────────────────────────────────────────────────
// Dialogs
// ─────────────────────────────────────────────────────────

#[test]
fn test_root_timeout_closes_every_dialog_once() {
    let mut orchestrator = in_state(BackendState::Root);
    orchestrator.dispatch(ViewEvent::TerminalRequested, ms(0));
    orchestrator.dispatch(ViewEvent::RegisterRequested, ms(0));
    orchestrator.tick(ms(300));
    assert!(orchestrator.dialogs().is_open(DialogKind::Terminal));

    orchestrator.apply_state(BackendState::RootTimeout, None, ms(1000));
    assert!(!orchestrator.dialogs().any_open());

    // A repeated timeout must not restart the closing slide
    orchestrator.tick(ms(1150));
    orchestrator.apply_state(BackendState::RootTimeout, None, ms(1150));
    orchestrator.tick(ms(1300));
    assert_eq!(orchestrator.dialogs().paintable().count(), 0);
}

#[test]
fn test_settings_button_opens_login() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    let settings = orchestrator
        .power_row()
        .visible()
        .find(|button| button.action() == PowerAction::Settings)
        .map(PowerButton::rect)
        .unwrap();

    click(&mut orchestrator, &mut backend, top_left(settings), ms(10));
    assert!(orchestrator.dialogs().is_open(DialogKind::Login));
    assert_eq!(orchestrator.drain_events(), vec![ViewEvent::LoginRequested]);
    assert!(orchestrator.drain_events().is_empty());
}

#[test]
fn test_pointer_is_blocked_while_dialog_open() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    backend.expect_execute().times(0);
    orchestrator.dispatch(ViewEvent::LoginRequested, ms(0));

    let card = orchestrator.grid().entries()[0].rect();
    click(&mut orchestrator, &mut backend, top_left(card), ms(10));
    assert_eq!(orchestrator.hovered(), None);
}

// ─────────────────────────────────────────────────────────
// Keyboard
// ─────────────────────────────────────────────────────────

#[test]
fn test_escape_cancels_autostart() {
    let mut orchestrator = in_state(BackendState::Autostarting);
    let mut backend = backend(BackendState::Autostarting);
    backend.expect_cancel_current_action().times(1).return_const(());
    orchestrator.handle_key(&InputKey::Esc, &mut backend, ms(10));
}

#[test]
fn test_escape_resets_message() {
    let mut orchestrator = in_state(BackendState::StartActionError);
    let mut backend = backend(BackendState::StartActionError);
    backend.expect_reset_message().times(1).return_const(());
    orchestrator.handle_key(&InputKey::Esc, &mut backend, ms(10));
}

#[test]
fn test_escape_logs_out_of_root() {
    let mut orchestrator = in_state(BackendState::Root);
    let mut backend = backend(BackendState::Root);
    backend.expect_logout().times(1).return_const(());
    orchestrator.handle_key(&InputKey::Esc, &mut backend, ms(10));
}

#[test]
fn test_escape_cancels_root_timeout() {
    let mut orchestrator = in_state(BackendState::RootTimeout);
    let mut backend = backend(BackendState::RootTimeout);
    backend.expect_cancel_current_action().times(1).return_const(());
    backend.expect_logout().never();
    orchestrator.handle_key(&InputKey::Esc, &mut backend, ms(10));
}

#[test]
fn test_escape_ignored_while_root_action_runs() {
    for state in [BackendState::Partitioning, BackendState::UpdatingCache] {
        let mut orchestrator = in_state(state);
        let mut backend = backend(state);
        backend.expect_cancel_current_action().never();
        backend.expect_reset_message().never();
        backend.expect_logout().never();
        assert!(!orchestrator.dialogs().any_open());

        orchestrator.handle_key(&InputKey::Esc, &mut backend, ms(10));
        assert_eq!(orchestrator.state(), Some(state));
    }
}

#[test]
fn test_escape_with_dialog_only_closes_dialog() {
    let mut orchestrator = in_state(BackendState::Root);
    let mut backend = backend(BackendState::Root);
    backend.expect_logout().times(0);
    orchestrator.dispatch(ViewEvent::TerminalRequested, ms(0));

    orchestrator.handle_key(&InputKey::Esc, &mut backend, ms(10));
    assert!(!orchestrator.dialogs().any_open());
}

#[test]
fn test_function_key_toggles_client_info() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    orchestrator.handle_key(&InputKey::F(1), &mut backend, ms(0));
    assert!(orchestrator.client_info().is_open());
    orchestrator.handle_key(&InputKey::F(1), &mut backend, ms(10));
    assert!(!orchestrator.client_info().is_open());
}

#[test]
fn test_tab_traverses_pills_then_power_row() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);

    orchestrator.handle_key(&InputKey::Tab, &mut backend, ms(0));
    assert_eq!(
        orchestrator.focused(),
        Some(ControlId::Pill(OsId(0), PillAction::Start(StartAction::Start)))
    );

    orchestrator.handle_key(&InputKey::BackTab, &mut backend, ms(10));
    assert_eq!(
        orchestrator.focused(),
        Some(ControlId::Power(PowerAction::Shutdown))
    );
    // 3 cards with 3 pills each, plus 3 power buttons
    assert_eq!(orchestrator.focus_chain().len(), 12);
}

#[test]
fn test_enter_activates_focused_pill() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    backend
        .expect_execute()
        .withf(|os, action| *os == OsId(0) && *action == StartAction::Start)
        .times(1)
        .return_const(());

    orchestrator.handle_key(&InputKey::Tab, &mut backend, ms(0));
    orchestrator.handle_key(&InputKey::Enter, &mut backend, ms(10));
}

#[test]
fn test_focus_dropped_when_control_disappears() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    orchestrator.handle_key(&InputKey::BackTab, &mut backend, ms(0));
    assert!(orchestrator.focused().is_some());

    orchestrator.apply_state(BackendState::Starting, Some(OsId(0)), ms(10));
    assert_eq!(orchestrator.focused(), None);
}

// ─────────────────────────────────────────────────────────
// Pointer
// ─────────────────────────────────────────────────────────

#[test]
fn test_card_click_runs_default_action() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    backend
        .expect_execute()
        .withf(|os, action| *os == OsId(1) && *action == StartAction::Start)
        .times(1)
        .return_const(());

    let card = orchestrator.grid().entries()[1].rect();
    click(&mut orchestrator, &mut backend, top_left(card), ms(10));
    assert_eq!(orchestrator.hovered(), Some(ControlId::Card(OsId(1))));
}

#[test]
fn test_disabled_card_click_is_ignored() {
    let mut orchestrator = orchestrator();
    orchestrator.apply_state(BackendState::Starting, Some(OsId(0)), ms(0));
    let mut backend = backend(BackendState::Starting);
    backend.expect_execute().times(0);

    let card = orchestrator.grid().entries()[0].rect();
    click(&mut orchestrator, &mut backend, top_left(card), ms(10));
    assert!(orchestrator.drain_events().is_empty());
}

#[test]
fn test_press_then_leave_does_not_activate() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    backend.expect_execute().times(0);

    let card = top_left(orchestrator.grid().entries()[0].rect());
    orchestrator.handle_pointer(
        PointerEvent {
            kind: PointerKind::Down,
            position: card,
        },
        &mut backend,
        ms(0),
    );
    orchestrator.handle_pointer(
        PointerEvent {
            kind: PointerKind::Up,
            position: Point::new(0, 0),
        },
        &mut backend,
        ms(10),
    );
}

#[test]
fn test_hovered_pill_tooltip() {
    let mut orchestrator = in_state(BackendState::Idle);
    let mut backend = backend(BackendState::Idle);
    let pill = orchestrator.grid().entries()[0]
        .visible_pills()
        .next()
        .map(|pill| pill.rect())
        .unwrap();

    orchestrator.handle_pointer(
        PointerEvent {
            kind: PointerKind::Moved,
            position: top_left(pill),
        },
        &mut backend,
        ms(0),
    );
    assert_eq!(orchestrator.tooltip().as_deref(), Some("Start Windows 11"));
    let hovered = orchestrator.hovered().unwrap();
    assert_eq!(orchestrator.control_rect(hovered), Some(pill));
}

#[test]
fn test_card_click_in_root_opens_image_dialog() {
    let mut orchestrator = in_state(BackendState::Root);
    let mut backend = backend(BackendState::Root);

    let card = orchestrator.grid().entries()[2].rect();
    click(&mut orchestrator, &mut backend, top_left(card), ms(10));
    assert_eq!(
        orchestrator.drain_events(),
        vec![ViewEvent::ImageCreationRequested { os: OsId(2) }]
    );
    let dialog = orchestrator.dialogs().paintable().next().unwrap();
    assert_eq!(dialog.kind(), DialogKind::ImageCreation);
    assert_eq!(dialog.subject().map(|os| os.name.as_str()), Some("Debian"));
}

#[test]
fn test_sidebar_item_click_requests_terminal() {
    let mut orchestrator = in_state(BackendState::Root);
    let mut backend = backend(BackendState::Root);
    orchestrator.tick(ms(300));

    let (action, rect) = orchestrator
        .admin_sidebar()
        .items()
        .next()
        .map(|(action, item)| (action, item.hit_rect()))
        .unwrap();
    assert_eq!(action, AdminAction::OpenTerminal);
    let at = Point::new(rect.x, rect.y + rect.height / 2);

    orchestrator.handle_pointer(
        PointerEvent {
            kind: PointerKind::Moved,
            position: at,
        },
        &mut backend,
        ms(300),
    );
    let (_, item) = orchestrator.admin_sidebar().items().next().unwrap();
    assert_eq!(item.phase(), ExpandPhase::Expanding);

    click(&mut orchestrator, &mut backend, at, ms(320));
    assert_eq!(orchestrator.drain_events(), vec![ViewEvent::TerminalRequested]);
    assert!(orchestrator.dialogs().is_open(DialogKind::Terminal));
}

#[test]
fn test_logout_button_calls_backend() {
    let mut orchestrator = in_state(BackendState::Root);
    let mut backend = backend(BackendState::Root);
    backend.expect_logout().times(1).return_const(());

    let logout = orchestrator
        .power_row()
        .visible()
        .next()
        .map(PowerButton::rect)
        .unwrap();
    click(&mut orchestrator, &mut backend, top_left(logout), ms(10));
}
