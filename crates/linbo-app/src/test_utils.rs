//! Helpers for building kiosk state in tests of dependent crates

use std::time::Duration;

use linbo_core::{BackendState, ClientConfig, OsId, Size};

use crate::client_info::ClientInfoMetrics;
use crate::config::KioskSettings;
use crate::state::KioskState;

/// Kiosk with `state` applied and every animation settled
pub fn settled_state(
    config: &ClientConfig,
    screen: Size,
    state: BackendState,
    current_os: Option<OsId>,
) -> KioskState {
    let mut kiosk = KioskState::new(
        config,
        KioskSettings::default(),
        screen,
        ClientInfoMetrics::CELLS,
    );
    kiosk.orchestrator.apply_state(state, current_os, Duration::ZERO);
    settle(&mut kiosk);
    kiosk
}

/// Tick far enough ahead that every running animation finishes
pub fn settle(kiosk: &mut KioskState) {
    kiosk.now += Duration::from_secs(5);
    let now = kiosk.now;
    kiosk.orchestrator.tick(now);
    // A finished shrink may start a second tween
    kiosk.now += Duration::from_secs(5);
    let now = kiosk.now;
    kiosk.orchestrator.tick(now);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_state_is_idle() {
        let mut kiosk = settled_state(
            &ClientConfig::demo(),
            Size::new(80, 24),
            BackendState::Idle,
            None,
        );
        kiosk.orchestrator.apply_state(BackendState::Syncing, Some(OsId(1)), kiosk.now);
        assert!(kiosk.orchestrator.is_animating());
        settle(&mut kiosk);
        assert!(!kiosk.orchestrator.is_animating());
    }
}
