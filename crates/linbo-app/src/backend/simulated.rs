//! In-process backend that simulates a LINBO client
//!
//! Actions complete after a configurable time, authenticated sessions time out
//! on inactivity and the default OS can autostart. Used by the binary when no
//! real backend is attached and by integration tests.

use std::time::Duration;

use linbo_core::prelude::*;
use linbo_core::{BackendState, ClientConfig, DownloadMethod, OsId, StartAction};
use tokio::sync::watch;

use super::Backend;
use crate::config::SimulationSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerRequest {
    Reboot,
    Shutdown,
}

#[derive(Debug)]
pub struct SimulatedBackend {
    config: ClientConfig,
    settings: SimulationSettings,
    state_tx: watch::Sender<BackendState>,
    current_os: Option<OsId>,
    now: Duration,
    entered_state_at: Duration,
    last_activity: Duration,
    power_request: Option<PowerRequest>,
}

impl SimulatedBackend {
    pub fn new(config: ClientConfig, settings: SimulationSettings) -> Self {
        let autostart_os = config.operating_systems.first().map(|os| os.id);
        let (initial, current_os) = match autostart_os {
            Some(os) if settings.autostart_secs > 0 => (BackendState::Autostarting, Some(os)),
            _ => (BackendState::Idle, None),
        };
        let (state_tx, _) = watch::channel(initial);
        Self {
            config,
            settings,
            state_tx,
            current_os,
            now: Duration::ZERO,
            entered_state_at: Duration::ZERO,
            last_activity: Duration::ZERO,
            power_request: None,
        }
    }

    pub fn power_request(&self) -> Option<PowerRequest> {
        self.power_request
    }

    fn set_state(&mut self, state: BackendState) {
        let previous = *self.state_tx.borrow();
        if previous == state {
            return;
        }
        info!("Backend state {} -> {}", previous, state);
        self.entered_state_at = self.now;
        self.state_tx.send_replace(state);
    }

    fn elapsed_in_state(&self) -> Duration {
        self.now.saturating_sub(self.entered_state_at)
    }

    fn action_time(&self) -> Duration {
        Duration::from_secs(self.settings.action_secs)
    }

    fn finish_start_action(&mut self) {
        let bootable = self
            .current_os
            .and_then(|id| self.config.os(id))
            .map(|os| os.has_base_image)
            .unwrap_or(false);
        if bootable {
            info!("Simulated boot of {:?} finished", self.current_os);
            self.set_state(BackendState::Idle);
        } else {
            warn!("No base image for {:?}", self.current_os);
            self.set_state(BackendState::StartActionError);
        }
    }

    fn start_root_action(&mut self, state: BackendState) {
        if self.state() != BackendState::Root {
            warn!("Ignoring {} outside of an authenticated session", state);
            return;
        }
        self.set_state(state);
    }
}

impl Backend for SimulatedBackend {
    fn state(&self) -> BackendState {
        *self.state_tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<BackendState> {
        self.state_tx.subscribe()
    }

    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn os_of_current_action(&self) -> Option<OsId> {
        self.current_os
    }

    fn login(&mut self, password: &str) -> bool {
        if self.state() != BackendState::Idle {
            debug!("Login attempt in state {}", self.state());
            return false;
        }
        if password != self.settings.password {
            info!("Login rejected");
            return false;
        }
        self.last_activity = self.now;
        self.set_state(BackendState::Root);
        true
    }

    fn logout(&mut self) {
        if self.state().is_authenticated() {
            self.set_state(BackendState::Idle);
        }
    }

    fn reboot(&mut self) {
        info!("Reboot requested");
        self.power_request = Some(PowerRequest::Reboot);
    }

    fn shutdown(&mut self) {
        info!("Shutdown requested");
        self.power_request = Some(PowerRequest::Shutdown);
    }

    fn cancel_current_action(&mut self) {
        match self.state() {
            BackendState::Autostarting => self.set_state(BackendState::Idle),
            BackendState::RootTimeout => {
                self.last_activity = self.now;
                self.set_state(BackendState::Root);
            }
            other => debug!("Nothing to cancel in state {}", other),
        }
    }

    fn reset_message(&mut self) {
        match self.state() {
            BackendState::StartActionError => self.set_state(BackendState::Idle),
            BackendState::RootActionError | BackendState::RootActionSuccess => {
                self.last_activity = self.now;
                self.set_state(BackendState::Root);
            }
            _ => {}
        }
    }

    fn restart_activity_timer(&mut self) {
        self.last_activity = self.now;
    }

    fn update_cache(&mut self, method: DownloadMethod, format_first: bool) {
        info!(
            "Updating cache via {} (format first: {})",
            method.label(),
            format_first
        );
        self.start_root_action(BackendState::UpdatingCache);
    }

    fn partition_drive(&mut self) {
        self.start_root_action(BackendState::Partitioning);
    }

    fn register_client(&mut self) {
        self.start_root_action(BackendState::Registering);
    }

    fn create_image(&mut self, os: OsId) {
        self.current_os = Some(os);
        self.start_root_action(BackendState::CreatingImage);
    }

    fn upload_image(&mut self, os: OsId) {
        self.current_os = Some(os);
        self.start_root_action(BackendState::UploadingImage);
    }

    fn execute(&mut self, os: OsId, action: StartAction) {
        let Some(descriptor) = self.config.os(os) else {
            warn!("Execute on unknown {}", os);
            return;
        };
        if !descriptor.action_enabled(action) {
            warn!("{} is not enabled for {}", action.label(), descriptor.name);
            return;
        }
        if !matches!(
            self.state(),
            BackendState::Idle | BackendState::Autostarting
        ) {
            warn!("Cannot {} in state {}", action.label(), self.state());
            return;
        }
        self.current_os = Some(os);
        self.set_state(match action {
            StartAction::Start => BackendState::Starting,
            StartAction::Sync => BackendState::Syncing,
            StartAction::Reinstall => BackendState::Reinstalling,
        });
    }

    fn advance(&mut self, now: Duration) {
        self.now = now;
        let elapsed = self.elapsed_in_state();
        match self.state() {
            BackendState::Autostarting
                if elapsed >= Duration::from_secs(self.settings.autostart_secs) =>
            {
                if let Some(os) = self.current_os {
                    let action = self
                        .config
                        .os(os)
                        .map(|descriptor| descriptor.default_action)
                        .unwrap_or_default();
                    self.execute(os, action);
                }
            }
            state if state.is_start_action() && elapsed >= self.action_time() => {
                self.finish_start_action();
            }
            state if state.is_root_action() && elapsed >= self.action_time() => {
                self.last_activity = now;
                self.set_state(BackendState::RootActionSuccess);
            }
            BackendState::Root
                if now.saturating_sub(self.last_activity)
                    >= Duration::from_secs(self.settings.root_timeout_secs) =>
            {
                self.set_state(BackendState::RootTimeout);
            }
            BackendState::RootTimeout
                if elapsed >= Duration::from_secs(self.settings.root_countdown_secs) =>
            {
                self.set_state(BackendState::Idle);
            }
            _ => {}
        }
    }
}
