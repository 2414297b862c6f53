//! Kiosk state (Model in TEA pattern)

use std::time::Duration;

use linbo_core::{ClientConfig, Size};

use crate::client_info::ClientInfoMetrics;
use crate::config::KioskSettings;
use crate::orchestrator::ViewOrchestrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KioskPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete kiosk state
#[derive(Debug)]
pub struct KioskState {
    /// Root of the widget tree
    pub orchestrator: ViewOrchestrator,

    /// Settings loaded at startup
    pub settings: KioskSettings,

    pub phase: KioskPhase,

    /// Time of the last tick, relative to startup
    pub now: Duration,
}

impl KioskState {
    pub fn new(
        config: &ClientConfig,
        settings: KioskSettings,
        screen: Size,
        metrics: ClientInfoMetrics,
    ) -> Self {
        Self {
            orchestrator: ViewOrchestrator::new(
                config,
                settings.animation.clone(),
                screen,
                metrics,
            ),
            settings,
            phase: KioskPhase::Running,
            now: Duration::ZERO,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == KioskPhase::Quitting
    }
}
