//! Application entry - settings, client configuration and front-end selection

use std::path::PathBuf;

use linbo_app::client_info::ClientInfoMetrics;
use linbo_app::config::{load_default_settings, load_settings, KioskSettings};
use linbo_app::{KioskState, SimulatedBackend};
use linbo_core::prelude::*;
use linbo_core::{ClientConfig, Size};

/// Screen assumed until the front end reports its real size
const INITIAL_SCREEN: Size = Size::new(120, 50);

/// Options collected from the command line
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Client configuration (`start.conf` as TOML); demo client when absent
    pub client: Option<PathBuf>,

    /// Settings file; default location when absent
    pub settings: Option<PathBuf>,

    /// Overrides the simulated backend's password
    pub password: Option<String>,

    pub headless: bool,
}

/// Main application entry point
pub async fn run(options: LaunchOptions) -> Result<()> {
    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI owns stdout)
    linbo_core::logging::init()?;

    let settings = settings_for(&options);
    let config = match &options.client {
        Some(path) => ClientConfig::load(path).context("Loading client configuration")?,
        None => {
            info!("No client configuration given, using demo client");
            ClientConfig::demo()
        }
    };
    info!(
        "Client {} with {} operating system(s)",
        config.hostname,
        config.operating_systems.len()
    );

    let backend = SimulatedBackend::new(config.clone(), settings.simulation.clone());
    let state = KioskState::new(&config, settings, INITIAL_SCREEN, ClientInfoMetrics::CELLS);

    let result = if options.headless {
        crate::headless::runner::run_headless(state, backend).await
    } else {
        run_tui(state, backend).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("LINBO kiosk exiting");
    result
}

async fn run_tui(mut state: KioskState, mut backend: SimulatedBackend) -> Result<()> {
    linbo_tui::run(&mut state, &mut backend, |backend| {
        backend.power_request().is_some()
    })
    .await?;

    if let Some(request) = backend.power_request() {
        info!("Leaving kiosk for power request {:?}", request);
    }
    Ok(())
}

fn settings_for(options: &LaunchOptions) -> KioskSettings {
    let mut settings = match &options.settings {
        Some(path) => load_settings(path),
        None => load_default_settings(),
    };
    if let Some(password) = &options.password {
        settings.simulation.password = password.clone();
    }
    settings
}
