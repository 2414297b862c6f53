//! File logging for the kiosk
//!
//! The kiosk owns the console it draws on, so logs only ever go to a daily
//! rolling file. LINBO clients often boot with a read-only root, hence the
//! directory override.

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "LINBO_KIOSK_LOG";

/// Environment variable overriding the log directory
pub const LOG_DIR_ENV_VAR: &str = "LINBO_KIOSK_LOG_DIR";

const LOG_FILE_PREFIX: &str = "linbo-kiosk.log";

/// Info for every kiosk crate, warnings from dependencies
const DEFAULT_FILTER: &str = "linbo_kiosk=info,linbo_app=info,linbo_tui=info,linbo_core=info,warn";

/// Initialize the logging subsystem
///
/// # Examples
/// ```bash
/// LINBO_KIOSK_LOG=debug linbo-kiosk
/// LINBO_KIOSK_LOG=linbo_app::orchestrator=trace linbo-kiosk
/// LINBO_KIOSK_LOG_DIR=/tmp/linbo linbo-kiosk --headless
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory(
        std::env::var_os(LOG_DIR_ENV_VAR).map(PathBuf::from),
        dirs::data_local_dir().as_deref(),
    );
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("LINBO kiosk {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Explicit override, else `<data dir>/linbo-kiosk/logs`, else the temp dir
fn log_directory(override_dir: Option<PathBuf>, data_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return dir;
    }
    match data_dir {
        Some(base) => base.join("linbo-kiosk").join("logs"),
        None => std::env::temp_dir().join("linbo-kiosk"),
    }
}
