//! Kiosk error types
//!
//! The view core itself has no recoverable errors: backend failures arrive as
//! [`BackendState`](crate::BackendState) values and are rendered, not raised.
//! What remains is I/O at the edges: settings, the client snapshot, the
//! terminal and OS signals.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Startup inputs
    // ─────────────────────────────────────────────────────────────
    #[error("Settings error: {message}")]
    Settings { message: String },

    #[error("Cannot load client configuration {path}: {message}")]
    ClientConfig { path: PathBuf, message: String },

    // ─────────────────────────────────────────────────────────────
    // Front end
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    #[error("Signal handler error: {0}")]
    Signal(String),
}

impl Error {
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    pub fn client_config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ClientConfig {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    /// The kiosk can keep running (with defaults) after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Settings { .. } | Error::Toml(_) | Error::Signal(_))
    }

    /// The kiosk cannot come up at all
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TerminalInit(_) | Error::ClientConfig { .. })
    }
}

/// Log-and-pass-through context for fallible startup steps
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Lazy variant of [`ResultExt::context`]
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_message_names_path() {
        let err = Error::client_config("/etc/linbo/client.toml", "missing field `hostname`");
        let text = err.to_string();
        assert!(text.contains("/etc/linbo/client.toml"));
        assert!(text.contains("hostname"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_io_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_bad_toml_is_recoverable() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: Error = toml_err.into();
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_terminal_init_is_fatal() {
        assert!(Error::TerminalInit("no tty".into()).is_fatal());
        assert!(!Error::settings("bad value").is_fatal());
    }

    #[test]
    fn test_context_keeps_original_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = result.context("writing settings").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
