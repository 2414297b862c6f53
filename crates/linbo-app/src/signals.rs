//! Termination signals from the init system or console
//!
//! In raw mode Ctrl+C arrives as a key, not as SIGINT, so this mostly sees
//! SIGTERM from the boot environment and SIGHUP when the console goes away.

use linbo_core::prelude::*;
use tokio::sync::mpsc;

use crate::message::Message;

/// Forward the first termination signal as [`Message::Quit`]
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match wait_for_termination().await {
            Ok(name) => {
                info!("Received {}, shutting down", name);
                let _ = tx.send(Message::Quit).await;
            }
            Err(e) => warn!("{}; continuing without signal handling", e),
        }
    });
}

#[cfg(unix)]
async fn wait_for_termination() -> Result<&'static str> {
    use tokio::signal::unix::{signal, Signal, SignalKind};

    fn listen(kind: SignalKind, name: &str) -> Result<Signal> {
        signal(kind).map_err(|e| Error::Signal(format!("cannot listen for {}: {}", name, e)))
    }

    let mut term = listen(SignalKind::terminate(), "SIGTERM")?;
    let mut int = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut hup = listen(SignalKind::hangup(), "SIGHUP")?;

    let name = tokio::select! {
        _ = term.recv() => "SIGTERM",
        _ = int.recv() => "SIGINT",
        _ = hup.recv() => "SIGHUP",
    };
    Ok(name)
}

#[cfg(not(unix))]
async fn wait_for_termination() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::Signal(format!("cannot listen for Ctrl+C: {}", e)))?;
    Ok("Ctrl+C")
}
