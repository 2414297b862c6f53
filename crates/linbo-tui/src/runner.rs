//! Main TUI runner - entry point and event loop

use std::time::Instant;

use linbo_app::backend::Backend;
use linbo_app::message::Message;
use linbo_app::process::process_message;
use linbo_app::signals;
use linbo_app::state::KioskState;
use linbo_core::prelude::*;
use linbo_core::Size;
use tokio::sync::{mpsc, watch};

use super::{event, render, terminal};

/// Run the kiosk in the terminal until quit or until `stop` reports that the
/// backend is done (for example after a reboot request)
pub async fn run<B: Backend>(
    state: &mut KioskState,
    backend: &mut B,
    stop: impl Fn(&B) -> bool,
) -> Result<()> {
    terminal::install_panic_hook();
    let mouse = state.settings.ui.mouse;
    let mut term = terminal::init(mouse)?;

    // Signal handler sends Message::Quit on SIGINT/SIGTERM
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(16);
    signals::spawn_signal_handler(msg_tx);

    let result = run_loop(&mut term, state, backend, msg_rx, stop);

    terminal::restore(mouse);
    info!("Terminal restored");
    result
}

fn run_loop<B: Backend>(
    term: &mut ratatui::DefaultTerminal,
    state: &mut KioskState,
    backend: &mut B,
    mut msg_rx: mpsc::Receiver<Message>,
    stop: impl Fn(&B) -> bool,
) -> Result<()> {
    let started = Instant::now();
    let frame_interval = state.settings.ui.frame_interval();
    let mut states: watch::Receiver<_> = backend.subscribe();

    let size = term.size()?;
    process_message(
        state,
        backend,
        Message::Resize(Size::new(i32::from(size.width), i32::from(size.height))),
    );
    let initial = *states.borrow_and_update();
    process_message(state, backend, Message::StateChanged(initial));

    while !state.should_quit() && !stop(&*backend) {
        // External messages (signal handler)
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, backend, msg);
        }

        // Backend state published since the last frame
        if states.has_changed().unwrap_or(false) {
            let published = *states.borrow_and_update();
            process_message(state, backend, Message::StateChanged(published));
        }

        term.draw(|frame| render::view(frame, state))?;

        // Wait for input until the next frame is due
        if let Some(message) = event::poll(frame_interval)? {
            process_message(state, backend, message);
        }
        process_message(state, backend, Message::Tick(started.elapsed()));
    }

    Ok(())
}
