//! Headless mode runner - event loop without TUI
//!
//! Commands arrive line by line on stdin; every observable change (applied
//! state, dialogs, view events, power requests) is written to the output as
//! NDJSON.

use std::collections::HashSet;
use std::io::Write;
use std::time::Duration;

use linbo_app::dialog::DialogKind;
use linbo_app::input_key::{InputKey, PointerEvent, PointerKind};
use linbo_app::{process_message, Backend, KioskState, Message, SimulatedBackend, ViewEvent};
use linbo_core::prelude::*;
use linbo_core::{BackendState, Size};
use tokio::sync::mpsc;

use super::command::HeadlessCommand;
use super::HeadlessEvent;

/// One headless kiosk: state, simulated backend and the event sink
pub struct HeadlessSession<W: Write> {
    state: KioskState,
    backend: SimulatedBackend,
    out: W,
    open_dialogs: HashSet<DialogKind>,
    last_state: Option<BackendState>,
    power_reported: bool,
}

impl<W: Write> HeadlessSession<W> {
    pub fn new(state: KioskState, backend: SimulatedBackend, out: W) -> Self {
        Self {
            state,
            backend,
            out,
            open_dialogs: HashSet::new(),
            last_state: None,
            power_reported: false,
        }
    }

    pub fn state(&self) -> &KioskState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Apply the backend's initial state
    pub fn start(&mut self) -> std::io::Result<()> {
        let initial = self.backend.state();
        self.process(Message::StateChanged(initial))
    }

    /// Parse and run one stdin line; parse failures become error events
    pub fn handle_line(&mut self, line: &str) -> std::io::Result<()> {
        match HeadlessCommand::parse(line) {
            Ok(Some(command)) => self.handle(command),
            Ok(None) => Ok(()),
            Err(message) => {
                warn!("Invalid headless command: {}", message);
                HeadlessEvent::error(message, false).write_to(&mut self.out)
            }
        }
    }

    pub fn handle(&mut self, command: HeadlessCommand) -> std::io::Result<()> {
        debug!("Headless command: {:?}", command);
        match command {
            HeadlessCommand::Key(key) => self.process(Message::Key(key)),
            HeadlessCommand::Type(text) => {
                for c in text.chars() {
                    self.process(Message::Key(InputKey::Char(c)))?;
                }
                Ok(())
            }
            HeadlessCommand::Login(password) => {
                let now = self.state.now;
                self.state
                    .orchestrator
                    .dispatch(ViewEvent::LoginRequested, now);
                self.handle(HeadlessCommand::Type(password))?;
                self.process(Message::Key(InputKey::Enter))
            }
            HeadlessCommand::Click { x, y } => {
                for kind in [PointerKind::Moved, PointerKind::Down, PointerKind::Up] {
                    self.process(Message::Pointer(PointerEvent::new(kind, x, y)))?;
                }
                Ok(())
            }
            HeadlessCommand::Resize { width, height } => {
                self.process(Message::Resize(Size::new(width, height)))
            }
            HeadlessCommand::Tick(ms) => {
                let now = self.state.now + Duration::from_millis(ms);
                self.process(Message::Tick(now))
            }
            HeadlessCommand::Quit => self.process(Message::Quit),
        }
    }

    /// Run a message through the update loop and emit what changed
    pub fn process(&mut self, message: Message) -> std::io::Result<()> {
        let events = process_message(&mut self.state, &mut self.backend, message);
        for event in events {
            HeadlessEvent::view_event(event).write_to(&mut self.out)?;
        }
        self.emit_changes()
    }

    fn emit_changes(&mut self) -> std::io::Result<()> {
        let dialogs = self.state.orchestrator.dialogs();
        for kind in DialogKind::ALL {
            let open = dialogs.is_open(kind);
            if open && self.open_dialogs.insert(kind) {
                HeadlessEvent::dialog_opened(kind).write_to(&mut self.out)?;
            } else if !open && self.open_dialogs.remove(&kind) {
                HeadlessEvent::dialog_closed(kind).write_to(&mut self.out)?;
            }
        }

        let applied = self.state.orchestrator.state();
        if applied != self.last_state {
            self.last_state = applied;
            if let Some(state) = applied {
                HeadlessEvent::state_applied(state).write_to(&mut self.out)?;
            }
        }

        if let Some(request) = self.backend.power_request() {
            if !self.power_reported {
                self.power_reported = true;
                info!("Power request {:?}, leaving headless mode", request);
                HeadlessEvent::power_requested(request).write_to(&mut self.out)?;
                self.process(Message::Quit)?;
            }
        }
        Ok(())
    }
}

/// Run in headless mode - read commands from stdin, write JSON events to stdout
pub async fn run_headless(state: KioskState, backend: SimulatedBackend) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("LINBO kiosk starting in HEADLESS mode");
    info!("Client: {}", backend.config().hostname);
    info!("═══════════════════════════════════════════════════════");

    let mut session = HeadlessSession::new(state, backend, std::io::stdout());

    let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
    std::thread::spawn(move || spawn_stdin_reader_blocking(line_tx));

    let (signal_tx, mut signal_rx) = mpsc::channel::<Message>(4);
    linbo_app::signals::spawn_signal_handler(signal_tx);

    session.start()?;

    while !session.should_quit() {
        tokio::select! {
            line = line_rx.recv() => match line {
                Some(line) => session.handle_line(&line)?,
                None => {
                    info!("Stdin closed");
                    break;
                }
            },
            Some(message) = signal_rx.recv() => session.process(message)?,
        }
    }

    info!("LINBO kiosk headless mode exiting");
    Ok(())
}

/// Forward stdin lines to the session (blocking, runs on its own thread)
fn spawn_stdin_reader_blocking(line_tx: mpsc::Sender<String>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if line_tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}

#[cfg(test)]
mod tests {
    use linbo_app::client_info::ClientInfoMetrics;
    use linbo_app::config::{KioskSettings, SimulationSettings};
    use linbo_app::orchestrator::PowerAction;
    use linbo_app::ControlId;
    use linbo_core::ClientConfig;
    use serde_json::Value;

    use super::*;

    fn session(simulation: SimulationSettings) -> HeadlessSession<Vec<u8>> {
        let config = ClientConfig::demo();
        let settings = KioskSettings {
            simulation: simulation.clone(),
            ..KioskSettings::default()
        };
        let state = KioskState::new(&config, settings, Size::new(120, 50), ClientInfoMetrics::CELLS);
        let backend = SimulatedBackend::new(config, simulation);
        let mut session = HeadlessSession::new(state, backend, Vec::new());
        session.start().unwrap();
        session
    }

    /// Drain the written NDJSON lines
    fn take_events(session: &mut HeadlessSession<Vec<u8>>) -> Vec<Value> {
        let text = String::from_utf8(std::mem::take(&mut session.out)).unwrap();
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn names(events: &[Value]) -> Vec<String> {
        events
            .iter()
            .map(|event| event["event"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_start_applies_initial_state() {
        let mut session = session(SimulationSettings::default());
        let events = take_events(&mut session);
        assert_eq!(names(&events), vec!["state_applied"]);
        assert_eq!(events[0]["state"], "idle");
    }

    #[test]
    fn test_login_flow() {
        let mut session = session(SimulationSettings::default());
        take_events(&mut session);

        session.handle_line("login linbo").unwrap();
        let events = take_events(&mut session);
        let names = names(&events);

        assert_eq!(names.first().map(String::as_str), Some("view_event"));
        assert_eq!(events[0]["name"], "login_requested");
        assert!(names.contains(&"dialog_opened".to_string()));
        assert!(names.contains(&"dialog_closed".to_string()));
        let last = events.last().unwrap();
        assert_eq!(last["event"], "state_applied");
        assert_eq!(last["state"], "root");
    }

    #[test]
    fn test_invalid_line_emits_error() {
        let mut session = session(SimulationSettings::default());
        take_events(&mut session);

        session.handle_line("jump 3").unwrap();
        let events = take_events(&mut session);
        assert_eq!(names(&events), vec!["error"]);
        assert_eq!(events[0]["fatal"], false);
        assert!(!session.should_quit());
    }

    #[test]
    fn test_blank_line_is_silent() {
        let mut session = session(SimulationSettings::default());
        take_events(&mut session);
        session.handle_line("   ").unwrap();
        assert!(take_events(&mut session).is_empty());
    }

    #[test]
    fn test_autostart_runs_on_virtual_clock() {
        let mut session = session(SimulationSettings {
            autostart_secs: 2,
            ..SimulationSettings::default()
        });
        let events = take_events(&mut session);
        assert_eq!(events[0]["state"], "autostarting");

        session.handle_line("tick 1000").unwrap();
        assert!(take_events(&mut session).is_empty());

        session.handle_line("tick 1000").unwrap();
        let events = take_events(&mut session);
        assert_eq!(names(&events), vec!["state_applied"]);
        assert_eq!(events[0]["state"], "starting");
    }

    #[test]
    fn test_shutdown_click_reports_power_request_and_quits() {
        let mut session = session(SimulationSettings::default());
        session.handle_line("tick 5000").unwrap();
        take_events(&mut session);

        let rect = session
            .state()
            .orchestrator
            .control_rect(ControlId::Power(PowerAction::Shutdown))
            .unwrap();
        session
            .handle(HeadlessCommand::Click {
                x: rect.x,
                y: rect.y,
            })
            .unwrap();

        let events = take_events(&mut session);
        let power: Vec<&Value> = events
            .iter()
            .filter(|event| event["event"] == "power_requested")
            .collect();
        assert_eq!(power.len(), 1);
        assert_eq!(power[0]["request"], "shutdown");
        assert!(session.should_quit());
    }

    #[test]
    fn test_same_script_same_events() {
        let script = ["tick 500", "key tab", "login guess", "key esc", "login linbo", "tick 3000"];
        let run = || {
            let mut session = session(SimulationSettings::default());
            for line in script {
                session.handle_line(line).unwrap();
            }
            take_events(&mut session)
                .into_iter()
                .map(|mut event| {
                    event.as_object_mut().unwrap().remove("timestamp");
                    event
                })
                .collect::<Vec<_>>()
        };
        let first = run();
        assert!(!first.is_empty());
        assert_eq!(first, run());
    }

    #[test]
    fn test_quit_command() {
        let mut session = session(SimulationSettings::default());
        session.handle_line("quit").unwrap();
        assert!(session.should_quit());
    }
}
