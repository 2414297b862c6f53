//! Terminal setup and restoration

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use linbo_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Enter the alternate screen, optionally capturing the mouse
pub fn init(mouse: bool) -> Result<ratatui::DefaultTerminal> {
    let terminal = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
    if mouse {
        execute!(std::io::stdout(), EnableMouseCapture)?;
    }
    Ok(terminal)
}

/// Leave the alternate screen and release the mouse
pub fn restore(mouse: bool) {
    if mouse {
        if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
            warn!("Failed to release mouse capture: {}", e);
        }
    }
    ratatui::restore();
}
