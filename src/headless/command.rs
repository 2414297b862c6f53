//! Line commands accepted on stdin in headless mode
//!
//! ```text
//! key esc | key f1 | key enter | key tab | key a | key ctrl-c
//! type <text>
//! login <password>
//! click <x> <y>
//! resize <width> <height>
//! tick <milliseconds>
//! quit
//! ```

use linbo_app::input_key::InputKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    Key(InputKey),
    /// Type each character as a key press
    Type(String),
    /// Open the login dialog, type the password and submit
    Login(String),
    Click { x: i32, y: i32 },
    Resize { width: i32, height: i32 },
    /// Advance the virtual clock
    Tick(u64),
    Quit,
}

impl HeadlessCommand {
    /// Parse one input line; `Ok(None)` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        let command = match verb {
            "q" | "quit" => HeadlessCommand::Quit,
            "key" => HeadlessCommand::Key(
                parse_key(rest).ok_or_else(|| format!("unknown key: {rest:?}"))?,
            ),
            "type" => HeadlessCommand::Type(rest.to_string()),
            "login" => HeadlessCommand::Login(rest.to_string()),
            "tick" => HeadlessCommand::Tick(
                rest.parse()
                    .map_err(|_| format!("invalid milliseconds: {rest:?}"))?,
            ),
            "click" => {
                let (x, y) = parse_pair(rest)?;
                HeadlessCommand::Click { x, y }
            }
            "resize" => {
                let (width, height) = parse_pair(rest)?;
                HeadlessCommand::Resize { width, height }
            }
            _ => return Err(format!("unknown command: {verb:?}")),
        };
        Ok(Some(command))
    }
}

fn parse_pair(text: &str) -> Result<(i32, i32), String> {
    let mut parts = text.split_whitespace().map(str::parse::<i32>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(a)), Some(Ok(b)), None) => Ok((a, b)),
        _ => Err(format!("expected two integers: {text:?}")),
    }
}

fn parse_key(name: &str) -> Option<InputKey> {
    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "esc" | "escape" => InputKey::Esc,
        "enter" | "return" => InputKey::Enter,
        "tab" => InputKey::Tab,
        "backtab" | "shift-tab" => InputKey::BackTab,
        "backspace" => InputKey::Backspace,
        "space" => InputKey::Char(' '),
        "up" => InputKey::Up,
        "down" => InputKey::Down,
        "left" => InputKey::Left,
        "right" => InputKey::Right,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(InputKey::F(n));
            }
            if let Some(c) = lower.strip_prefix("ctrl-") {
                let mut chars = c.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(InputKey::CharCtrl(c)),
                    _ => None,
                };
            }
            let mut chars = name.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(InputKey::Char(c)),
                _ => None,
            };
        }
    };
    Some(key)
}
