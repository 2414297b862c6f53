//! Semantic style builders for the kiosk screen.

use linbo_app::interactive::ControlState;
use linbo_core::BackendState;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

/// Style of a pill-shaped button in the given control state
pub fn pill(state: ControlState, primary: bool) -> Style {
    let base = if primary {
        Style::default().fg(palette::TEXT_PRIMARY).bg(palette::PILL_PRIMARY_BG)
    } else {
        Style::default().fg(palette::TEXT_PRIMARY).bg(palette::PILL_BG)
    };
    match state {
        ControlState::Disabled => Style::default().fg(palette::TEXT_MUTED).bg(palette::PILL_BG),
        ControlState::Pressed => base.bg(palette::PILL_PRESSED_BG),
        ControlState::Hovered => base.add_modifier(Modifier::BOLD),
        ControlState::Focused => Style::default()
            .fg(palette::CONTRAST_FG)
            .bg(palette::ACCENT)
            .add_modifier(Modifier::BOLD),
        ControlState::Normal => base,
    }
}

/// Border style of a card in the given control state
pub fn card_border(state: ControlState) -> Style {
    match state {
        ControlState::Disabled => text_muted(),
        ControlState::Hovered | ControlState::Focused | ControlState::Pressed => border_active(),
        ControlState::Normal => border_inactive(),
    }
}

// --- Block builders ---
pub fn glass_block(border: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(Style::default().bg(palette::CARD_BG))
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(accent_bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Backend state mapping ---

/// Style of the action-area status line for a backend state
pub fn status_line(state: BackendState) -> Style {
    match state {
        BackendState::StartActionError | BackendState::RootActionError => status_red()
            .add_modifier(Modifier::BOLD),
        BackendState::RootActionSuccess => Style::default()
            .fg(palette::STATUS_GREEN)
            .add_modifier(Modifier::BOLD),
        BackendState::RootTimeout | BackendState::Autostarting => {
            Style::default().fg(palette::STATUS_YELLOW)
        }
        BackendState::Disabled => text_muted(),
        _ => text_secondary(),
    }
}
