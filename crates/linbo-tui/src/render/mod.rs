//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use linbo_app::state::KioskState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::theme::palette;
use crate::widgets::{
    modal_overlay, AdminSidebarView, ClientInfoView, DialogView, Footer, Header, OsCard,
    PlaceholderView, StatusLine, Tooltip,
};

/// Render the complete kiosk screen (View function in TEA)
///
/// Pure with respect to `state`: every geometry value comes from the
/// orchestrator, widgets only clip and draw.
pub fn view(frame: &mut Frame, state: &KioskState) {
    let area = frame.area();
    let orchestrator = &state.orchestrator;
    let layout = orchestrator.layout();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );
    frame.render_widget(Header::new(layout.header, orchestrator.hostname()), area);

    let grid = orchestrator.grid();
    match grid.placeholder() {
        Some(placeholder) => {
            frame.render_widget(PlaceholderView::new(placeholder, grid.rect()), area);
        }
        None => {
            for entry in grid.entries() {
                frame.render_widget(OsCard::new(entry), area);
            }
        }
    }

    if let (Some(backend_state), Some(text)) = (orchestrator.state(), orchestrator.status_text()) {
        frame.render_widget(StatusLine::new(layout.action_area, &text, backend_state), area);
    }

    frame.render_widget(AdminSidebarView::new(orchestrator.admin_sidebar()), area);
    frame.render_widget(
        Footer::new(
            layout.footer,
            orchestrator.footer_text(),
            orchestrator.power_row(),
        ),
        area,
    );
    frame.render_widget(ClientInfoView::new(orchestrator.client_info()), area);

    let dialogs = orchestrator.dialogs();
    if dialogs.paintable().next().is_none() {
        render_tooltip(frame, state);
        return;
    }
    modal_overlay::dim_background(frame.buffer_mut(), area);
    for dialog in dialogs.paintable() {
        frame.render_widget(DialogView::new(dialogs, dialog), area);
    }
}

fn render_tooltip(frame: &mut Frame, state: &KioskState) {
    let orchestrator = &state.orchestrator;
    let anchor = orchestrator
        .hovered()
        .or(orchestrator.focused())
        .and_then(|id| orchestrator.control_rect(id));
    if let (Some(text), Some(anchor)) = (orchestrator.tooltip(), anchor) {
        let area = frame.area();
        frame.render_widget(Tooltip::new(&text, anchor), area);
    }
}
