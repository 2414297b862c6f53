//! Footer with version info and power buttons, status line and tooltip

use linbo_app::interactive::Interactive;
use linbo_app::orchestrator::PowerRow;
use linbo_core::BackendState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{palette, styles};

use super::{fit, to_area};

pub struct Footer<'a> {
    rect: linbo_core::Rect,
    text: &'a str,
    power: &'a PowerRow,
}

impl<'a> Footer<'a> {
    pub fn new(rect: linbo_core::Rect, text: &'a str, power: &'a PowerRow) -> Self {
        Self { rect, text, power }
    }
}

impl Widget for Footer<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        let Some(area) = to_area(self.rect, bounds) else {
            return;
        };
        let middle = area.y + area.height / 2;
        // Leave room for the info indicator in the bottom-left corner
        let text_x = area.x.saturating_add(area.width / 20 + 4).min(area.right());
        let text_row = Rect::new(text_x, middle, area.right() - text_x, 1);
        Paragraph::new(self.text)
            .style(styles::text_muted())
            .render(text_row, buf);

        for button in self.power.visible() {
            let Some(rect) = to_area(button.rect(), bounds) else {
                continue;
            };
            let row = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1);
            Paragraph::new(fit(button.label(), usize::from(row.width)))
                .alignment(Alignment::Center)
                .style(styles::pill(button.control().state(), false))
                .render(row, buf);
        }
    }
}

/// Centered status text in the action area
pub struct StatusLine<'a> {
    rect: linbo_core::Rect,
    text: &'a str,
    state: BackendState,
}

impl<'a> StatusLine<'a> {
    pub fn new(rect: linbo_core::Rect, text: &'a str, state: BackendState) -> Self {
        Self { rect, text, state }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        let Some(area) = to_area(self.rect, bounds) else {
            return;
        };
        Paragraph::new(self.text)
            .alignment(Alignment::Center)
            .style(styles::status_line(self.state))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// One-line tooltip centered above `anchor`
pub struct Tooltip<'a> {
    text: &'a str,
    anchor: linbo_core::Rect,
}

impl<'a> Tooltip<'a> {
    pub fn new(text: &'a str, anchor: linbo_core::Rect) -> Self {
        Self { text, anchor }
    }
}

impl Widget for Tooltip<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        let width = (self.text.width() as i32 + 2).min(i32::from(bounds.width));
        let x = self.anchor.x + (self.anchor.width - width) / 2;
        let x = x.clamp(0, (i32::from(bounds.width) - width).max(0));
        let rect = linbo_core::Rect::new(x, self.anchor.y - 1, width, 1);
        let Some(area) = to_area(rect, bounds) else {
            return;
        };
        Paragraph::new(fit(self.text, usize::from(area.width)))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(palette::TEXT_PRIMARY)
                    .bg(palette::TOOLTIP_BG),
            )
            .render(area, buf);
    }
}
