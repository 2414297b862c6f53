//! OS selector cards and the empty-grid placeholder

use linbo_app::interactive::{ControlState, Interactive};
use linbo_app::os_entry::OsSelectorEntry;
use linbo_app::os_grid::Placeholder;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme::{palette, styles};

use super::{fit, to_area};

/// One operating system card: icon, name and action pills
pub struct OsCard<'a> {
    entry: &'a OsSelectorEntry,
}

impl<'a> OsCard<'a> {
    pub fn new(entry: &'a OsSelectorEntry) -> Self {
        Self { entry }
    }

    fn icon_glyph(&self) -> String {
        self.entry
            .os()
            .name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    fn render_label(&self, area: Rect, buf: &mut Buffer, state: ControlState) {
        let name_style = if state == ControlState::Disabled {
            styles::text_muted()
        } else {
            styles::text_primary().add_modifier(Modifier::BOLD)
        };
        let width = usize::from(area.width);
        let mut spans = Vec::new();
        if self.entry.has_warning() {
            spans.push(Span::styled(
                "⚠ ",
                Style::default().fg(palette::STATUS_YELLOW),
            ));
        }
        let used = if self.entry.has_warning() { 2 } else { 0 };
        spans.push(Span::styled(
            fit(&self.entry.display_name(), width.saturating_sub(used)),
            name_style,
        ));
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_pills(&self, bounds: Rect, buf: &mut Buffer) {
        for pill in self.entry.visible_pills() {
            let Some(area) = to_area(pill.rect(), bounds) else {
                continue;
            };
            let style = styles::pill(pill.control().state(), pill.is_primary());
            Paragraph::new(fit(pill.label(), usize::from(area.width)))
                .alignment(Alignment::Center)
                .style(style)
                .render(area, buf);
        }
    }
}

impl Widget for OsCard<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        if !self.entry.is_paintable() {
            return;
        }
        let Some(area) = to_area(self.entry.rect(), bounds) else {
            return;
        };
        let state = self.entry.control().state();
        styles::glass_block(styles::card_border(state)).render(area, buf);

        let layout = self.entry.card_layout();
        if let Some(icon) = to_area(layout.icon, bounds) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(styles::border_inactive());
            let inner = block.inner(icon);
            block.render(icon, buf);
            Paragraph::new(self.icon_glyph())
                .alignment(Alignment::Center)
                .style(styles::accent_bold())
                .render(inner, buf);
        }
        if let Some(label) = to_area(layout.label, bounds) {
            self.render_label(label, buf, state);
        }
        self.render_pills(bounds, buf);
    }
}

/// Shown instead of the grid when no operating system is configured
pub struct PlaceholderView<'a> {
    placeholder: &'a Placeholder,
    rect: linbo_core::Rect,
}

impl<'a> PlaceholderView<'a> {
    pub fn new(placeholder: &'a Placeholder, rect: linbo_core::Rect) -> Self {
        Self { placeholder, rect }
    }
}

impl Widget for PlaceholderView<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        let Some(area) = to_area(self.rect, bounds) else {
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                self.placeholder.message.as_str(),
                Style::default()
                    .fg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(self.placeholder.details.iter().map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), styles::text_muted()),
                Span::styled(value.as_str(), styles::text_secondary()),
            ])
        }));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
