//! Admin sidebar and client-info drawer

use linbo_app::admin_sidebar::AdminSidebar;
use linbo_app::client_info::ClientInfoSidebar;
use linbo_app::interactive::Interactive;
use linbo_app::sidebar_item::{ExpandingSidebarItem, MIN_FONT_SIZE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

use super::{fit, to_area};

/// Right-hand admin panel with its expanding action items
pub struct AdminSidebarView<'a> {
    sidebar: &'a AdminSidebar,
}

impl<'a> AdminSidebarView<'a> {
    pub fn new(sidebar: &'a AdminSidebar) -> Self {
        Self { sidebar }
    }
}

impl Widget for AdminSidebarView<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        if !self.sidebar.is_paintable() {
            return;
        }
        let Some(area) = to_area(self.sidebar.rect(), bounds) else {
            return;
        };
        styles::glass_block(styles::border_inactive()).render(area, buf);

        for (_, item) in self.sidebar.items() {
            let Some(pill) = to_area(item.pill_rect(), bounds) else {
                continue;
            };
            let width = usize::from(pill.width);
            let mut style = styles::pill(item.control().state(), false);
            if item.opacity() < 1.0 {
                style = style.add_modifier(Modifier::DIM);
            }
            Paragraph::new(item_label(item, width))
                .alignment(Alignment::Center)
                .style(style)
                .render(pill, buf);
        }
    }
}

/// Nominal glyph size of one terminal cell
const CELL_FONT_SIZE: u16 = 8;

/// Text for a sidebar pill `width` cells wide.
///
/// The full label once it fits, otherwise the short label. Glyphs cannot
/// shrink in a terminal, so a label that needs a smaller font is cut, and one
/// that does not fit even at the smallest size is reduced to its initial.
fn item_label(item: &ExpandingSidebarItem, width: usize) -> String {
    if item.label().width() <= width {
        return item.label().to_string();
    }
    let fits = |text: &str, size: u16| {
        text.width() * usize::from(size) <= width * usize::from(CELL_FONT_SIZE)
    };
    let size = item.collapsed_font_size(CELL_FONT_SIZE, fits);
    let short = item.short_label();
    if size == MIN_FONT_SIZE && !fits(short, size) {
        short.chars().take(1).collect()
    } else {
        fit(short, width)
    }
}

/// Info indicator plus the drawer with host details
pub struct ClientInfoView<'a> {
    info: &'a ClientInfoSidebar,
}

impl<'a> ClientInfoView<'a> {
    pub fn new(info: &'a ClientInfoSidebar) -> Self {
        Self { info }
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width);
        let mut lines = Vec::new();
        for row in self.info.rows() {
            if row.separator_before {
                lines.push(Line::from(Span::styled(
                    "─".repeat(width),
                    styles::border_inactive(),
                )));
            }
            lines.push(Line::from(Span::styled(row.label, styles::text_muted())));
            lines.push(Line::from(Span::styled(
                fit(&row.value, width),
                styles::text_primary(),
            )));
        }
        Paragraph::new(lines).render(area, buf);
    }
}

impl Widget for ClientInfoView<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        let indicator = self.info.indicator();
        if let Some(area) = to_area(indicator.hit_rect(), bounds) {
            let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
            Paragraph::new("i")
                .alignment(Alignment::Center)
                .style(styles::pill(indicator.control().state(), false))
                .render(row, buf);
        }

        if !self.info.is_paintable() {
            return;
        }
        let Some(area) = to_area(self.info.rect(), bounds) else {
            return;
        };
        let block = styles::glass_block(styles::border_inactive())
            .title(Span::styled(" Client ", styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);
        self.render_rows(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use linbo_app::config::AnimationSettings;

    use super::*;

    fn item(label: &str) -> ExpandingSidebarItem {
        ExpandingSidebarItem::new(label, AnimationSettings::default().sidebar_item())
    }

    #[test]
    fn test_full_label_when_it_fits() {
        assert_eq!(item_label(&item("Update cache"), 12), "Update cache");
    }

    #[test]
    fn test_short_label_when_collapsed() {
        assert_eq!(item_label(&item("Update cache"), 8), "Update");
    }

    #[test]
    fn test_short_label_cut_while_font_can_shrink() {
        // "Partition" needs 9 cells; at size 4 it would fit into 5
        assert_eq!(item_label(&item("Partition drive"), 5), fit("Partition", 5));
    }

    #[test]
    fn test_initial_below_smallest_font() {
        assert_eq!(item_label(&item("Register"), 3), "R");
    }
}
