//! Header bar with the product title and host name

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

use super::to_area;

pub struct Header<'a> {
    rect: linbo_core::Rect,
    hostname: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(rect: linbo_core::Rect, hostname: &'a str) -> Self {
        Self { rect, hostname }
    }
}

impl Widget for Header<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        let Some(area) = to_area(self.rect, bounds) else {
            return;
        };
        let mut spans = vec![Span::styled("LINBO", styles::accent_bold())];
        if !self.hostname.is_empty() {
            spans.push(Span::styled("  ·  ", styles::text_muted()));
            spans.push(Span::styled(self.hostname, styles::text_secondary()));
        }
        // Title sits on the bottom row of the header band
        let row = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(row, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_header_shows_title_and_host() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 4));
        Header::new(linbo_core::Rect::new(0, 0, 40, 3), "pc01").render(buf.area, &mut buf);
        let line = row(&buf, 2);
        assert!(line.contains("LINBO  ·  pc01"), "{line}");
        assert!(row(&buf, 0).trim().is_empty());
    }
}
