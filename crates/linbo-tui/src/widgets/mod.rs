//! Custom widget components
//!
//! Kiosk geometry is computed by `linbo-app` in absolute screen cells and may
//! lie partly off screen while a panel slides. Every widget here therefore
//! takes the frame area as its clip bounds and converts its own rects with
//! [`to_area`].

mod dialog;
mod footer;
mod header;
pub mod modal_overlay;
mod os_card;
mod sidebar;

pub use dialog::DialogView;
pub use footer::{Footer, StatusLine, Tooltip};
pub use header::Header;
pub use os_card::{OsCard, PlaceholderView};
pub use sidebar::{AdminSidebarView, ClientInfoView};

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Convert a layout rect to a buffer area, clipped to `bounds`
///
/// Returns `None` when nothing of the rect is on screen.
pub fn to_area(rect: linbo_core::Rect, bounds: Rect) -> Option<Rect> {
    let left = rect.x.max(i32::from(bounds.x));
    let top = rect.y.max(i32::from(bounds.y));
    let right = rect.right().min(i32::from(bounds.right()));
    let bottom = rect.bottom().min(i32::from(bounds.bottom()));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Truncate `text` to `width` columns, marking the cut with an ellipsis
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_area_inside_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let rect = linbo_core::Rect::new(10, 5, 20, 4);
        assert_eq!(to_area(rect, bounds), Some(Rect::new(10, 5, 20, 4)));
    }

    #[test]
    fn test_to_area_clips_negative_origin() {
        let bounds = Rect::new(0, 0, 80, 24);
        let rect = linbo_core::Rect::new(-5, 2, 10, 3);
        assert_eq!(to_area(rect, bounds), Some(Rect::new(0, 2, 5, 3)));
    }

    #[test]
    fn test_to_area_off_screen() {
        let bounds = Rect::new(0, 0, 80, 24);
        assert_eq!(to_area(linbo_core::Rect::new(80, 0, 10, 3), bounds), None);
        assert_eq!(to_area(linbo_core::Rect::new(0, -3, 10, 3), bounds), None);
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("Windows 11", 20), "Windows 11");
        assert_eq!(fit("Windows 11", 6), "Windo…");
        assert_eq!(fit("Windows 11", 0), "");
    }
}
