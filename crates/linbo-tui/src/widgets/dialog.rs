//! Modal dialogs drawn on top of the main screen

use linbo_app::dialog::{Dialog, DialogKind, DialogSet};
use linbo_core::DownloadMethod;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use crate::theme::styles;

use super::{modal_overlay, to_area};

const BULLET: char = '●';

pub struct DialogView<'a> {
    dialogs: &'a DialogSet,
    dialog: &'a Dialog,
}

impl<'a> DialogView<'a> {
    pub fn new(dialogs: &'a DialogSet, dialog: &'a Dialog) -> Self {
        Self { dialogs, dialog }
    }

    fn subject_name(&self) -> String {
        self.dialog
            .subject()
            .map(|os| os.display_name())
            .unwrap_or_default()
    }

    fn hint(text: &str) -> Line<'_> {
        Line::from(Span::styled(text, styles::text_muted()))
    }

    fn body(&self) -> Vec<Line<'static>> {
        match self.dialog.kind() {
            DialogKind::Login => {
                let login = self.dialogs.login();
                let mut lines = vec![
                    Line::from("Enter the root password"),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Password: ", styles::text_muted()),
                        Span::styled(
                            BULLET.to_string().repeat(login.masked_len()),
                            styles::text_primary(),
                        ),
                    ]),
                ];
                if login.wrong_password() {
                    lines.push(Line::from(Span::styled(
                        "Wrong password",
                        styles::status_red().add_modifier(Modifier::BOLD),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Self::hint("Enter log in · Esc cancel"));
                lines
            }
            DialogKind::ImageCreation => vec![
                Line::from(format!("Create a new image of {}", self.subject_name())),
                Line::from(""),
                Self::hint("Enter create · Esc cancel"),
            ],
            DialogKind::ImageUpload => vec![
                Line::from(format!("Upload the image of {}", self.subject_name())),
                Line::from(""),
                Self::hint("Enter upload · Esc cancel"),
            ],
            DialogKind::Terminal => vec![
                Line::from("Root shell on this client"),
                Line::from(""),
                Self::hint("Esc close"),
            ],
            DialogKind::PartitionConfirmation => vec![
                Line::from("Partition the drive? All data on it will be lost."),
                Line::from(""),
                Self::hint("y/Enter partition · n/Esc cancel"),
            ],
            DialogKind::Registration => vec![
                Line::from("Register this client with the server"),
                Line::from(""),
                Self::hint("Enter register · Esc cancel"),
            ],
            DialogKind::UpdateCache => self.update_cache_body(),
        }
    }

    fn update_cache_body(&self) -> Vec<Line<'static>> {
        let form = self.dialogs.update_cache();
        let mut lines = vec![Line::from(Span::styled(
            "Download method",
            styles::text_muted(),
        ))];
        for method in DownloadMethod::ALL {
            let selected = method == form.method();
            let marker = if selected { "(•) " } else { "( ) " };
            let style = if selected {
                styles::accent_bold()
            } else {
                styles::text_secondary()
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", method.label()),
                style,
            )));
        }
        let check = if form.format_first() { "[x]" } else { "[ ]" };
        lines.push(Line::from(""));
        lines.push(Line::from(format!("{check} Format cache partition first")));
        lines.push(Line::from(""));
        lines.push(Self::hint("↑↓ method · f format · Enter start · Esc cancel"));
        lines
    }
}

impl Widget for DialogView<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        if !self.dialog.is_paintable() {
            return;
        }
        let Some(rect) = self.dialogs.rect(self.dialog.kind()) else {
            return;
        };
        let Some(area) = to_area(rect, bounds) else {
            return;
        };
        Clear.render(area, buf);
        modal_overlay::render_shadow(buf, area);
        let block = styles::modal_block(self.dialog.kind().title());
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.body())
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
