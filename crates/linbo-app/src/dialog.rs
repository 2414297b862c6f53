//! Modal dialogs
//!
//! Every dialog is a [`SlidingPanel`] that slides up from below the screen.
//! Dialogs are modal: while one is open it receives all keyboard input. The
//! dialog content beyond the login and cache forms is owned by the backend
//! front end; the kiosk only routes open/close and the accept action.

use std::sync::Arc;
use std::time::Duration;

use linbo_core::prelude::*;
use linbo_core::{clamp_dim, scale, DownloadMethod, OsDescriptor, Rect, Size};
use serde::Serialize;

use crate::backend::Backend;
use crate::config::AnimationSettings;
use crate::input_key::InputKey;
use crate::sliding_panel::{Axis, PanelGeometry, SlidingPanel};

/// Horizontal offsets of the wrong-password shake, one per step
pub const SHAKE_OFFSETS: [i32; 9] = [-6, 6, -4, 4, -2, 2, -1, 1, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Login,
    ImageCreation,
    ImageUpload,
    Terminal,
    PartitionConfirmation,
    Registration,
    UpdateCache,
}

impl DialogKind {
    pub const ALL: [DialogKind; 7] = [
        DialogKind::Login,
        DialogKind::ImageCreation,
        DialogKind::ImageUpload,
        DialogKind::Terminal,
        DialogKind::PartitionConfirmation,
        DialogKind::Registration,
        DialogKind::UpdateCache,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DialogKind::Login => "Login",
            DialogKind::ImageCreation => "Create image",
            DialogKind::ImageUpload => "Upload image",
            DialogKind::Terminal => "Terminal",
            DialogKind::PartitionConfirmation => "Partition drive",
            DialogKind::Registration => "Register client",
            DialogKind::UpdateCache => "Update cache",
        }
    }

    /// Width and height as fractions of the screen
    fn proportions(self) -> (f32, f32) {
        match self {
            DialogKind::Login => (0.35, 0.25),
            DialogKind::ImageCreation => (0.5, 0.6),
            DialogKind::ImageUpload => (0.5, 0.3),
            DialogKind::Terminal => (0.9, 0.6),
            DialogKind::PartitionConfirmation => (0.5, 0.25),
            DialogKind::Registration => (0.5, 0.5),
            DialogKind::UpdateCache => (0.4, 0.4),
        }
    }

    fn geometry(self, screen: Size) -> PanelGeometry {
        let (width_factor, height_factor) = self.proportions();
        let width = clamp_dim(scale(screen.width, width_factor));
        let height = clamp_dim(scale(screen.height, height_factor));
        let shown = Rect::from_size(screen).centered(width, height);
        PanelGeometry::new(shown, Axis::Vertical, screen.height - shown.y)
    }
}

/// Running wrong-password shake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shake {
    started_at: Duration,
    step: Duration,
}

impl Shake {
    fn step_index(&self, now: Duration) -> Option<usize> {
        let step = self.step.as_millis();
        if step == 0 {
            return None;
        }
        let elapsed = now.saturating_sub(self.started_at);
        let index = (elapsed.as_millis() / step) as usize;
        (index < SHAKE_OFFSETS.len()).then_some(index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    password: String,
    wrong_password: bool,
    shake: Option<Shake>,
    shake_offset: i32,
}

impl LoginForm {
    pub fn type_char(&mut self, c: char) {
        self.wrong_password = false;
        self.password.push(c);
    }

    pub fn backspace(&mut self) {
        self.password.pop();
    }

    /// Password length, for bullet rendering
    pub fn masked_len(&self) -> usize {
        self.password.chars().count()
    }

    pub fn wrong_password(&self) -> bool {
        self.wrong_password
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Horizontal offset of the dialog caused by the shake
    pub fn shake_offset(&self) -> i32 {
        self.shake_offset
    }

    /// Submit the password. Returns whether the login succeeded.
    fn submit(&mut self, backend: &mut dyn Backend, now: Duration, step: Duration) -> bool {
        let accepted = backend.login(&self.password);
        self.password.clear();
        if accepted {
            self.wrong_password = false;
        } else {
            info!("Login failed");
            self.wrong_password = true;
            self.shake = Some(Shake {
                started_at: now,
                step,
            });
        }
        accepted
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn tick(&mut self, now: Duration) -> bool {
        let Some(shake) = self.shake else {
            return false;
        };
        match shake.step_index(now) {
            Some(index) => self.shake_offset = SHAKE_OFFSETS[index],
            None => {
                self.shake = None;
                self.shake_offset = 0;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCacheForm {
    method: DownloadMethod,
    format_first: bool,
}

impl UpdateCacheForm {
    fn new(method: DownloadMethod) -> Self {
        Self {
            method,
            format_first: false,
        }
    }

    pub fn method(&self) -> DownloadMethod {
        self.method
    }

    pub fn format_first(&self) -> bool {
        self.format_first
    }

    pub fn cycle_method(&mut self, forward: bool) {
        let all = DownloadMethod::ALL;
        let index = all.iter().position(|m| *m == self.method).unwrap_or(0);
        let next = if forward {
            (index + 1) % all.len()
        } else {
            (index + all.len() - 1) % all.len()
        };
        self.method = all[next];
    }

    pub fn toggle_format(&mut self) {
        self.format_first = !self.format_first;
    }
}

#[derive(Debug, Clone)]
pub struct Dialog {
    kind: DialogKind,
    panel: SlidingPanel,
    /// OS the image dialogs act on
    subject: Option<Arc<OsDescriptor>>,
}

impl Dialog {
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn subject(&self) -> Option<&Arc<OsDescriptor>> {
        self.subject.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    pub fn is_paintable(&self) -> bool {
        self.panel.is_paintable()
    }

    pub fn rect(&self) -> Rect {
        self.panel.rect()
    }
}

/// What a routed key did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKeyOutcome {
    /// No dialog is open; the key was not consumed
    NotHandled,
    Handled,
    Closed(DialogKind),
}

#[derive(Debug, Clone)]
pub struct DialogSet {
    dialogs: Vec<Dialog>,
    /// Paint order, last is top-most; closing dialogs stay until hidden
    order: Vec<DialogKind>,
    login: LoginForm,
    update_cache: UpdateCacheForm,
    default_method: DownloadMethod,
    shake_step: Duration,
    screen: Size,
}

impl DialogSet {
    pub fn new(settings: &AnimationSettings, default_method: DownloadMethod) -> Self {
        let screen = Size::new(1, 1);
        let dialogs = DialogKind::ALL
            .into_iter()
            .map(|kind| Dialog {
                kind,
                panel: SlidingPanel::new(kind.geometry(screen), settings.dialog_slide()),
                subject: None,
            })
            .collect();
        Self {
            dialogs,
            order: Vec::new(),
            login: LoginForm::default(),
            update_cache: UpdateCacheForm::new(default_method),
            default_method,
            shake_step: settings.shake_step(),
            screen,
        }
    }

    fn dialog(&self, kind: DialogKind) -> Option<&Dialog> {
        self.dialogs.iter().find(|dialog| dialog.kind == kind)
    }

    fn dialog_mut(&mut self, kind: DialogKind) -> Option<&mut Dialog> {
        self.dialogs.iter_mut().find(|dialog| dialog.kind == kind)
    }

    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    pub fn update_cache(&self) -> &UpdateCacheForm {
        &self.update_cache
    }

    pub fn resize(&mut self, screen: Size) {
        self.screen = screen;
        for dialog in &mut self.dialogs {
            dialog.panel.set_geometry(dialog.kind.geometry(screen));
        }
        self.drop_hidden();
    }

    fn drop_hidden(&mut self) {
        let dialogs = &self.dialogs;
        self.order.retain(|kind| {
            dialogs
                .iter()
                .any(|dialog| dialog.kind == *kind && dialog.panel.is_paintable())
        });
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.dialog(kind).is_some_and(Dialog::is_open)
    }

    pub fn any_open(&self) -> bool {
        self.dialogs.iter().any(Dialog::is_open)
    }

    /// Top-most open dialog
    pub fn top(&self) -> Option<DialogKind> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|kind| self.is_open(*kind))
    }

    /// Paintable dialogs, bottom first
    pub fn paintable(&self) -> impl Iterator<Item = &Dialog> {
        self.order
            .iter()
            .filter_map(|kind| self.dialog(*kind))
            .filter(|dialog| dialog.is_paintable())
    }

    /// Rect of a dialog including the login shake
    pub fn rect(&self, kind: DialogKind) -> Option<Rect> {
        let rect = self.dialog(kind)?.rect();
        if kind == DialogKind::Login {
            Some(rect.translated(self.login.shake_offset(), 0))
        } else {
            Some(rect)
        }
    }

    pub fn is_animating(&self) -> bool {
        self.login.is_shaking() || self.dialogs.iter().any(|dialog| dialog.panel.is_animating())
    }

    pub fn open(
        &mut self,
        kind: DialogKind,
        subject: Option<Arc<OsDescriptor>>,
        now: Duration,
    ) -> bool {
        if kind == DialogKind::UpdateCache && !self.is_open(kind) {
            self.update_cache = UpdateCacheForm::new(self.default_method);
        }
        let Some(dialog) = self.dialog_mut(kind) else {
            return false;
        };
        if subject.is_some() {
            dialog.subject = subject;
        }
        let opened = dialog.panel.open(now);
        if opened {
            debug!("Dialog {:?} opened", kind);
            self.order.retain(|candidate| *candidate != kind);
            self.order.push(kind);
        }
        opened
    }

    /// Close a dialog. Returns whether it was open.
    pub fn close(&mut self, kind: DialogKind, now: Duration) -> bool {
        let closed = self
            .dialog_mut(kind)
            .is_some_and(|dialog| dialog.panel.close(now));
        if closed {
            debug!("Dialog {:?} closed", kind);
            if kind == DialogKind::Login {
                self.login.clear();
            }
        }
        closed
    }

    /// Close without user interaction; reports whether the dialog was open
    pub fn auto_close(&mut self, kind: DialogKind, now: Duration) -> bool {
        self.close(kind, now)
    }

    /// Close every open dialog once. Returns the kinds that were closed.
    pub fn auto_close_all(&mut self, now: Duration) -> Vec<DialogKind> {
        DialogKind::ALL
            .into_iter()
            .filter(|kind| self.auto_close(*kind, now))
            .collect()
    }

    /// Route a key to the top-most open dialog
    pub fn handle_key(
        &mut self,
        key: &InputKey,
        backend: &mut dyn Backend,
        now: Duration,
    ) -> DialogKeyOutcome {
        let Some(top) = self.top() else {
            return DialogKeyOutcome::NotHandled;
        };

        if *key == InputKey::Esc {
            self.close(top, now);
            return DialogKeyOutcome::Closed(top);
        }

        let accept = matches!(key, InputKey::Enter);
        let close = match top {
            DialogKind::Login => match key {
                InputKey::Char(c) => {
                    self.login.type_char(*c);
                    false
                }
                InputKey::Backspace => {
                    self.login.backspace();
                    false
                }
                InputKey::Enter => self.login.submit(backend, now, self.shake_step),
                _ => false,
            },
            DialogKind::UpdateCache => match key {
                InputKey::Up | InputKey::Left => {
                    self.update_cache.cycle_method(false);
                    false
                }
                InputKey::Down | InputKey::Right => {
                    self.update_cache.cycle_method(true);
                    false
                }
                InputKey::Char('f') | InputKey::Char(' ') => {
                    self.update_cache.toggle_format();
                    false
                }
                InputKey::Enter => {
                    backend.update_cache(self.update_cache.method, self.update_cache.format_first);
                    true
                }
                _ => false,
            },
            DialogKind::PartitionConfirmation => match key {
                InputKey::Enter | InputKey::Char('y') => {
                    backend.partition_drive();
                    true
                }
                InputKey::Char('n') => true,
                _ => false,
            },
            DialogKind::ImageCreation | DialogKind::ImageUpload if accept => {
                let os = self.dialog(top).and_then(|dialog| dialog.subject.as_ref());
                match os.map(|os| os.id) {
                    Some(id) if top == DialogKind::ImageCreation => backend.create_image(id),
                    Some(id) => backend.upload_image(id),
                    None => warn!("{:?} dialog without an operating system", top),
                }
                true
            }
            DialogKind::Registration if accept => {
                backend.register_client();
                true
            }
            _ => false,
        };

        if close {
            self.close(top, now);
            DialogKeyOutcome::Closed(top)
        } else {
            DialogKeyOutcome::Handled
        }
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = self.login.tick(now);
        for dialog in &mut self.dialogs {
            changed |= dialog.panel.tick(now);
        }
        self.drop_hidden();
        changed
    }
}
