//! Explicit, tick-driven property animation
//!
//! Every animated property of a widget is an [`Animated<T>`] field. The field
//! holds at most one [`AnimationTask`]: starting a new animation replaces the
//! in-flight one, so two animations can never fight over the same value. The
//! (widget, property) key of the animation is the field itself.
//!
//! Time is a [`Duration`] measured from an arbitrary epoch (the runner uses the
//! moment the kiosk started). Owners call [`Animated::tick`] once per frame and
//! react to [`Progress::Finished`], which is the completion callback.

use std::time::Duration;

use linbo_core::Rect;

/// Easing curve applied to normalized animation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    InOutQuad,
    OutQuad,
}

impl Easing {
    /// Map linear progress `t` in `0.0..=1.0` onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Duration and easing of one kind of transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub const fn millis(ms: u64, easing: Easing) -> Self {
        Self::new(Duration::from_millis(ms), easing)
    }

    /// Zero-length transition; finishes on the next tick
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }
}

/// Values that can be interpolated
pub trait Lerp: Copy + PartialEq {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for i32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        (from as f32 + (to - from) as f32 * t).round() as i32
    }
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for Rect {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Rect::new(
            i32::lerp(from.x, to.x, t),
            i32::lerp(from.y, to.y, t),
            i32::lerp(from.width, to.width, t),
            i32::lerp(from.height, to.height, t),
        )
    }
}

/// One running animation: start value, end value, duration, easing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTask<T> {
    pub from: T,
    pub to: T,
    pub transition: Transition,
    pub started_at: Duration,
}

impl<T: Lerp> AnimationTask<T> {
    /// Linear progress in `0.0..=1.0` at `now`
    pub fn progress(&self, now: Duration) -> f32 {
        if self.transition.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / self.transition.duration.as_secs_f32()).min(1.0)
    }

    pub fn value_at(&self, now: Duration) -> T {
        let t = self.transition.easing.apply(self.progress(now));
        T::lerp(self.from, self.to, t)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.transition.duration
    }
}

/// Outcome of ticking an animated value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No animation was running
    Idle,
    /// The value moved and the animation continues
    Running,
    /// The animation reached its end value on this tick
    Finished,
}

impl Progress {
    /// Whether the owner should repaint
    pub fn changed(self) -> bool {
        !matches!(self, Progress::Idle)
    }
}

/// A property with at most one active animation
#[derive(Debug, Clone, PartialEq)]
pub struct Animated<T> {
    value: T,
    task: Option<AnimationTask<T>>,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self { value, task: None }
    }

    /// Value as of the last tick
    pub fn value(&self) -> T {
        self.value
    }

    /// Interpolated value at `now`, without advancing the animation
    pub fn value_at(&self, now: Duration) -> T {
        match &self.task {
            Some(task) => task.value_at(now),
            None => self.value,
        }
    }

    /// Where the property is heading (the current value when idle)
    pub fn target(&self) -> T {
        self.task.as_ref().map(|task| task.to).unwrap_or(self.value)
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn task(&self) -> Option<&AnimationTask<T>> {
        self.task.as_ref()
    }

    /// Animate from the current interpolated value towards `to`.
    ///
    /// Re-entrant: requesting the target that is already being approached (or
    /// already reached) keeps the running task instead of restarting it.
    /// Returns whether a new task was started.
    pub fn animate_to(&mut self, to: T, transition: Transition, now: Duration) -> bool {
        if self.target() == to {
            return false;
        }
        let from = self.value_at(now);
        self.value = from;
        self.task = Some(AnimationTask {
            from,
            to,
            transition,
            started_at: now,
        });
        true
    }

    /// Start an animation with an explicit start value, replacing any running task
    pub fn animate(&mut self, from: T, to: T, transition: Transition, now: Duration) {
        self.value = from;
        self.task = Some(AnimationTask {
            from,
            to,
            transition,
            started_at: now,
        });
    }

    /// Cancel any running task and jump to `value`
    pub fn set(&mut self, value: T) {
        self.task = None;
        self.value = value;
    }

    /// Cancel any running task, freezing the value at `now`
    pub fn stop(&mut self, now: Duration) {
        self.value = self.value_at(now);
        self.task = None;
    }

    /// Advance the animation to `now`
    pub fn tick(&mut self, now: Duration) -> Progress {
        let Some(task) = self.task else {
            return Progress::Idle;
        };
        if task.is_finished(now) {
            self.value = task.to;
            self.task = None;
            Progress::Finished
        } else {
            self.value = task.value_at(now);
            Progress::Running
        }
    }
}

impl<T: Lerp + Default> Default for Animated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
