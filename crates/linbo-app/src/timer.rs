//! One-shot deferred timers
//!
//! A [`Deferred`] replaces single-shot toolkit timers. It is armed with a due
//! time and polled from the owner's tick. Firing does not imply the action
//! should still happen: owners re-check their current intent when a timer
//! fires, so a stale timer is harmless.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    pending: Option<(Duration, T)>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `delay` after `now`, replacing a pending one
    pub fn arm(&mut self, now: Duration, delay: Duration, payload: T) {
        self.pending = Some((now + delay, payload));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// Take the payload if the timer is due at `now`
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((due, _)) if *due <= now => self.pending.take().map(|(_, payload)| payload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fires_once_when_due() {
        let mut timer = Deferred::new();
        timer.arm(ms(100), ms(300), "hide");

        assert_eq!(timer.poll(ms(399)), None);
        assert_eq!(timer.poll(ms(400)), Some("hide"));
        assert_eq!(timer.poll(ms(500)), None);
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut timer = Deferred::new();
        timer.arm(ms(0), ms(300), 1);
        timer.arm(ms(200), ms(300), 2);

        assert_eq!(timer.poll(ms(300)), None);
        assert_eq!(timer.due_at(), Some(ms(500)));
        assert_eq!(timer.poll(ms(500)), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut timer = Deferred::new();
        timer.arm(ms(0), ms(10), ());
        timer.cancel();
        assert_eq!(timer.poll(ms(100)), None);
    }
}
