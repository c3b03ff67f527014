//! Quiescence-window debouncing for search input.
//!
//! [`Debouncer`] is a pure state machine driven by explicit instants, so it
//! can be stepped from any loop.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the latest value until it has been stable for one window.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
    settled: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Start from an already-settled value, so re-entering it is not an event.
    #[must_use]
    pub const fn settled_at(window: Duration, value: T) -> Self {
        Self {
            window,
            pending: None,
            settled: Some(value),
        }
    }

    /// Record a new raw value. Restarts the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// When the pending value will settle, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Emit the pending value once its window has elapsed.
    ///
    /// A value equal to the last emitted one is swallowed: typing and then
    /// deleting a character inside one window triggers nothing.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline().is_some_and(|at| at <= now);
        if !due {
            return None;
        }
        let (value, _) = self.pending.take()?;
        if self.settled.as_ref() == Some(&value) {
            return None;
        }
        self.settled = Some(value.clone());
        Some(value)
    }
}

pub(crate) async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
