//! Decides, on each pass of the application's main loop, whether the chain
//! should be read again and the observer notified.

use crate::{
    capture::Capture,
    clock::{Instant, Interval},
    observer::Observer,
};

/// Fires an observer with a fresh capture no more often than once per
/// interval.
///
/// Without an observer the scheduler is disabled and ticks do nothing. An
/// interval of zero disables automatic firing, leaving only forced ticks.
pub struct PollScheduler<O> {
    /// Receives captures, or None when disabled
    observer: Option<O>,

    /// The minimum time between automatic fires
    interval: Interval,

    /// Automatic fires happen strictly after this instant. None until the
    /// first fire, meaning already due.
    deadline: Option<Instant>,
}

impl<O> PollScheduler<O> {
    /// Creates a disabled scheduler
    pub const fn new() -> Self {
        Self {
            observer: None,
            interval: Interval::from_ticks(0),
            deadline: None,
        }
    }

    /// Registers the observer and interval, replacing any previous ones.
    /// The next tick is due immediately.
    pub fn configure(&mut self, observer: O, interval: Interval) {
        self.observer = Some(observer);
        self.interval = interval;
        self.deadline = None;
    }

    /// Returns to the disabled state, handing back the observer
    pub fn disable(&mut self) -> Option<O> {
        self.deadline = None;
        self.observer.take()
    }

    /// True if an observer is registered
    pub fn is_enabled(&self) -> bool {
        self.observer.is_some()
    }

    /// The configured interval
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// The instant after which the next automatic fire may happen, or None
    /// if it is due now
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true if a tick at `now` would fire
    pub fn is_due(&self, now: Instant, force: bool) -> bool {
        if self.observer.is_none() {
            return false;
        }

        if force {
            return true;
        }

        // plain counter comparison, a wrapped counter costs at most one
        // early or missed fire
        self.interval.ticks() > 0
            && self
                .deadline
                .map_or(true, |deadline| now.ticks() > deadline.ticks())
    }

    /// Captures and notifies the observer if a fire is due, returning true
    /// if it fired. `capture` is only called when firing.
    ///
    /// A panicking observer unwinds through this call; nothing is retried.
    pub fn tick<F, const DEPTH: usize>(&mut self, now: Instant, force: bool, capture: F) -> bool
    where
        O: Observer<DEPTH>,
        F: FnOnce() -> Capture<DEPTH>,
    {
        if !self.is_due(now, force) {
            return false;
        }

        let Some(observer) = self.observer.as_mut() else {
            return false;
        };

        let capture = capture();
        observer.notify(&capture);
        self.deadline = Some(Instant::from_ticks(
            now.ticks().wrapping_add(self.interval.ticks()),
        ));

        #[cfg(feature = "logging")]
        defmt::trace!(
            "PollScheduler fired at {}, forced {}, next after {}",
            now,
            force,
            self.deadline
        );

        true
    }
}

impl<O> Default for PollScheduler<O> {
    fn default() -> Self {
        Self::new()
    }
}
