//! Millisecond time types used for poll scheduling

/// A point in time, in milliseconds, as read from a free running counter.
/// Comparisons and additions wrap with the underlying u32.
pub type Instant = fugit::TimerInstantU32<1000>;

/// A poll interval in milliseconds
pub type Interval = fugit::MillisDurationU32;

/// A monotonic millisecond time source
pub trait Clock {
    /// Returns the current time
    fn now(&self) -> Instant;
}

impl<F> Clock for F
where
    F: Fn() -> Instant,
{
    fn now(&self) -> Instant {
        self()
    }
}
