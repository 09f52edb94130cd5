//! Receivers for captures published by the poll scheduler

use heapless::spsc::Producer;

use crate::capture::Capture;

/// Receives every capture taken when the poll scheduler fires.
///
/// Implemented for closures taking a `&Capture<DEPTH>`, and for
/// [`QueueObserver`] which hands captures to another context.
pub trait Observer<const DEPTH: usize> {
    /// Called with the fresh capture. Runs synchronously inside the tick,
    /// so it should return promptly.
    fn notify(&mut self, capture: &Capture<DEPTH>);
}

impl<F, const DEPTH: usize> Observer<DEPTH> for F
where
    F: FnMut(&Capture<DEPTH>),
{
    fn notify(&mut self, capture: &Capture<DEPTH>) {
        self(capture)
    }
}

/// An observer that never receives anything, used by a driver which has
/// not had a callback configured yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unobserved;

impl<const DEPTH: usize> Observer<DEPTH> for Unobserved {
    fn notify(&mut self, _capture: &Capture<DEPTH>) {}
}

/// Copies each capture into a single producer single consumer queue.
///
/// If the consumer falls behind and the queue is full, the capture is
/// dropped.
pub struct QueueObserver<'a, const DEPTH: usize, const N: usize> {
    producer: Producer<'a, Capture<DEPTH>, N>,
    dropped: u32,
}

impl<'a, const DEPTH: usize, const N: usize> QueueObserver<'a, DEPTH, N> {
    /// Creates an observer feeding the given queue producer
    pub fn new(producer: Producer<'a, Capture<DEPTH>, N>) -> Self {
        Self {
            producer,
            dropped: 0,
        }
    }

    /// Number of captures discarded because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<'a, const DEPTH: usize, const N: usize> Observer<DEPTH> for QueueObserver<'a, DEPTH, N> {
    fn notify(&mut self, capture: &Capture<DEPTH>) {
        if self.producer.enqueue(*capture).is_err() {
            self.dropped = self.dropped.wrapping_add(1);

            #[cfg(feature = "logging")]
            defmt::warn!(
                "Capture queue full, dropped {} captures so far",
                self.dropped
            );
        }
    }
}
