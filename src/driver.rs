//! The application facing driver, combining a chain with a poll scheduler

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::{
    capture::Capture,
    chain::PisoChain,
    clock::{Clock, Instant, Interval},
    observer::{Observer, Unobserved},
    scheduler::PollScheduler,
};

/// A 74HC165 chain of `DEPTH` devices that can be read directly, or polled
/// from a main loop to notify an observer `O` with fresh captures.
///
/// ```ignore
/// let mut inputs: Ic74hc165<_, _, _, 2> = Ic74hc165::new(clock, data, latch)
///     .configure_callback(|capture: &Capture<2>| handle(capture), Interval::millis(100));
/// inputs.begin();
///
/// loop {
///     inputs.poll_maybe(&clock_source, false);
/// }
/// ```
pub struct Ic74hc165<TInputPin, TOutputPin, O = Unobserved, const DEPTH: usize = 1> {
    chain: PisoChain<TInputPin, TOutputPin, DEPTH>,
    scheduler: PollScheduler<O>,
}

impl<TInputPin, TOutputPin, const DEPTH: usize> Ic74hc165<TInputPin, TOutputPin, Unobserved, DEPTH>
where
    TInputPin: InputPin,
    TOutputPin: OutputPin,
{
    /// Creates a driver with no callback from the clock, data and latch pins
    pub fn new(clock_pin: TOutputPin, serial_read_pin: TInputPin, latch_pin: TOutputPin) -> Self {
        Self::from_chain(PisoChain::new(clock_pin, serial_read_pin, latch_pin))
    }

    /// Creates a driver with no callback around an already built chain
    pub fn from_chain(chain: PisoChain<TInputPin, TOutputPin, DEPTH>) -> Self {
        Self {
            chain,
            scheduler: PollScheduler::new(),
        }
    }
}

impl<TInputPin, TOutputPin, O, const DEPTH: usize> Ic74hc165<TInputPin, TOutputPin, O, DEPTH>
where
    TInputPin: InputPin,
    TOutputPin: OutputPin,
    O: Observer<DEPTH>,
{
    /// Parks the lines in their idle state, call once during setup
    pub fn begin(&mut self) {
        self.chain.begin();
    }

    /// Reads every input in the chain
    pub fn read(&mut self) -> &Capture<DEPTH> {
        self.chain.capture()
    }

    /// Reads the chain and returns the byte of a single device
    ///
    /// # Panics
    ///
    /// If `device >= DEPTH`.
    pub fn read_byte(&mut self, device: usize) -> u8 {
        self.chain.capture().byte(device)
    }

    /// Reads the chain and returns the state of the input at global `index`
    ///
    /// # Panics
    ///
    /// If `index >= DEPTH * 8`.
    pub fn read_bit(&mut self, index: usize) -> bool {
        self.chain.capture().bit(index)
    }

    /// The most recent capture, without reading the chain again
    pub fn last(&self) -> &Capture<DEPTH> {
        self.chain.last()
    }

    /// Access to the underlying chain, e.g. to enable or disable its clocks
    pub fn chain_mut(&mut self) -> &mut PisoChain<TInputPin, TOutputPin, DEPTH> {
        &mut self.chain
    }

    /// Registers an observer, fired at most once per `interval` by
    /// [`Self::tick`]. An interval of zero only fires on forced ticks. The
    /// first tick afterwards is due immediately.
    pub fn configure_callback<P>(
        self,
        observer: P,
        interval: Interval,
    ) -> Ic74hc165<TInputPin, TOutputPin, P, DEPTH>
    where
        P: Observer<DEPTH>,
    {
        let mut scheduler = PollScheduler::new();
        scheduler.configure(observer, interval);

        Ic74hc165 {
            chain: self.chain,
            scheduler,
        }
    }

    /// Replaces the observer and interval with ones of the same type
    pub fn reconfigure_callback(&mut self, observer: O, interval: Interval) {
        self.scheduler.configure(observer, interval);
    }

    /// Stops notifications, handing back the observer
    pub fn disable_callback(&mut self) -> Option<O> {
        self.scheduler.disable()
    }

    /// The scheduler state
    pub fn scheduler(&self) -> &PollScheduler<O> {
        &self.scheduler
    }

    /// Reads the chain and notifies the observer if `force` is set or the
    /// interval has elapsed since the last notification. Returns true if
    /// the observer was notified.
    ///
    /// While the chain's clocks are disabled nothing is read, so nothing
    /// fires and the schedule is left as it was.
    pub fn tick(&mut self, now: Instant, force: bool) -> bool {
        if self.chain.is_disabled() {
            return false;
        }

        let chain = &mut self.chain;
        self.scheduler.tick(now, force, || *chain.capture())
    }

    /// As [`Self::tick`], reading the time from `clock`
    pub fn poll_maybe<C>(&mut self, clock: &C, force: bool) -> bool
    where
        C: Clock,
    {
        self.tick(clock.now(), force)
    }

    /// Releases the chain, dropping the scheduler
    pub fn release(self) -> PisoChain<TInputPin, TOutputPin, DEPTH> {
        self.chain
    }
}
