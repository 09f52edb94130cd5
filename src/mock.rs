//! Mocked pins for testing the chain, backed by a simulated chain of
//! 74HC165 devices.
//!
//! The simulation samples its parallel inputs on the rising edge of the
//! latch line and moves to the next serial bit on each rising edge of the
//! clock while the latch is high. Every pin access is recorded so tests can
//! check the order of the protocol.

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::v2::{InputPin, OutputPin};

type MockError = &'static str;

/// A single pin access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The clock line was driven
    Clock(bool),
    /// The latch line was driven
    Latch(bool),
    /// The clock enable line was driven
    Enable(bool),
    /// The serial data line was read
    Read,
}

/// The output lines driven by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Serial clock (CP)
    Clock,
    /// Parallel load (PL)
    Latch,
    /// Clock enable (CE)
    Enable,
}

#[derive(Default)]
struct SimulatedChain {
    /// Parallel input state of each device, nearest the host first
    inputs: Vec<u8>,
    /// Serial stream sampled at the last latch
    stream: Vec<bool>,
    cursor: usize,
    clock: bool,
    latch: bool,
    events: Vec<Event>,
}

impl SimulatedChain {
    fn sample(&mut self) {
        self.stream = self
            .inputs
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |bit| byte & (0x1 << bit) != 0))
            .collect();
        self.cursor = 0;
    }

    fn drive(&mut self, line: Line, level: bool) {
        match line {
            Line::Clock => {
                if level && !self.clock && self.latch {
                    self.cursor += 1;
                }
                self.clock = level;
                self.events.push(Event::Clock(level));
            }
            Line::Latch => {
                if level && !self.latch {
                    self.sample();
                }
                self.latch = level;
                self.events.push(Event::Latch(level));
            }
            Line::Enable => self.events.push(Event::Enable(level)),
        }
    }

    fn serial_output(&mut self) -> bool {
        self.events.push(Event::Read);
        // an unconnected serial input reads low past the end of the chain
        self.latch && self.stream.get(self.cursor).copied().unwrap_or(false)
    }
}

/// A handle on the simulated chain, used to change the parallel inputs and
/// hand out pins.
#[derive(Clone, Default)]
pub struct MockChain(Rc<RefCell<SimulatedChain>>);

impl MockChain {
    /// Creates a chain with the given parallel inputs
    pub fn new(inputs: &[u8]) -> Self {
        let chain = Self::default();
        chain.set_inputs(inputs);
        chain
    }

    /// Changes the parallel inputs; takes effect at the next latch
    pub fn set_inputs(&self, inputs: &[u8]) {
        self.0.borrow_mut().inputs = inputs.to_vec();
    }

    /// An output pin driving the given line
    pub fn output(&self, line: Line) -> MockPin {
        MockPin {
            line,
            chain: self.clone(),
        }
    }

    /// An input pin reading the serial output
    pub fn input(&self) -> MockInputPin {
        MockInputPin { chain: self.clone() }
    }

    /// The clock, data and latch pins, in that order
    pub fn pins(&self) -> (MockPin, MockInputPin, MockPin) {
        (self.output(Line::Clock), self.input(), self.output(Line::Latch))
    }

    /// Every pin access so far
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Forgets the recorded pin accesses
    pub fn clear_events(&self) {
        self.0.borrow_mut().events.clear();
    }
}

/// A mocked output pin
pub struct MockPin {
    line: Line,
    chain: MockChain,
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.chain.0.borrow_mut().drive(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.chain.0.borrow_mut().drive(self.line, true);
        Ok(())
    }
}

/// A mocked input pin connected to the chain's serial output
pub struct MockInputPin {
    chain: MockChain,
}

impl InputPin for MockInputPin {
    type Error = MockError;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.chain.0.borrow_mut().serial_output())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.chain.0.borrow_mut().serial_output())
    }
}

/// An input pin whose reads always fail
pub struct FaultyInputPin;

impl InputPin for FaultyInputPin {
    type Error = MockError;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Err("pin fault")
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Err("pin fault")
    }
}
