#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(warnings)]
#![no_std]

//! 74HC165 HAL
//!
//! A driver for a daisy chain of parallel to serial shift registers, such
//! as the 74HC165, read over a clock, a data and a latch line. All of the
//! chain's inputs are sampled at a single instant and shifted in as one
//! byte per device. Individual inputs are addressed by a global bit index,
//! and an observer can be notified with fresh captures from a main loop no
//! more often than a configured interval.
//!
//! Built using [`embedded-hal`] traits
//!
//! ## Wiring
//!
//! Device 0 is the one whose serial output (Q7) is connected to the host's
//! data pin. Each further device's Q7 feeds the serial input (DS) of the
//! device before it. Byte 0 of a [`Capture`] comes from device 0, and bit
//! `i` of a device byte is its input D`i`, so global bit index 9 is input
//! D1 of device 1.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2

#[cfg(test)]
extern crate std;

pub mod address;
pub mod capture;
pub mod chain;
pub mod clock;
pub mod driver;
pub mod observer;
pub mod scheduler;

#[cfg(test)]
pub mod mock;

pub use address::{bit_at, BitAddress};
pub use capture::{BitChange, Capture};
pub use chain::{BitOrder, PisoChain};
pub use clock::{Clock, Instant, Interval};
pub use driver::Ic74hc165;
pub use observer::{Observer, QueueObserver, Unobserved};
pub use scheduler::PollScheduler;
