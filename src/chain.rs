//! The read protocol for a chain of 74HC165 shift registers

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::capture::Capture;

/// The order in which the bits of each device byte arrive on the data line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum BitOrder {
    /// Bit 7 (input D7 on a 74HC165) arrives first
    #[default]
    MsbFirst,

    /// Bit 0 arrives first
    LsbFirst,
}

/// A chain of `DEPTH` daisy-chained 74HC165 devices read over three lines.
///
/// The device whose serial output (Q7) is wired to the data pin is device 0
/// and occupies byte 0 of every capture. Each further device feeds its Q7 into
/// the serial input (DS) of the device before it.
pub struct PisoChain<TInputPin, TOutputPin, const DEPTH: usize = 1> {
    /// The most recent capture, overwritten by every read
    buffer: Capture<DEPTH>,

    /// The clock pin for the serial output
    clock_pin: TOutputPin,

    /// The pin to read serial input from
    serial_read_pin: TInputPin,

    /// The pin which samples the parallel inputs into the shift registers
    latch_pin: TOutputPin,

    /// The pin to enable the clock input (CE, active low)
    clock_enable_pin: Option<TOutputPin>,

    /// The order bits arrive in within each device byte
    bit_order: BitOrder,

    /// Tracks whether the chain is currently disabled
    disabled: bool,
}

impl<TInputPin, TOutputPin, const DEPTH: usize> PisoChain<TInputPin, TOutputPin, DEPTH>
where
    TInputPin: InputPin,
    TOutputPin: OutputPin,
{
    const NON_EMPTY: () = assert!(DEPTH > 0, "a chain needs at least one device");

    /// Creates a new chain from the given pins. No clock enable pin is
    /// provided, so the chain is always enabled.
    pub fn new(clock_pin: TOutputPin, serial_read_pin: TInputPin, latch_pin: TOutputPin) -> Self {
        Self::new_with_enable(clock_pin, serial_read_pin, latch_pin, None)
    }

    /// Creates a new chain from the given pins, with an optional clock
    /// enable pin wired to CE on every device
    pub fn new_with_enable(
        clock_pin: TOutputPin,
        serial_read_pin: TInputPin,
        latch_pin: TOutputPin,
        clock_enable_pin: Option<TOutputPin>,
    ) -> Self {
        let () = Self::NON_EMPTY;

        Self {
            buffer: Capture::zeroed(),
            clock_pin,
            serial_read_pin,
            latch_pin,
            clock_enable_pin,
            bit_order: BitOrder::MsbFirst,
            disabled: false,
        }
    }

    /// Sets the order in which bits arrive within each byte
    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    /// Parks the lines in their idle state. Call once before the first read.
    ///
    /// The pin directions are set by the HAL when the pins are converted
    /// into inputs and outputs, before they are handed to the chain.
    pub fn begin(&mut self) {
        self.clock_pin.set_low().ok();
        self.latch_pin.set_low().ok();

        if let Some(ref mut pin) = self.clock_enable_pin {
            pin.set_low().ok();
        }

        self.disabled = false;
    }

    /// Enables the device clocks
    pub fn enable(&mut self) {
        if !self.disabled {
            return;
        }

        if let Some(ref mut pin) = self.clock_enable_pin {
            self.disabled = false;
            pin.set_low().ok();
        }
    }

    /// Inhibits the device clocks. While disabled, [`Self::capture`] leaves
    /// the lines alone and returns the previous capture.
    pub fn disable(&mut self) {
        if self.disabled {
            return;
        }

        if let Some(ref mut pin) = self.clock_enable_pin {
            self.disabled = true;
            pin.set_high().ok();
        }
    }

    /// True if the clocks are inhibited
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The number of devices in the chain
    pub const fn depth(&self) -> usize {
        DEPTH
    }

    /// The result of the most recent capture, without touching the lines
    pub fn last(&self) -> &Capture<DEPTH> {
        &self.buffer
    }

    /// Samples every parallel input in the chain at once and shifts the
    /// result in, one byte per device.
    ///
    /// The device cannot report a fault, so a miswired or missing device
    /// silently produces whatever the data line reads.
    pub fn capture(&mut self) -> &Capture<DEPTH> {
        if self.disabled {
            return &self.buffer;
        }

        self.clock_pin.set_high().ok();

        // inputs are sampled here, later bits reflect this instant
        self.latch_pin.set_high().ok();

        let bit_order = self.bit_order;
        for device in 0..DEPTH {
            let byte = self.shift_in_byte(bit_order);
            self.buffer.bytes_mut()[device] = byte;
        }

        self.latch_pin.set_low().ok();

        #[cfg(feature = "logging")]
        defmt::trace!("PisoChain captured {:x}", self.buffer.as_bytes());

        &self.buffer
    }

    /// Clocks in a single byte from the data line
    fn shift_in_byte(&mut self, bit_order: BitOrder) -> u8 {
        (0..8).fold(0u8, |value, position| {
            let bit = match bit_order {
                BitOrder::MsbFirst => 7 - position,
                BitOrder::LsbFirst => position,
            };

            if self.shift_in_bit() {
                value | (0x1 << bit)
            } else {
                value
            }
        })
    }

    /// Reads the data line then advances the chain by one bit. A read error
    /// counts as a low input.
    fn shift_in_bit(&mut self) -> bool {
        self.clock_pin.set_high().ok();
        let is_high = self.serial_read_pin.is_high().ok().unwrap_or(false);
        self.clock_pin.set_low().ok();

        is_high
    }
}
