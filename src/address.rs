//! Maps a global bit index across the chain onto a device and a bit within
//! that device's byte.

/// Number of parallel inputs on a single 74HC165
pub const BITS_PER_DEVICE: usize = 8;

/// The location of a single parallel input within a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct BitAddress {
    /// Offset of the device in the capture buffer, 0 being nearest the host
    pub device: usize,

    /// Bit within the device's byte, 0 being the least significant (input D0)
    pub bit: u8,
}

impl BitAddress {
    /// Splits a global bit index into its device and bit
    pub const fn from_index(index: usize) -> Self {
        Self {
            device: index / BITS_PER_DEVICE,
            bit: (index % BITS_PER_DEVICE) as u8,
        }
    }

    /// Returns the global bit index this address refers to
    pub const fn index(self) -> usize {
        self.device * BITS_PER_DEVICE + self.bit as usize
    }

    /// Reads the addressed bit from a buffer of device bytes
    ///
    /// # Panics
    ///
    /// If `device` is outside the buffer.
    #[inline]
    pub fn read(self, buffer: &[u8]) -> bool {
        buffer[self.device] & (0x1 << self.bit) != 0
    }
}

/// Returns the value of the bit at global `index` in `buffer`.
///
/// The caller must keep `index` below `buffer.len() * 8`. This is checked in
/// debug builds; in release builds an out of range index panics on the slice
/// access.
#[inline]
pub fn bit_at(buffer: &[u8], index: usize) -> bool {
    debug_assert!(
        index < buffer.len() * BITS_PER_DEVICE,
        "bit index out of range for chain"
    );

    BitAddress::from_index(index).read(buffer)
}
