//! The buffer of device bytes produced by a single read of the chain

use core::ops::Deref;

use num_traits::PrimInt;

use crate::address::{bit_at, BitAddress, BITS_PER_DEVICE};

/// A snapshot of every parallel input in a chain of `DEPTH` devices, taken
/// at a single latch instant.
///
/// Byte 0 holds the device whose serial output is wired to the host's data
/// pin, i.e. the first byte shifted out. Within a byte, bit 0 is input D0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct Capture<const DEPTH: usize>([u8; DEPTH]);

/// A single input which differs between two captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct BitChange {
    /// The global index of the bit that changed
    pub index: usize,

    /// True if the bit is now high
    pub is_high: bool,
}

impl<const DEPTH: usize> Capture<DEPTH> {
    /// Total number of inputs in the chain
    pub const BITS: usize = DEPTH * BITS_PER_DEVICE;

    /// A capture with every input low
    pub const fn zeroed() -> Self {
        Self([0; DEPTH])
    }

    /// Wraps already captured device bytes
    pub const fn from_bytes(bytes: [u8; DEPTH]) -> Self {
        Self(bytes)
    }

    /// The device bytes, nearest device first
    pub fn as_bytes(&self) -> &[u8; DEPTH] {
        &self.0
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; DEPTH] {
        &mut self.0
    }

    /// Returns the byte captured from one device
    ///
    /// # Panics
    ///
    /// If `device >= DEPTH`.
    pub fn byte(&self, device: usize) -> u8 {
        self.0[device]
    }

    /// Returns the state of the input at global `index`.
    ///
    /// # Panics
    ///
    /// If `index` is outside the chain.
    pub fn bit(&self, index: usize) -> bool {
        bit_at(&self.0, index)
    }

    /// Returns the state of the input at global `index`, or `None` if the
    /// chain has no such input.
    pub fn get_bit(&self, index: usize) -> Option<bool> {
        if index < Self::BITS {
            Some(BitAddress::from_index(index).read(&self.0))
        } else {
            None
        }
    }

    /// Composes the leading bytes of the capture into an integer, byte 0
    /// being the least significant. Bit `i` of the result is [`Self::bit`]
    /// of `i`. Bytes that don't fit in `T` are ignored, and a chain
    /// narrower than `T` leaves the upper bits clear.
    pub fn to_integer<T>(&self) -> T
    where
        T: PrimInt + From<u8>,
    {
        let width = (T::zero().count_zeros() as usize) / BITS_PER_DEVICE;

        self.0
            .iter()
            .take(width)
            .enumerate()
            .fold(T::zero(), |value, (device, &byte)| {
                value | (<T as From<u8>>::from(byte) << (device * BITS_PER_DEVICE))
            })
    }

    /// Iterates over every input whose state differs from `previous`
    pub fn changes<'a>(&'a self, previous: &'a Self) -> impl Iterator<Item = BitChange> + 'a {
        self.0
            .iter()
            .zip(previous.0.iter())
            .enumerate()
            .filter(|(_, (current, previous))| current != previous)
            .flat_map(|(device, (&current, &previous))| {
                let flipped = current ^ previous;
                (0..BITS_PER_DEVICE as u8)
                    .filter(move |&bit| flipped & (0x1 << bit) != 0)
                    .map(move |bit| BitChange {
                        index: BitAddress { device, bit }.index(),
                        is_high: current & (0x1 << bit) != 0,
                    })
            })
    }
}

impl<const DEPTH: usize> Default for Capture<DEPTH> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const DEPTH: usize> Deref for Capture<DEPTH> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const DEPTH: usize> From<[u8; DEPTH]> for Capture<DEPTH> {
    fn from(bytes: [u8; DEPTH]) -> Self {
        Self(bytes)
    }
}
