use core::fmt;
use core::iter::FusedIterator;
use core::ops::Range;

use crate::{Arch, Direction};

/// A pointer-sized aggregate whose bytes are named by significance.
///
/// Implemented by every type [`endian_bytes!`](crate::endian_bytes) emits.
/// Positions are logical: for an ascending type position 0 is the least
/// significant byte, for a descending type it is the most significant.
pub trait EndianBytes: Copy {
    /// The architecture the layout was generated for.
    const ARCH: Arch;
    const DIRECTION: Direction;
    /// Number of byte cells.
    const WIDTH: usize = Self::ARCH.bytes();

    /// Reads the byte at logical `position`.
    ///
    /// # Panics
    /// Panics if `position >= Self::WIDTH`.
    fn byte(&self, position: usize) -> u8;

    /// Writes the byte at logical `position`.
    ///
    /// # Panics
    /// Panics if `position >= Self::WIDTH`.
    fn set_byte(&mut self, position: usize, value: u8);

    /// Physical offset of logical `position` within the aggregate.
    fn physical_offset(position: usize) -> usize {
        Self::ARCH.physical_offset(Self::DIRECTION, position)
    }

    /// Bytes from least to most significant, whatever the direction.
    fn significant_bytes(&self) -> SignificantBytes<'_, Self> {
        SignificantBytes {
            value: self,
            ranks: 0..Self::WIDTH,
        }
    }

    /// Hex dump with the most significant byte first, identical on every
    /// architecture for the same word value.
    fn hex(&self) -> Hex<'_, Self> {
        Hex(self)
    }
}

/// Logical position holding the byte of significance `rank` (0 = least).
fn position_of_rank<T: EndianBytes>(rank: usize) -> usize {
    match T::DIRECTION {
        Direction::Ascending => rank,
        Direction::Descending => T::WIDTH - 1 - rank,
    }
}

/// Iterator returned by [`EndianBytes::significant_bytes`].
#[derive(Debug, Clone)]
pub struct SignificantBytes<'a, T: EndianBytes> {
    value: &'a T,
    ranks: Range<usize>,
}

impl<T: EndianBytes> Iterator for SignificantBytes<'_, T> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let rank = self.ranks.next()?;
        Some(self.value.byte(position_of_rank::<T>(rank)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ranks.size_hint()
    }
}

impl<T: EndianBytes> DoubleEndedIterator for SignificantBytes<'_, T> {
    fn next_back(&mut self) -> Option<u8> {
        let rank = self.ranks.next_back()?;
        Some(self.value.byte(position_of_rank::<T>(rank)))
    }
}

impl<T: EndianBytes> ExactSizeIterator for SignificantBytes<'_, T> {}
impl<T: EndianBytes> FusedIterator for SignificantBytes<'_, T> {}

/// Display adapter returned by [`EndianBytes::hex`].
pub struct Hex<'a, T: EndianBytes>(&'a T);

impl<T: EndianBytes> fmt::Display for Hex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        self.0
            .significant_bytes()
            .rev()
            .try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl<T: EndianBytes> fmt::Debug for Hex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
