//! Byte order descriptors and the significance-to-offset permutation tables.
//!
//! A pointer-sized word is described by an [`Arch`]: its [`PointerWidth`] and
//! its [`ByteOrder`]. [`slot_order`] maps each *logical* byte position (0 being
//! the least significant byte) to the *physical* offset that byte occupies in
//! memory on that architecture.
//!
//! ```
//! use endianbytes_layout::{Arch, ByteOrder, Direction, PointerWidth};
//!
//! let pdp = Arch::new(ByteOrder::Middle, PointerWidth::Four);
//! assert_eq!(pdp.slot_order(), &[2, 3, 0, 1]);
//! assert_eq!(pdp.physical_offset(Direction::Ascending, 0), 2);
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::LayoutError;

/// Largest supported pointer width, in bytes.
pub const MAX_WIDTH: usize = 8;

const LITTLE_4: [usize; 4] = [0, 1, 2, 3];
const LITTLE_8: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
const BIG_4: [usize; 4] = [3, 2, 1, 0];
const BIG_8: [usize; 8] = [7, 6, 5, 4, 3, 2, 1, 0];
// 16-bit little endian halves, stored most significant half first.
const MIDDLE_4: [usize; 4] = [2, 3, 0, 1];
const MIDDLE_8: [usize; 8] = [6, 7, 4, 5, 2, 3, 0, 1];

/// The arrangement of bytes within a machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ByteOrder {
    /// Least significant byte at the lowest address.
    Little,
    /// Most significant byte at the lowest address.
    Big,
    /// "PDP" order: little endian 16-bit halves, most significant half first.
    Middle,
}

impl ByteOrder {
    pub const fn name(self) -> &'static str {
        match self {
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
            ByteOrder::Middle => "middle",
        }
    }
}

impl FromStr for ByteOrder {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "little" => Ok(ByteOrder::Little),
            "big" => Ok(ByteOrder::Big),
            "middle" | "pdp" => Ok(ByteOrder::Middle),
            other => Err(LayoutError::UnsupportedOrder(other.to_string())),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Size of a pointer, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointerWidth {
    Four,
    Eight,
}

impl PointerWidth {
    pub const fn bytes(self) -> usize {
        match self {
            PointerWidth::Four => 4,
            PointerWidth::Eight => 8,
        }
    }

    /// Parses a width given in bits, as in `target_pointer_width`.
    pub fn from_bits(bits: &str) -> Result<Self, LayoutError> {
        let bits: usize = bits
            .trim()
            .parse()
            .map_err(|_| LayoutError::InvalidWidth(bits.to_string()))?;
        if bits % 8 != 0 {
            return Err(LayoutError::InvalidWidth(bits.to_string()));
        }
        PointerWidth::try_from(bits / 8)
    }
}

impl TryFrom<usize> for PointerWidth {
    type Error = LayoutError;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        match bytes {
            4 => Ok(PointerWidth::Four),
            8 => Ok(PointerWidth::Eight),
            other => Err(LayoutError::UnsupportedWidth(other)),
        }
    }
}

impl fmt::Display for PointerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// Whether logical position 0 names the least or the most significant byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(Direction::Ascending),
            "descending" => Ok(Direction::Descending),
            other => Err(LayoutError::UnsupportedDirection(other.to_string())),
        }
    }
}

/// Returns the physical offset of each logical byte position, least
/// significant position first.
pub const fn slot_order(width: PointerWidth, order: ByteOrder) -> &'static [usize] {
    match (order, width) {
        (ByteOrder::Little, PointerWidth::Four) => &LITTLE_4,
        (ByteOrder::Little, PointerWidth::Eight) => &LITTLE_8,
        (ByteOrder::Big, PointerWidth::Four) => &BIG_4,
        (ByteOrder::Big, PointerWidth::Eight) => &BIG_8,
        (ByteOrder::Middle, PointerWidth::Four) => &MIDDLE_4,
        (ByteOrder::Middle, PointerWidth::Eight) => &MIDDLE_8,
    }
}

/// Architecture descriptor: everything that decides where a byte lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arch {
    pub order: ByteOrder,
    pub width: PointerWidth,
}

impl Arch {
    pub const fn new(order: ByteOrder, width: PointerWidth) -> Self {
        Arch { order, width }
    }

    /// Builds a descriptor from the textual values a build environment
    /// reports: a byte order name and a pointer width in bits.
    pub fn from_target(order: &str, pointer_bits: &str) -> Result<Self, LayoutError> {
        Ok(Arch::new(order.parse()?, PointerWidth::from_bits(pointer_bits)?))
    }

    /// Like [`from_target`](Self::from_target), but each value comes from a
    /// named variable and a rejected value is reported with that name.
    pub fn from_vars(
        order_var: &'static str,
        order: &str,
        bits_var: &'static str,
        pointer_bits: &str,
    ) -> Result<Self, LayoutError> {
        let order = order.parse::<ByteOrder>().map_err(|err| err.in_var(order_var))?;
        let width = PointerWidth::from_bits(pointer_bits).map_err(|err| err.in_var(bits_var))?;
        Ok(Arch::new(order, width))
    }

    pub const fn bytes(self) -> usize {
        self.width.bytes()
    }

    pub const fn slot_order(self) -> &'static [usize] {
        slot_order(self.width, self.order)
    }

    /// Physical offset of logical `position` for the given direction.
    ///
    /// # Panics
    /// Panics if `position` is not below the pointer width.
    pub const fn physical_offset(self, direction: Direction, position: usize) -> usize {
        let slots = self.slot_order();
        match direction {
            Direction::Ascending => slots[position],
            Direction::Descending => slots[slots.len() - 1 - position],
        }
    }

    /// Logical position stored at physical `offset`, the inverse of
    /// [`physical_offset`](Self::physical_offset).
    ///
    /// # Panics
    /// Panics if `offset` is not below the pointer width.
    pub const fn logical_at(self, direction: Direction, offset: usize) -> usize {
        let slots = self.slot_order();
        let mut index = 0;
        while index < slots.len() {
            if slots[index] == offset {
                return match direction {
                    Direction::Ascending => index,
                    Direction::Descending => slots.len() - 1 - index,
                };
            }
            index += 1;
        }
        panic!("physical offset is out of range for this pointer width")
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-endian, {}-byte pointers", self.order, self.width)
    }
}
