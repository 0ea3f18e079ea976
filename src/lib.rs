//! Pointer-sized aggregates whose bytes are named by significance.
//!
//! [`endian_bytes!`] emits a type with one byte cell per byte of a pointer.
//! Cell `u8_0` always names the least significant byte of an `ascending`
//! type (or the most significant byte of a `descending` one); where that
//! byte physically sits is decided by the target's byte order, including
//! middle ("PDP") endian.
//!
//! ```
//! use endianbytes::prelude::*;
//!
//! endian_bytes! {
//!     set 0 { low: u8 }
//!     pub union Word: ascending;
//! }
//!
//! let mut word = Word::from_word(0x1234 as *mut ());
//! // `ENDIANBYTES_BYTE_ORDER=middle` relabels bytes the hardware stores
//! // little- or big-endian, so the word no longer reads back the same way.
//! if NATIVE.order != ByteOrder::Middle {
//!     assert_eq!(word.u8_0(), 0x34);
//!     assert_eq!(word.u8_1(), 0x12);
//!     word.set_low(0x78);
//!     assert_eq!(word.word() as usize, 0x1278);
//! }
//! ```
//!
//! # Declarations
//!
//! The macro body is a sequence of statements run against one alias table,
//! which starts out empty for every invocation:
//!
//! * `reset;` drops every alias.
//! * `set <position> { name: Type, ... }` replaces the aliases of a logical
//!   position. Each type must be exactly one byte.
//! * `clear <position>;` drops the aliases of one position.
//! * `<vis> struct Name: ascending;` (or `descending`) emits a struct of byte
//!   cells using the aliases in effect at that point.
//! * `<vis> union Name: ascending;` additionally overlays a `*mut ()` word.
//!
//! A declaration may carry `#[arch(order = middle, width = 4)]` to lay out
//! bytes for another architecture. Pointer overlays must keep the target's
//! descriptor. Other attributes are forwarded to the emitted type, which
//! already implements `Clone`, `Copy`, `Debug`, `Default`, `PartialEq`, `Eq`
//! and `Hash`.
//!
//! Every alias type must be exactly one byte. Primitive types of another size
//! are rejected while the macro expands; anything else, such as a type alias,
//! fails the size assertion emitted next to the cell:
//!
//! ```compile_fail,E0080
//! use endianbytes::prelude::*;
//!
//! type Wide = u16;
//!
//! endian_bytes! {
//!     set 0 { w: Wide }
//!     struct W: ascending;
//! }
//! ```
//!
//! The same declaration with a one-byte type compiles:
//!
//! ```
//! use endianbytes::prelude::*;
//!
//! type Narrow = u8;
//!
//! endian_bytes! {
//!     set 0 { w: Narrow }
//!     struct W: ascending;
//! }
//!
//! let mut value = W::new();
//! value.set_w(7);
//! assert_eq!(value.u8_0(), 7);
//! ```
//!
//! # Emitted API
//!
//! Every type gets `new`, `from_bytes` / `to_bytes` (physical order),
//! `u8_<n>()` / `set_u8_<n>()`, an unsafe getter and a safe setter per alias,
//! and an [`EndianBytes`] impl. Unions add `from_word`, `word`, `set_word`,
//! `bytes` and `bytes_mut`.

mod native;
mod traits;

pub use endianbytes_layout::{Arch, ByteOrder, Direction, LayoutError, PointerWidth, slot_order};
pub use native::NATIVE;
pub use traits::{EndianBytes, Hex, SignificantBytes};

/// Declares byte-significance aggregates for the target architecture.
///
/// See the [crate documentation](crate) for the statement syntax.
#[macro_export]
macro_rules! endian_bytes {
    ($($body:tt)*) => {
        $crate::__native_endian_bytes! { $($body)* }
    };
}

#[doc(hidden)]
pub mod __private {
    pub use endianbytes_macro::endian_bytes_impl;

    #[cold]
    #[track_caller]
    pub fn position_out_of_range(position: usize, width: usize) -> ! {
        panic!("byte position {position} is out of range for a {width}-byte layout")
    }
}

#[macro_use]
pub mod prelude {
    pub use crate::{Arch, ByteOrder, Direction, EndianBytes, NATIVE, PointerWidth};
    pub use crate::endian_bytes;
}
