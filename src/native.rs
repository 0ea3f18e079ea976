//! The architecture this crate was built for.
//!
//! `build.rs` reads the target's byte order and pointer width (or the
//! `ENDIANBYTES_BYTE_ORDER` override) and sets exactly one
//! `endianbytes_order` and one `endianbytes_width` cfg. Everything here is
//! selected from those.

use crate::{Arch, ByteOrder, PointerWidth};

/// Descriptor of the compilation target.
pub const NATIVE: Arch = Arch::new(NATIVE_ORDER, NATIVE_WIDTH);

#[cfg(endianbytes_order = "little")]
const NATIVE_ORDER: ByteOrder = ByteOrder::Little;
#[cfg(endianbytes_order = "big")]
const NATIVE_ORDER: ByteOrder = ByteOrder::Big;
#[cfg(endianbytes_order = "middle")]
const NATIVE_ORDER: ByteOrder = ByteOrder::Middle;

#[cfg(endianbytes_width = "4")]
const NATIVE_WIDTH: PointerWidth = PointerWidth::Four;
#[cfg(endianbytes_width = "8")]
const NATIVE_WIDTH: PointerWidth = PointerWidth::Eight;

// The proc macro cannot see the target, so each wrapper hands it the
// descriptor as tokens.

#[cfg(all(endianbytes_order = "little", endianbytes_width = "4"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __native_endian_bytes {
    ($($body:tt)*) => { $crate::__private::endian_bytes_impl! { $crate; little, 4; $($body)* } };
}

#[cfg(all(endianbytes_order = "little", endianbytes_width = "8"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __native_endian_bytes {
    ($($body:tt)*) => { $crate::__private::endian_bytes_impl! { $crate; little, 8; $($body)* } };
}

#[cfg(all(endianbytes_order = "big", endianbytes_width = "4"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __native_endian_bytes {
    ($($body:tt)*) => { $crate::__private::endian_bytes_impl! { $crate; big, 4; $($body)* } };
}

#[cfg(all(endianbytes_order = "big", endianbytes_width = "8"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __native_endian_bytes {
    ($($body:tt)*) => { $crate::__private::endian_bytes_impl! { $crate; big, 8; $($body)* } };
}

#[cfg(all(endianbytes_order = "middle", endianbytes_width = "4"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __native_endian_bytes {
    ($($body:tt)*) => { $crate::__private::endian_bytes_impl! { $crate; middle, 4; $($body)* } };
}

#[cfg(all(endianbytes_order = "middle", endianbytes_width = "8"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __native_endian_bytes {
    ($($body:tt)*) => { $crate::__private::endian_bytes_impl! { $crate; middle, 8; $($body)* } };
}
