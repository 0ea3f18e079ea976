//! Byte-order tables and the code generator behind `endianbytes`.
//!
//! [`order`] answers "which physical offset holds the n-th least significant
//! byte" for every supported architecture. With the `codegen` feature the
//! crate also provides the [`AliasRegistry`] and the [`LayoutGenerator`] that
//! turn those answers into type definitions.

mod error;
pub mod order;

#[cfg(feature = "codegen")]
pub mod generator;
#[cfg(feature = "codegen")]
pub mod registry;

pub use error::LayoutError;
pub use order::{Arch, ByteOrder, Direction, MAX_WIDTH, PointerWidth, slot_order};

#[cfg(feature = "codegen")]
pub use generator::{CellPlan, Declaration, Flavor, LayoutGenerator, LayoutPlan};
#[cfg(feature = "codegen")]
pub use registry::{Alias, AliasRegistry, Snapshot};
