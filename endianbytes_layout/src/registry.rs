//! Alternate names for individual byte positions.

use proc_macro2::Span;
use syn::{Ident, Type};

use crate::error::LayoutError;
use crate::order::MAX_WIDTH;

/// A caller-chosen name and one-byte type overlaying a byte cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: Ident,
    pub ty: Type,
}

impl Alias {
    pub fn new(name: Ident, ty: Type) -> Self {
        Alias { name, ty }
    }

    pub fn span(&self) -> Span {
        self.name.span()
    }
}

/// Aliases per logical position, fixed at the moment a layout is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    positions: Vec<Vec<Alias>>,
}

impl Snapshot {
    pub fn width(&self) -> usize {
        self.positions.len()
    }

    pub fn aliases(&self, position: usize) -> &[Alias] {
        &self.positions[position]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Alias)> {
        self.positions
            .iter()
            .enumerate()
            .flat_map(|(position, aliases)| aliases.iter().map(move |alias| (position, alias)))
    }
}

/// Alias table keyed by logical byte position.
///
/// The registry only changes through explicit calls; emitting a layout takes a
/// [`Snapshot`] and leaves the registry untouched.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    positions: [Vec<Alias>; MAX_WIDTH],
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every alias for every position.
    pub fn reset(&mut self) {
        self.positions.iter_mut().for_each(Vec::clear);
    }

    /// Replaces the aliases of `position`.
    pub fn set_aliases(&mut self, position: usize, aliases: Vec<Alias>) -> Result<(), LayoutError> {
        let slot = self
            .positions
            .get_mut(position)
            .ok_or(LayoutError::PositionOutOfRange {
                position,
                width: MAX_WIDTH,
            })?;
        *slot = aliases;
        Ok(())
    }

    pub fn clear_aliases(&mut self, position: usize) -> Result<(), LayoutError> {
        self.set_aliases(position, Vec::new())
    }

    /// Aliases currently registered for `position`; empty when out of range.
    pub fn current_aliases(&self, position: usize) -> &[Alias] {
        self.positions.get(position).map_or(&[], Vec::as_slice)
    }

    /// Copies out the aliases of the first `width` positions.
    ///
    /// Fails if a position at or beyond `width` still carries aliases, since
    /// those names would silently disappear from the emitted type.
    pub fn snapshot(&self, width: usize) -> Result<Snapshot, LayoutError> {
        if let Some(position) = (width..MAX_WIDTH).find(|&p| !self.positions[p].is_empty()) {
            return Err(LayoutError::PositionOutOfRange { position, width });
        }
        Ok(Snapshot {
            positions: self.positions.iter().take(width).cloned().collect(),
        })
    }
}
