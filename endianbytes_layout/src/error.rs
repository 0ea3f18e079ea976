use thiserror::Error;

use crate::order::Arch;

/// Everything that can stop a layout from being generated.
///
/// All of these are configuration problems: they are reported by the build
/// script or the macro expansion, never by code using an emitted type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("missing build input `{0}`; set it to describe the target architecture")]
    MissingInput(&'static str),

    #[error("unsupported byte order `{0}` (expected `little`, `big` or `middle`)")]
    UnsupportedOrder(String),

    #[error("unsupported pointer width of {0} bytes (expected 4 or 8)")]
    UnsupportedWidth(usize),

    #[error("`{0}` is not a pointer width in bits")]
    InvalidWidth(String),

    #[error("unknown direction `{0}` (expected `ascending` or `descending`)")]
    UnsupportedDirection(String),

    #[error("logical position {position} is out of range for a {width}-byte layout")]
    PositionOutOfRange { position: usize, width: usize },

    #[error("alias `{name}` has type `{ty}` of {size} bytes; aliases must be exactly one byte")]
    AliasSize { name: String, ty: String, size: usize },

    #[error("`{name}` is already generated for this layout; choose another alias name")]
    NameConflict { name: String },

    #[error("a pointer overlay must use the target layout ({native}), but this layout is {layout}")]
    WordArchMismatch { native: Arch, layout: Arch },

    #[error("`{var}`: {source}")]
    InvalidInput {
        var: &'static str,
        #[source]
        source: Box<LayoutError>,
    },
}

impl LayoutError {
    /// Attributes the error to the variable the rejected value was read from.
    pub fn in_var(self, var: &'static str) -> Self {
        LayoutError::InvalidInput {
            var,
            source: Box::new(self),
        }
    }
}
