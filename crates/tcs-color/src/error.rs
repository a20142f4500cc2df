//! Error types for color parsing.

use thiserror::Error;

/// Failure to read a serialized color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Input was empty or whitespace.
    #[error("empty color string")]
    Empty,
    /// A `#`-prefixed value with the wrong length or non-hex digits.
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),
    /// A functional notation component that is not a number.
    #[error("invalid {notation} component `{component}`")]
    InvalidComponent {
        /// Notation being parsed (`rgb`, `display-p3`).
        notation: &'static str,
        /// Offending component text.
        component: String,
    },
    /// A functional notation with too few or too many components.
    #[error("expected 3 or 4 components in `{input}`, found {found}")]
    ComponentCount {
        /// Full input string.
        input: String,
        /// Number of components found.
        found: usize,
    },
    /// Channels that parse but overflow when converted to OKLCH.
    #[error("color `{0}` is out of range")]
    OutOfRange(String),
    /// Anything that is not hex, `rgb()`/`rgba()` or `color(display-p3 …)`.
    #[error("unsupported color notation `{0}`")]
    Unsupported(String),
}
