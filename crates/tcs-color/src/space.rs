//! The color-space adapter: the one seam between tcs and color math.
//!
//! Everything above this crate talks to a [`ColorSpace`] value instead of
//! calling conversion functions directly. The adapter is built once when
//! the application starts and handed to the engine, so wide-gamut support
//! is a property of the value that was passed in, not of global state.
//!
//! [`OklabSpace`] is the stock implementation backed by [`crate::color`].

use crate::color::{self, Gamut, Oklch, Rgb};
use crate::css::CssColor;
use crate::error::ParseColorError;

/// Conversion and gamut-membership primitives.
///
/// Implementations must be pure: the same input always gives the same
/// output, and no call observes another.
pub trait ColorSpace: Send + Sync {
    /// OKLCH → gamma-encoded RGB in `gamut`, unclamped.
    fn to_rgb(&self, color: Oklch, gamut: Gamut) -> Rgb;

    /// Gamma-encoded RGB in `gamut` → OKLCH.
    fn to_oklch(&self, rgb: Rgb, gamut: Gamut) -> Oklch;

    /// Whether `color` can be shown without clipping on a `gamut` display.
    fn in_gamut(&self, color: Oklch, gamut: Gamut) -> bool {
        color.l >= 0.0 && self.to_rgb(color, gamut).in_unit_cube()
    }

    /// Read a serialized color (hex, `rgb()`, `color(display-p3 …)`) as
    /// OKLCH. Alpha is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] when the string is not a supported color,
    /// or when its channels are so large that the conversion overflows.
    fn parse(&self, input: &str) -> Result<Oklch, ParseColorError> {
        let css: CssColor = input.parse()?;
        let color = self.to_oklch(css.rgb, css.gamut);
        if color.l.is_finite() && color.c.is_finite() && color.h.is_finite() {
            Ok(color)
        } else {
            Err(ParseColorError::OutOfRange(input.trim().to_string()))
        }
    }

    /// Express a parsed color in sRGB coordinates (unclamped).
    fn to_srgb(&self, css: &CssColor) -> Rgb {
        match css.gamut {
            Gamut::Srgb => css.rgb,
            gamut => self.to_rgb(self.to_oklch(css.rgb, gamut), Gamut::Srgb),
        }
    }

    /// Format as `#rrggbb` (sRGB, clamped).
    fn to_hex(&self, color: Oklch) -> String {
        self.to_rgb(color, Gamut::Srgb).to_hex()
    }
}

/// Oklab-based adapter covering sRGB and Display P3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OklabSpace;

impl OklabSpace {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ColorSpace for OklabSpace {
    fn to_rgb(&self, color: Oklch, gamut: Gamut) -> Rgb {
        color::oklch_to_rgb(color, gamut)
    }

    fn to_oklch(&self, rgb: Rgb, gamut: Gamut) -> Oklch {
        color::rgb_to_oklch(rgb, gamut)
    }

    fn to_srgb(&self, css: &CssColor) -> Rgb {
        color::convert_rgb(css.rgb, css.gamut, Gamut::Srgb)
    }
}
