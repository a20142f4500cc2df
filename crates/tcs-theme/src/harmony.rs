//! Hue-wheel harmonies of a seed color.
//!
//! Each harmony keeps the seed's lightness and chroma and rotates only the
//! hue, then fits the result to the target gamut and writes it as hex.

use serde::Serialize;
use tcs_color::{ColorSpace, Gamut, Oklch, fit};

pub const COMPLEMENTARY: f64 = 180.0;
pub const ANALOGOUS: f64 = 30.0;
pub const TRIADIC: f64 = 120.0;

/// Harmony colors around one seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarmonySet {
    pub complementary: String,
    /// `[-30°, +30°]`.
    pub analogous: [String; 2],
    /// `[-120°, +120°]`.
    pub triadic: [String; 2],
}

impl HarmonySet {
    /// A set where every member is black, for seeds that cannot be resolved.
    #[must_use]
    pub fn black() -> Self {
        let black = || "#000000".to_string();
        Self {
            complementary: black(),
            analogous: [black(), black()],
            triadic: [black(), black()],
        }
    }
}

/// The seed with its hue rotated by `degrees` (normalized to `[0, 360)`).
#[must_use]
pub fn rotate(seed: Oklch, degrees: f64) -> Oklch {
    seed.shift_hue(degrees)
}

/// Complementary, analogous and triadic colors for `seed`.
#[must_use]
pub fn harmonies<S: ColorSpace + ?Sized>(space: &S, seed: Oklch, gamut: Gamut) -> HarmonySet {
    let at = |degrees: f64| space.to_hex(fit(space, rotate(seed, degrees), gamut));
    HarmonySet {
        complementary: at(COMPLEMENTARY),
        analogous: [at(-ANALOGOUS), at(ANALOGOUS)],
        triadic: [at(-TRIADIC), at(TRIADIC)],
    }
}
