//! Gamut fitting by chroma reduction.
//!
//! Lightness and hue carry a color's identity and its contrast against
//! neighbours, so they are held fixed. Only chroma is reduced, by binary
//! search, until the color fits the target gamut. Chroma 0 is always
//! displayable, so the search always lands on an in-gamut color.

use crate::color::{Gamut, Oklch};
use crate::space::ColorSpace;

/// Binary-search steps. The result is within `c / 2^15` of the boundary.
pub const FIT_ITERATIONS: usize = 15;

/// Return the most saturated version of `color` that `gamut` can show,
/// keeping its lightness and hue.
///
/// Colors already inside the gamut come back unchanged, which also makes
/// the operation idempotent. Lightness at or beyond either end of the axis
/// can only be shown as pure black or white, so chroma there is dropped
/// outright.
#[must_use]
pub fn fit<S: ColorSpace + ?Sized>(space: &S, color: Oklch, gamut: Gamut) -> Oklch {
    if color.l <= 0.0 {
        return Oklch::new(0.0, 0.0, color.h);
    }
    if color.l >= 1.0 {
        return Oklch::new(1.0, 0.0, color.h);
    }
    if space.in_gamut(color, gamut) {
        return color;
    }

    let mut lo = 0.0;
    let mut hi = color.c;

    for _ in 0..FIT_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if space.in_gamut(color.with_chroma(mid), gamut) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let fitted = color.with_chroma(lo);
    if fitted.is_achromatic() { fitted.with_chroma(0.0) } else { fitted }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
