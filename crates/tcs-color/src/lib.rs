// SPDX-License-Identifier: MIT
//
// tcs-color: color-space engine for tcs.
//
// OKLCH is the working space for every computation in the token engine.
// This crate owns the math that gets colors into and out of it: Oklab,
// sRGB and Display P3 conversions, the serialized string forms
// (`#rrggbb`, `#rrggbbaa`, `color(display-p3 …)`), and the chroma-reduction
// gamut fitter. Conversions are exposed through the `ColorSpace` adapter
// trait so the engine receives its color math as an explicit value.

pub mod color;
pub mod css;
pub mod error;
pub mod gamut;
pub mod space;

pub use color::{Gamut, Oklch, Rgb};
pub use css::CssColor;
pub use error::ParseColorError;
pub use gamut::{FIT_ITERATIONS, fit};
pub use space::{ColorSpace, OklabSpace};
