// SPDX-License-Identifier: MIT
//
// tcs color math: OKLCH at the center, sRGB and Display P3 at the edges.
//
// Single-character variable names (r, g, b, l, c, h, m, s) follow the
// usual color-science notation.
#![allow(clippy::many_single_char_names)]
//
// Every ramp, token and harmony in tcs is computed in OKLCH, where
// lightness, chroma and hue move independently and equal numeric steps
// look like equal visual steps. RGB only appears at the boundary, when a
// color has to be tested against a display gamut or written out.
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB
//                       ↕
//                  CIE XYZ (D65) ↔ Linear Display P3 ↔ Display P3
//
// Out-of-gamut values are never clamped here. The gamut fitter decides
// what to do with them; this module only reports the raw coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Channel tolerance for gamut membership.
///
/// A serialized color that is parsed back and converted to RGB again lands
/// within ~1e-13 of where it started, even after the 12.92 gain of the
/// transfer curve's linear segment. The slack sits well above that noise
/// and well below one 8-bit step.
pub const GAMUT_EPSILON: f64 = 1e-7;

// ─── Oklch ───────────────────────────────────────────────────────────────────

/// A color in OKLCH, the cylindrical form of Björn Ottosson's Oklab.
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white)
/// - `c`: chroma, 0.0 (gray) upward; about 0.37 is the most vivid P3 can show
/// - `h`: hue angle in degrees, always kept in `[0, 360)`
///
/// ```
/// use tcs_color::color::Oklch;
///
/// let vermilion = Oklch::new(0.65, 0.22, 38.0);
/// let complement = vermilion.shift_hue(180.0);
/// assert!((complement.h - 218.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    /// Pure black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::new(1.0, 0.0, 0.0);

    /// Create a color from raw OKLCH coordinates.
    #[inline]
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Same lightness and hue, different chroma (clamped to >= 0).
    #[inline]
    #[must_use]
    pub const fn with_chroma(self, c: f64) -> Self {
        Self { c: c.max(0.0), ..self }
    }

    /// Same chroma and hue, different lightness.
    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Set hue to an absolute angle (normalized to 0°–360°).
    #[inline]
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    /// Rotate the hue by `degrees`, wrapping around the wheel.
    #[inline]
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        self.with_hue(self.h + degrees)
    }

    /// Whether this color carries no visible chroma.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-8
    }
}

impl fmt::Debug for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.2})", self.l, self.c, self.h)
    }
}

impl Default for Oklch {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Gamut ───────────────────────────────────────────────────────────────────

/// An RGB display gamut that colors are fitted into and serialized for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gamut {
    /// Classic sRGB displays. Output is `#rrggbb`.
    #[default]
    #[serde(rename = "srgb")]
    Srgb,

    /// Wide-gamut Display P3 displays. Colors sRGB cannot show are written
    /// as `color(display-p3 r g b)`.
    #[serde(rename = "p3", alias = "display-p3")]
    DisplayP3,
}

impl Gamut {
    /// Short name, as used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::DisplayP3 => "p3",
        }
    }
}

impl fmt::Display for Gamut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// Gamma-encoded RGB coordinates in some gamut.
///
/// Channels are nominally 0.0–1.0 but are left unclamped so callers can
/// tell how far outside the gamut a color sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Whether every channel lies in `[0, 1]` (with [`GAMUT_EPSILON`] slack).
    #[must_use]
    pub fn in_unit_cube(self) -> bool {
        let ok = |v: f64| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&v);
        ok(self.r) && ok(self.g) && ok(self.b)
    }

    /// Copy with every channel clamped to `[0, 1]`.
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Clamp and quantize to 8-bit channels.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Format as `#rrggbb` (clamped).
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to linear light (sign-preserving for out-of-range values).
    #[must_use]
    pub fn to_linear(self) -> Self {
        Self::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    /// Apply the sRGB transfer curve to linear-light values.
    #[must_use]
    pub fn to_gamma(self) -> Self {
        Self::new(
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        )
    }

    const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    const fn from_array([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Hue helpers ─────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// Convert OKLCH to Oklab `[L, a, b]`.
#[inline]
#[must_use]
pub fn oklch_to_oklab(color: Oklch) -> [f64; 3] {
    let h_rad = color.h.to_radians();
    [color.l, color.c * h_rad.cos(), color.c * h_rad.sin()]
}

/// Convert Oklab `[L, a, b]` to OKLCH.
#[inline]
#[must_use]
pub fn oklab_to_oklch([l, a, b]: [f64; 3]) -> Oklch {
    let c = a.hypot(b);
    let h = if c < 1e-8 {
        0.0 // Achromatic: hue is undefined, default to 0
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    Oklch::new(l, c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The Oklab ↔ Linear sRGB conversion goes through an intermediate LMS
// (cone response) space. The matrices are the CSS Color 4 / color.js
// values: linear sRGB → LMS is the product of the exact rational sRGB → XYZ
// matrix and Ottosson's XYZ → LMS matrix, and each backward matrix is the
// full-precision inverse of its forward one, so a parse/serialize round
// trip stays at float noise (~1e-13).
// Reference: https://bottosson.github.io/posts/oklab/

/// Convert Oklab to linear sRGB.
#[inline]
fn oklab_to_linear_srgb([l_ok, a, b]: [f64; 3]) -> [f64; 3] {
    let l_ = 0.215_803_757_309_913_6f64.mul_add(b, 0.396_337_777_376_175f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_825_813_34f64.mul_add(-b, 0.105_561_345_815_658_56f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_019_409_4f64.mul_add(-b, 0.089_484_177_529_811_82f64.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    [
        0.230_969_903_182_104_47f64.mul_add(s, 4.076_741_636_075_958f64.mul_add(l, -(3.307_711_539_258_062_5 * m))),
        0.341_319_376_002_657_3f64.mul_add(-s, (-1.268_437_973_285_032f64).mul_add(l, 2.609_757_349_287_689 * m)),
        1.707_614_694_074_611_7f64.mul_add(s, (-0.004_196_076_138_675_48f64).mul_add(l, -(0.703_418_617_935_936_3 * m))),
    ]
}

/// Convert linear sRGB to Oklab.
#[inline]
fn linear_srgb_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let l = 0.051_445_993_267_502_2f64.mul_add(b, 0.412_221_469_470_763f64.mul_add(r, 0.536_332_537_261_734_8 * g));
    let m = 0.107_396_953_536_940_55f64.mul_add(b, 0.211_903_495_817_825_22f64.mul_add(r, 0.680_699_550_645_234_4 * g));
    let s = 0.629_978_701_673_822_1f64.mul_add(b, 0.088_302_459_190_056_43f64.mul_add(r, 0.281_718_839_136_121_5 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    [
        0.004_072_043_011_619_3f64.mul_add(-s_, 0.210_454_268_309_314f64.mul_add(l_, 0.793_617_774_702_305_4 * m_)),
        0.450_593_709_617_411f64.mul_add(s_, 1.977_998_532_431_168_4f64.mul_add(l_, -(2.428_592_242_048_58 * m_))),
        0.808_675_754_923_077_4f64.mul_add(-s_, 0.025_904_042_465_547_8f64.mul_add(l_, 0.782_771_712_457_529_6 * m_)),
    ]
}

// ─── Linear sRGB ↔ Linear Display P3 ────────────────────────────────────────
//
// Both spaces share the D65 white point, so the hop goes through CIE XYZ.
// Matrices are the color.js values.

#[rustfmt::skip]
const LINEAR_SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [ 0.412_390_799_265_959_34, 0.357_584_339_383_878,    0.180_480_788_401_834_3  ],
    [ 0.212_639_005_871_510_27, 0.715_168_678_767_756,    0.072_192_315_360_733_71 ],
    [ 0.019_330_818_715_591_82, 0.119_194_779_794_625_98, 0.950_532_152_249_660_7  ],
];

#[rustfmt::skip]
const XYZ_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [  3.240_969_941_904_522_6,  -1.537_383_177_570_094,   -0.498_610_760_293_003_4  ],
    [ -0.969_243_636_280_879_6,   1.875_967_501_507_720_2,  0.041_555_057_407_175_59 ],
    [  0.055_630_079_696_993_66, -0.203_976_958_888_976_52, 1.056_971_514_242_878_6  ],
];

#[rustfmt::skip]
const LINEAR_P3_TO_XYZ: [[f64; 3]; 3] = [
    [ 0.486_570_948_648_216_2, 0.265_667_693_169_093_06, 0.198_217_285_234_362_5 ],
    [ 0.228_974_564_069_748_8, 0.691_738_521_836_506_4,  0.079_286_914_093_745   ],
    [ 0.0,                     0.045_113_381_858_902_64, 1.043_944_368_900_976   ],
];

#[rustfmt::skip]
const XYZ_TO_LINEAR_P3: [[f64; 3]; 3] = [
    [  2.493_496_911_941_425,   -0.931_383_617_919_123_9,  -0.402_710_784_450_716_84  ],
    [ -0.829_488_969_561_574_7,  1.762_664_060_318_346_3,   0.023_624_685_841_943_577 ],
    [  0.035_845_830_243_784_47, -0.076_172_389_268_041_82,  0.956_884_524_007_687_2   ],
];

/// Multiply a 3×3 matrix with a 3-vector.
#[inline]
fn multiply(matrix: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    let row = |m: &[f64; 3]| m[0].mul_add(v[0], m[1].mul_add(v[1], m[2] * v[2]));
    [row(&matrix[0]), row(&matrix[1]), row(&matrix[2])]
}

#[inline]
fn linear_srgb_to_linear_p3(v: [f64; 3]) -> [f64; 3] {
    multiply(&XYZ_TO_LINEAR_P3, multiply(&LINEAR_SRGB_TO_XYZ, v))
}

#[inline]
fn linear_p3_to_linear_srgb(v: [f64; 3]) -> [f64; 3] {
    multiply(&XYZ_TO_LINEAR_SRGB, multiply(&LINEAR_P3_TO_XYZ, v))
}

// ─── Transfer curve (Gamma) ─────────────────────────────────────────────────
//
// sRGB and Display P3 share the same piecewise transfer function. Values
// outside [0, 1] are mirrored around zero so out-of-gamut coordinates
// survive a round trip.

/// Convert a single gamma-encoded component to linear light.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    let magnitude = c.abs();
    if magnitude <= 0.040_45 {
        c / 12.92
    } else {
        ((magnitude + 0.055) / 1.055).powf(2.4).copysign(c)
    }
}

/// Convert a single linear-light component to gamma-encoded.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    let magnitude = c.abs();
    if magnitude <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(magnitude.powf(1.0 / 2.4), -0.055).copysign(c)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert OKLCH to gamma-encoded RGB in `gamut`, without clamping.
#[must_use]
pub fn oklch_to_rgb(color: Oklch, gamut: Gamut) -> Rgb {
    let linear_srgb = oklab_to_linear_srgb(oklch_to_oklab(color));
    let linear = match gamut {
        Gamut::Srgb => linear_srgb,
        Gamut::DisplayP3 => linear_srgb_to_linear_p3(linear_srgb),
    };
    Rgb::from_array(linear).to_gamma()
}

/// Convert gamma-encoded RGB in `gamut` to OKLCH.
#[must_use]
pub fn rgb_to_oklch(rgb: Rgb, gamut: Gamut) -> Oklch {
    let linear = rgb.to_linear().to_array();
    let linear_srgb = match gamut {
        Gamut::Srgb => linear,
        Gamut::DisplayP3 => linear_p3_to_linear_srgb(linear),
    };
    oklab_to_oklch(linear_srgb_to_oklab(linear_srgb))
}

/// Re-express RGB coordinates from one gamut in another (unclamped).
#[must_use]
pub fn convert_rgb(rgb: Rgb, from: Gamut, to: Gamut) -> Rgb {
    if from == to {
        return rgb;
    }
    let linear = rgb.to_linear().to_array();
    let converted = match (from, to) {
        (Gamut::Srgb, Gamut::DisplayP3) => linear_srgb_to_linear_p3(linear),
        _ => linear_p3_to_linear_srgb(linear),
    };
    Rgb::from_array(converted).to_gamma()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
