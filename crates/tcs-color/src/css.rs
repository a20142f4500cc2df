// SPDX-License-Identifier: MIT
//
// Serialized colors: the strings that flow through palettes and tokens.
//
// Three notations are written:
//
//   #rrggbb                        opaque sRGB
//   #rrggbbaa                      sRGB with alpha
//   color(display-p3 r g b [/ a])  wide-gamut, 4 decimal places per channel
//
// and, in addition, `#rgb`, `#rgba`, `rgb()` and `rgba()` are read, since
// fixed tokens such as the background mask are authored that way.

use std::fmt;
use std::str::FromStr;

use crate::color::{Gamut, Rgb, to_u8};
use crate::error::ParseColorError;

/// Decimal places kept for `color(display-p3 …)` channels.
pub const P3_DECIMALS: i32 = 4;

/// A parsed color string: RGB coordinates, the gamut they are expressed in,
/// and alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub gamut: Gamut,
    pub rgb: Rgb,
    pub alpha: f64,
}

impl CssColor {
    /// An opaque color in `gamut`.
    #[must_use]
    pub const fn opaque(gamut: Gamut, rgb: Rgb) -> Self {
        Self { gamut, rgb, alpha: 1.0 }
    }

    /// Copy with a different alpha (clamped to 0.0–1.0).
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Whether alpha is 1.0.
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Serialize in the notation that matches the gamut.
    ///
    /// sRGB colors become `#rrggbb` (or `#rrggbbaa` when translucent).
    /// Display P3 colors keep the functional form with channels clamped to
    /// the gamut and rounded to [`P3_DECIMALS`] places.
    #[must_use]
    pub fn to_css(self) -> String {
        match self.gamut {
            Gamut::Srgb => {
                let hex = self.rgb.to_hex();
                if self.is_opaque() {
                    hex
                } else {
                    format!("{hex}{:02x}", to_u8(self.alpha))
                }
            }
            Gamut::DisplayP3 => {
                let Rgb { r, g, b } = self.rgb.clamped();
                let (r, g, b) = (format_precise(r), format_precise(g), format_precise(b));
                if self.is_opaque() {
                    format!("color(display-p3 {r} {g} {b})")
                } else {
                    format!("color(display-p3 {r} {g} {b} / {})", format_precise(self.alpha))
                }
            }
        }
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for CssColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_css(s)
    }
}

/// Round to [`P3_DECIMALS`] places and print in shortest form (`1`, `0.5`,
/// `0.1234`).
#[must_use]
pub fn format_precise(v: f64) -> String {
    let scale = 10f64.powi(P3_DECIMALS);
    // Adding 0.0 turns a rounded -0.0 into 0.0.
    let rounded = (v * scale).round() / scale + 0.0;
    format!("{rounded}")
}

/// Replace the alpha of a serialized color, keeping its notation family.
///
/// Display P3 input stays in `color(display-p3 … / a)` form; everything else
/// becomes `#rrggbbaa`. Input that does not parse is returned unchanged.
#[must_use]
pub fn apply_alpha(color: &str, alpha: f64) -> String {
    match color.parse::<CssColor>() {
        Ok(parsed) => {
            let with_alpha = parsed.with_alpha(alpha);
            if with_alpha.is_opaque() && with_alpha.gamut == Gamut::Srgb {
                // Keep the 8-digit form even for alpha 1.0.
                format!("{}ff", with_alpha.rgb.to_hex())
            } else {
                with_alpha.to_css()
            }
        }
        Err(_) => color.to_string(),
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

fn parse_css(input: &str) -> Result<CssColor, ParseColorError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ParseColorError::InvalidHex(s.to_string()));
    }

    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("color(").and_then(|b| b.strip_suffix(')')) {
        let body = body.trim_start();
        return match body.strip_prefix("display-p3") {
            Some(args) => parse_p3(args, s),
            None => Err(ParseColorError::Unsupported(s.to_string())),
        };
    }

    let rgb_body = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|b| b.strip_suffix(')'));
    if let Some(body) = rgb_body {
        return parse_rgb_function(body, s);
    }

    Err(ParseColorError::Unsupported(s.to_string()))
}

/// `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (the `#` already stripped).
fn parse_hex(s: &str) -> Option<CssColor> {
    let bytes = s.as_bytes();
    let (r, g, b, a) = match bytes.len() {
        3 | 4 => {
            let nibble = |i: usize| parse_hex_digit(bytes[i]).map(|d| d << 4 | d);
            let a = if bytes.len() == 4 { nibble(3)? } else { 255 };
            (nibble(0)?, nibble(1)?, nibble(2)?, a)
        }
        6 | 8 => {
            let byte = |i: usize| parse_hex_byte(&bytes[i..i + 2]);
            let a = if bytes.len() == 8 { byte(6)? } else { 255 };
            (byte(0)?, byte(2)?, byte(4)?, a)
        }
        _ => return None,
    };
    Some(CssColor::opaque(Gamut::Srgb, Rgb::from_rgb8(r, g, b)).with_alpha(f64::from(a) / 255.0))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Split a functional-notation body on commas, whitespace and `/`.
fn components(body: &str) -> Vec<&str> {
    body.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Parse a number or percentage; `unit` is what 100% maps to.
fn parse_component(text: &str, unit: f64, notation: &'static str) -> Result<f64, ParseColorError> {
    let invalid = || ParseColorError::InvalidComponent {
        notation,
        component: text.to_string(),
    };
    let value = match text.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().map_err(|_| invalid())? / 100.0 * unit,
        None => text.parse::<f64>().map_err(|_| invalid())?,
    };
    if value.is_finite() { Ok(value) } else { Err(invalid()) }
}

fn check_count(parts: &[&str], input: &str) -> Result<(), ParseColorError> {
    if matches!(parts.len(), 3 | 4) {
        Ok(())
    } else {
        Err(ParseColorError::ComponentCount {
            input: input.to_string(),
            found: parts.len(),
        })
    }
}

fn parse_alpha(parts: &[&str], notation: &'static str) -> Result<f64, ParseColorError> {
    parts
        .get(3)
        .map_or(Ok(1.0), |a| parse_component(a, 1.0, notation))
}

fn parse_p3(args: &str, input: &str) -> Result<CssColor, ParseColorError> {
    const NOTATION: &str = "display-p3";
    let parts = components(args);
    check_count(&parts, input)?;
    let rgb = Rgb::new(
        parse_component(parts[0], 1.0, NOTATION)?,
        parse_component(parts[1], 1.0, NOTATION)?,
        parse_component(parts[2], 1.0, NOTATION)?,
    );
    let alpha = parse_alpha(&parts, NOTATION)?;
    Ok(CssColor::opaque(Gamut::DisplayP3, rgb).with_alpha(alpha))
}

fn parse_rgb_function(body: &str, input: &str) -> Result<CssColor, ParseColorError> {
    const NOTATION: &str = "rgb";
    let parts = components(body);
    check_count(&parts, input)?;
    let channel = |i: usize| parse_component(parts[i], 255.0, NOTATION).map(|v| v / 255.0);
    let rgb = Rgb::new(channel(0)?, channel(1)?, channel(2)?);
    let alpha = parse_alpha(&parts, NOTATION)?;
    Ok(CssColor::opaque(Gamut::Srgb, rgb).with_alpha(alpha))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
