//! Contrast measurement: WCAG 2.1 ratios and APCA lightness contrast.
//!
//! WCAG works on relative luminance of linear sRGB and is symmetric in its
//! arguments. APCA (0.0.98G-4g constants) is polarity-aware: dark text on a
//! light background gives a positive Lc, light text on dark a negative one.
//!
//! The string-level functions never fail. A color that does not parse
//! measures as 0.0, which reads as "no usable contrast".

use std::fmt;

use tcs_color::{ColorSpace, CssColor};

/// Default light candidate for [`pick_contrast_color`].
pub const DEFAULT_LIGHT: &str = "#ffffff";
/// Default dark candidate for [`pick_contrast_color`].
pub const DEFAULT_DARK: &str = "#000000";

// ─── WCAG ────────────────────────────────────────────────────────────────────

/// Relative luminance per WCAG 2.1:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Wide-gamut colors are expressed in sRGB first and left unclamped, so a
/// P3 color brighter than sRGB white can exceed 1.0.
#[must_use]
pub fn relative_luminance<S: ColorSpace + ?Sized>(space: &S, color: &CssColor) -> f64 {
    let lin = space.to_srgb(color).to_linear();
    0.2126f64.mul_add(lin.r, 0.7152f64.mul_add(lin.g, 0.0722 * lin.b))
}

/// WCAG 2.1 contrast ratio, `(L_lighter + 0.05) / (L_darker + 0.05)`.
///
/// Always >= 1.0 regardless of argument order.
#[must_use]
pub fn contrast_ratio<S: ColorSpace + ?Sized>(space: &S, a: &CssColor, b: &CssColor) -> f64 {
    let la = relative_luminance(space, a);
    let lb = relative_luminance(space, b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// [`contrast_ratio`] of two serialized colors. 0.0 if either fails to parse.
#[must_use]
pub fn wcag_contrast<S: ColorSpace + ?Sized>(space: &S, a: &str, b: &str) -> f64 {
    match (a.parse::<CssColor>(), b.parse::<CssColor>()) {
        (Ok(a), Ok(b)) => contrast_ratio(space, &a, &b),
        _ => 0.0,
    }
}

/// Choose whichever of `light` and `dark` contrasts more with `background`.
/// Ties go to `light`.
#[must_use]
pub fn pick_contrast_color<'a, S: ColorSpace + ?Sized>(
    space: &S,
    background: &str,
    light: &'a str,
    dark: &'a str,
) -> &'a str {
    if wcag_contrast(space, light, background) >= wcag_contrast(space, dark, background) {
        light
    } else {
        dark
    }
}

// ─── APCA ────────────────────────────────────────────────────────────────────

const MAIN_TRC: f64 = 2.4;

const S_RCO: f64 = 0.212_672_9;
const S_GCO: f64 = 0.715_152_2;
const S_BCO: f64 = 0.072_175_0;

const NORM_BG: f64 = 0.56;
const NORM_TXT: f64 = 0.57;
const REV_TXT: f64 = 0.62;
const REV_BG: f64 = 0.65;

const BLK_THRS: f64 = 0.022;
const BLK_CLMP: f64 = 1.414;
const SCALE_BOW: f64 = 1.14;
const SCALE_WOB: f64 = 1.14;
const LO_BOW_OFFSET: f64 = 0.027;
const LO_WOB_OFFSET: f64 = 0.027;
const DELTA_Y_MIN: f64 = 0.0005;
const LO_CLIP: f64 = 0.1;

/// APCA screen luminance of an 8-bit sRGB color.
#[must_use]
pub fn apca_luminance((r, g, b): (u8, u8, u8)) -> f64 {
    let lin = |c: u8| (f64::from(c) / 255.0).powf(MAIN_TRC);
    S_RCO.mul_add(lin(r), S_GCO.mul_add(lin(g), S_BCO * lin(b)))
}

/// APCA lightness contrast (Lc) from two screen luminances.
///
/// Returns 0.0 for luminances outside `[0, 1.1]` and for pairs too close
/// to tell apart.
#[must_use]
pub fn apca_lc(text_y: f64, background_y: f64) -> f64 {
    let valid = |y: f64| (0.0..=1.1).contains(&y);
    if !valid(text_y) || !valid(background_y) {
        return 0.0;
    }

    let soft_clamp = |y: f64| {
        if y > BLK_THRS {
            y
        } else {
            y + (BLK_THRS - y).powf(BLK_CLMP)
        }
    };
    let txt = soft_clamp(text_y);
    let bg = soft_clamp(background_y);

    if (bg - txt).abs() < DELTA_Y_MIN {
        return 0.0;
    }

    let lc = if bg > txt {
        let sapc = (bg.powf(NORM_BG) - txt.powf(NORM_TXT)) * SCALE_BOW;
        if sapc < LO_CLIP { 0.0 } else { sapc - LO_BOW_OFFSET }
    } else {
        let sapc = (bg.powf(REV_BG) - txt.powf(REV_TXT)) * SCALE_WOB;
        if sapc > -LO_CLIP { 0.0 } else { sapc + LO_WOB_OFFSET }
    };
    lc * 100.0
}

/// APCA Lc of `text` over `background`.
///
/// Both colors are reduced to 8-bit sRGB first, so wide-gamut colors are
/// clipped to the sRGB cube before measuring. 0.0 if either fails to parse.
#[must_use]
pub fn apca_contrast<S: ColorSpace + ?Sized>(space: &S, text: &str, background: &str) -> f64 {
    let screen_y = |s: &str| {
        s.parse::<CssColor>()
            .ok()
            .map(|css| apca_luminance(space.to_srgb(&css).to_rgb8()))
    };
    match (screen_y(text), screen_y(background)) {
        (Some(t), Some(b)) => apca_lc(t, b),
        _ => 0.0,
    }
}

/// Readability band for an APCA Lc value (judged on its magnitude).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum ContrastRating {
    #[serde(rename = "Fail")]
    Fail,
    #[serde(rename = "Min (Large)")]
    MinLarge,
    #[serde(rename = "Min (Content)")]
    MinContent,
    #[serde(rename = "Good (Body)")]
    GoodBody,
    #[serde(rename = "Preferred (Body)")]
    PreferredBody,
}

impl ContrastRating {
    #[must_use]
    pub fn from_lc(lc: f64) -> Self {
        match lc.abs() {
            v if v >= 90.0 => Self::PreferredBody,
            v if v >= 75.0 => Self::GoodBody,
            v if v >= 60.0 => Self::MinContent,
            v if v >= 45.0 => Self::MinLarge,
            _ => Self::Fail,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreferredBody => "Preferred (Body)",
            Self::GoodBody => "Good (Body)",
            Self::MinContent => "Min (Content)",
            Self::MinLarge => "Min (Large)",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for ContrastRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tcs_color::OklabSpace;

    // ── WCAG ────────────────────────────────────────────────────────

    #[test]
    fn black_white_luminance() {
        let black: CssColor = "#000000".parse().unwrap();
        let white: CssColor = "#ffffff".parse().unwrap();
        assert!(relative_luminance(&OklabSpace, &black) < 0.001);
        assert!((relative_luminance(&OklabSpace, &white) - 1.0).abs() < 0.001);
    }

    #[test]
    fn black_white_contrast() {
        let ratio = wcag_contrast(&OklabSpace, "#000000", "#ffffff");
        assert!((ratio - 21.0).abs() < 0.01, "got {ratio}");
    }

    #[test]
    fn contrast_is_symmetric() {
        let ab = wcag_contrast(&OklabSpace, "#ff4c00", "#1685a9");
        let ba = wcag_contrast(&OklabSpace, "#1685a9", "#ff4c00");
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn same_color_contrast_is_one() {
        assert!((wcag_contrast(&OklabSpace, "#ff4c00", "#ff4c00") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unparsable_contrast_is_zero() {
        assert_eq!(wcag_contrast(&OklabSpace, "nope", "#ffffff"), 0.0);
        assert_eq!(apca_contrast(&OklabSpace, "#000000", "nope"), 0.0);
    }

    #[test]
    fn p3_colors_are_measured() {
        let ratio = wcag_contrast(&OklabSpace, "color(display-p3 1 1 1)", "color(display-p3 0 0 0)");
        assert!(ratio > 20.0, "got {ratio}");
    }

    #[test]
    fn pick_prefers_readable_candidate() {
        assert_eq!(pick_contrast_color(&OklabSpace, "#111111", DEFAULT_LIGHT, DEFAULT_DARK), "#ffffff");
        assert_eq!(pick_contrast_color(&OklabSpace, "#fafafa", DEFAULT_LIGHT, DEFAULT_DARK), "#000000");
    }

    #[test]
    fn pick_tie_goes_to_light() {
        assert_eq!(pick_contrast_color(&OklabSpace, "bogus", "#eeeeee", "#111111"), "#eeeeee");
    }

    // ── APCA ────────────────────────────────────────────────────────

    #[test]
    fn apca_black_on_white() {
        let lc = apca_contrast(&OklabSpace, "#000000", "#ffffff");
        assert!((lc - 106.04).abs() < 0.1, "got {lc}");
    }

    #[test]
    fn apca_white_on_black() {
        let lc = apca_contrast(&OklabSpace, "#ffffff", "#000000");
        assert!((lc + 107.88).abs() < 0.1, "got {lc}");
    }

    #[test]
    fn apca_same_color_is_zero() {
        assert_eq!(apca_contrast(&OklabSpace, "#777777", "#777777"), 0.0);
    }

    #[test]
    fn apca_low_contrast_clips_to_zero() {
        assert_eq!(apca_contrast(&OklabSpace, "#fefefe", "#ffffff"), 0.0);
    }

    #[test]
    fn apca_rejects_out_of_range_luminance() {
        assert_eq!(apca_lc(1.2, 0.0), 0.0);
        assert_eq!(apca_lc(-0.1, 1.0), 0.0);
        assert_eq!(apca_lc(f64::NAN, 1.0), 0.0);
    }

    #[test]
    fn apca_p3_white_on_black_is_strong() {
        let lc = apca_contrast(&OklabSpace, "color(display-p3 1 1 1)", "color(display-p3 0 0 0)");
        assert!(lc.abs() > 100.0, "got {lc}");
    }

    #[test]
    fn rating_bands() {
        assert_eq!(ContrastRating::from_lc(106.0), ContrastRating::PreferredBody);
        assert_eq!(ContrastRating::from_lc(-80.0), ContrastRating::GoodBody);
        assert_eq!(ContrastRating::from_lc(60.0), ContrastRating::MinContent);
        assert_eq!(ContrastRating::from_lc(45.0), ContrastRating::MinLarge);
        assert_eq!(ContrastRating::from_lc(44.9), ContrastRating::Fail);
        assert_eq!(ContrastRating::GoodBody.to_string(), "Good (Body)");
    }
}
