//! Tonal palettes: one seed, fourteen lightness levels.
//!
//! A palette keeps the seed's hue and chroma and sweeps OKLCH lightness
//! through fixed tone levels. Every level is gamut-fitted on its own, so
//! the chroma of the light and dark ends falls away naturally where the
//! display cannot show it.
//!
//! [`PrimitiveSet`] groups the ten ramps a color system is derived from:
//! brand, its hue rotations, neutrals, and the fixed status colors.

use std::fmt;
use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tcs_color::{ColorSpace, CssColor, Gamut, Oklch, fit};

/// Chroma multiplier for the near-black and near-white levels.
const EXTREME_CHROMA_SCALE: f64 = 0.5;

/// Seed for the error ramp.
pub const ERROR_SEED: &str = "#ba1a1a";
/// Seed for the warning ramp.
pub const WARNING_SEED: &str = "#ff9800";
/// Seed for the success ramp.
pub const SUCCESS_SEED: &str = "#386a20";

// ─── Tone ────────────────────────────────────────────────────────────────────

/// A palette level. The number is the OKLCH lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tone {
    T0,
    T10,
    T20,
    T30,
    T40,
    T50,
    T60,
    T70,
    T80,
    T90,
    T95,
    T98,
    T99,
    T100,
}

impl Tone {
    /// Every level, darkest first.
    pub const ALL: [Self; 14] = [
        Self::T0,
        Self::T10,
        Self::T20,
        Self::T30,
        Self::T40,
        Self::T50,
        Self::T60,
        Self::T70,
        Self::T80,
        Self::T90,
        Self::T95,
        Self::T98,
        Self::T99,
        Self::T100,
    ];

    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::T0 => 0,
            Self::T10 => 10,
            Self::T20 => 20,
            Self::T30 => 30,
            Self::T40 => 40,
            Self::T50 => 50,
            Self::T60 => 60,
            Self::T70 => 70,
            Self::T80 => 80,
            Self::T90 => 90,
            Self::T95 => 95,
            Self::T98 => 98,
            Self::T99 => 99,
            Self::T100 => 100,
        }
    }

    #[must_use]
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.level() == level)
    }

    /// OKLCH lightness for this level (0.0–1.0).
    #[must_use]
    pub fn lightness(self) -> f64 {
        f64::from(self.level()) / 100.0
    }

    /// Levels below 10 or above 90, where chroma is halved.
    #[must_use]
    pub const fn is_extreme(self) -> bool {
        self.level() < 10 || self.level() > 90
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// Serialized colors for every [`Tone`] of one ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    tones: [String; 14],
}

impl Palette {
    /// The color at `tone`.
    #[must_use]
    pub fn get(&self, tone: Tone) -> &str {
        &self.tones[tone.index()]
    }

    /// `(tone, color)` pairs, darkest first.
    pub fn iter(&self) -> impl Iterator<Item = (Tone, &str)> {
        Tone::ALL.into_iter().zip(self.tones.iter().map(String::as_str))
    }
}

impl Index<Tone> for Palette {
    type Output = str;

    fn index(&self, tone: Tone) -> &str {
        self.get(tone)
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tones.len()))?;
        for (tone, color) in self.iter() {
            map.serialize_entry(&tone.level(), color)?;
        }
        map.end()
    }
}

// ─── Ramp generation ─────────────────────────────────────────────────────────

/// Serialize a fitted color for `gamut`.
///
/// sRGB targets always get `#rrggbb`. Display P3 targets get the
/// `color(display-p3 …)` form, but only for colors sRGB cannot show;
/// everything else stays hex.
#[must_use]
pub fn serialize_color<S: ColorSpace + ?Sized>(space: &S, color: Oklch, gamut: Gamut) -> String {
    match gamut {
        Gamut::DisplayP3 if !space.in_gamut(color, Gamut::Srgb) => {
            CssColor::opaque(Gamut::DisplayP3, space.to_rgb(color, Gamut::DisplayP3)).to_css()
        }
        _ => space.to_hex(color),
    }
}

/// Build the tonal palette for `seed`, fitted and serialized for `gamut`.
#[must_use]
pub fn generate_ramp<S: ColorSpace + ?Sized>(space: &S, seed: Oklch, gamut: Gamut) -> Palette {
    let tones = Tone::ALL.map(|tone| {
        let chroma = if tone.is_extreme() {
            seed.c * EXTREME_CHROMA_SCALE
        } else {
            seed.c
        };
        let target = Oklch::new(tone.lightness(), chroma, seed.h);
        serialize_color(space, fit(space, target, gamut), gamut)
    });
    Palette { tones }
}

/// [`generate_ramp`] from a serialized seed.
///
/// A seed that does not parse is treated as achromatic black, which gives a
/// plain gray ramp instead of an error.
#[must_use]
pub fn generate_ramp_from_hex<S: ColorSpace + ?Sized>(space: &S, hex: &str, gamut: Gamut) -> Palette {
    let seed = space.parse(hex).unwrap_or_else(|err| {
        tracing::warn!(seed = hex, %err, "unparsable ramp seed, using black");
        Oklch::BLACK
    });
    generate_ramp(space, seed, gamut)
}

// ─── Primitive set ───────────────────────────────────────────────────────────

/// The ten ramps of a color system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ramp {
    Brand,
    Secondary,
    Tertiary,
    Fourth,
    Emphasize,
    Neutral,
    NeutralVariant,
    Error,
    Warning,
    Success,
}

impl Ramp {
    pub const ALL: [Self; 10] = [
        Self::Brand,
        Self::Secondary,
        Self::Tertiary,
        Self::Fourth,
        Self::Emphasize,
        Self::Neutral,
        Self::NeutralVariant,
        Self::Error,
        Self::Warning,
        Self::Success,
    ];

    /// The accent ramps that get their own action and tint tokens.
    pub const ACCENTS: [Self; 4] = [Self::Secondary, Self::Tertiary, Self::Fourth, Self::Emphasize];

    /// Key in the serialized primitive set.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NeutralVariant => "neutralVariant",
            other => other.token_name(),
        }
    }

    /// Segment used inside token keys (`text.on-brand`, `bg.tint.fourth`).
    #[must_use]
    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Fourth => "fourth",
            Self::Emphasize => "emphasize",
            Self::Neutral => "neutral",
            Self::NeutralVariant => "neutral-variant",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }

    /// Inverse of [`Ramp::token_name`].
    #[must_use]
    pub fn from_token_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.token_name() == name)
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Replacement seeds for the secondary and tertiary ramps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrimitiveOverrides {
    pub secondary: Option<Oklch>,
    pub tertiary: Option<Oklch>,
}

/// All primitive ramps derived from one seed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveSet {
    pub brand: Palette,
    pub secondary: Palette,
    pub tertiary: Palette,
    pub fourth: Palette,
    pub emphasize: Palette,
    pub neutral: Palette,
    pub neutral_variant: Palette,
    pub error: Palette,
    pub warning: Palette,
    pub success: Palette,
}

impl PrimitiveSet {
    /// Derive every ramp from `seed`.
    ///
    /// | ramp            | seed                                   |
    /// |-----------------|----------------------------------------|
    /// | brand           | the seed                               |
    /// | secondary       | hue + 60°, or the override             |
    /// | tertiary        | hue + 120°, or the override            |
    /// | fourth          | hue + 180°                             |
    /// | emphasize       | chroma × 1.5, at most 0.4              |
    /// | neutral         | chroma × 0.1, at most 0.03             |
    /// | neutral-variant | chroma × 0.2, at most 0.06             |
    /// | error, warning, success | fixed seeds                    |
    #[must_use]
    pub fn generate<S: ColorSpace + ?Sized>(
        space: &S,
        seed: Oklch,
        gamut: Gamut,
        overrides: &PrimitiveOverrides,
    ) -> Self {
        let ramp = |c: Oklch| generate_ramp(space, c, gamut);
        let fixed = |hex: &str| generate_ramp_from_hex(space, hex, gamut);

        Self {
            brand: ramp(seed),
            secondary: ramp(overrides.secondary.unwrap_or_else(|| seed.shift_hue(60.0))),
            tertiary: ramp(overrides.tertiary.unwrap_or_else(|| seed.shift_hue(120.0))),
            fourth: ramp(seed.shift_hue(180.0)),
            emphasize: ramp(seed.with_chroma((seed.c * 1.5).min(0.4))),
            neutral: ramp(seed.with_chroma((seed.c * 0.1).min(0.03))),
            neutral_variant: ramp(seed.with_chroma((seed.c * 0.2).min(0.06))),
            error: fixed(ERROR_SEED),
            warning: fixed(WARNING_SEED),
            success: fixed(SUCCESS_SEED),
        }
    }

    #[must_use]
    pub const fn get(&self, ramp: Ramp) -> &Palette {
        match ramp {
            Ramp::Brand => &self.brand,
            Ramp::Secondary => &self.secondary,
            Ramp::Tertiary => &self.tertiary,
            Ramp::Fourth => &self.fourth,
            Ramp::Emphasize => &self.emphasize,
            Ramp::Neutral => &self.neutral,
            Ramp::NeutralVariant => &self.neutral_variant,
            Ramp::Error => &self.error,
            Ramp::Warning => &self.warning,
            Ramp::Success => &self.success,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tcs_color::OklabSpace;

    fn vermilion() -> Oklch {
        OklabSpace.parse("#ff4c00").unwrap()
    }

    // ── Tone ────────────────────────────────────────────────────────

    #[test]
    fn tone_levels_are_ascending() {
        let levels: Vec<u8> = Tone::ALL.iter().map(|t| t.level()).collect();
        assert_eq!(levels, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 95, 98, 99, 100]);
    }

    #[test]
    fn tone_from_level() {
        assert_eq!(Tone::from_level(95), Some(Tone::T95));
        assert_eq!(Tone::from_level(45), None);
    }

    #[test]
    fn extreme_tones() {
        let extreme: Vec<Tone> = Tone::ALL.into_iter().filter(|t| t.is_extreme()).collect();
        assert_eq!(extreme, vec![Tone::T0, Tone::T95, Tone::T98, Tone::T99, Tone::T100]);
    }

    // ── Ramps ───────────────────────────────────────────────────────

    #[test]
    fn ramp_ends_are_black_and_white() {
        let p = generate_ramp(&OklabSpace, vermilion(), Gamut::Srgb);
        assert_eq!(&p[Tone::T0], "#000000");
        assert_eq!(&p[Tone::T100], "#ffffff");
    }

    #[test]
    fn ramp_gets_lighter() {
        let p = generate_ramp(&OklabSpace, vermilion(), Gamut::Srgb);
        let lightness: Vec<f64> = p.iter().map(|(_, c)| OklabSpace.parse(c).unwrap().l).collect();
        for pair in lightness.windows(2) {
            assert!(pair[0] < pair[1] + 1e-3, "not ascending: {lightness:?}");
        }
    }

    #[test]
    fn srgb_ramp_is_all_hex() {
        let p = generate_ramp(&OklabSpace, Oklch::new(0.6, 0.35, 145.0), Gamut::Srgb);
        for (tone, color) in p.iter() {
            assert!(color.starts_with('#') && color.len() == 7, "{tone}: {color}");
        }
    }

    #[test]
    fn p3_ramp_uses_functional_form_only_beyond_srgb() {
        let p = generate_ramp(&OklabSpace, Oklch::new(0.6, 0.35, 145.0), Gamut::DisplayP3);
        assert_eq!(&p[Tone::T0], "#000000");
        assert_eq!(&p[Tone::T100], "#ffffff");
        assert!(
            p.iter().any(|(_, c)| c.starts_with("color(display-p3 ")),
            "vivid green should leave sRGB: {p:?}"
        );
        for (_, color) in p.iter() {
            let parsed = OklabSpace.parse(color).unwrap();
            assert!(OklabSpace.in_gamut(parsed, Gamut::DisplayP3));
        }
    }

    #[test]
    fn ramp_members_are_in_gamut() {
        let p = generate_ramp(&OklabSpace, vermilion(), Gamut::Srgb);
        for (tone, color) in p.iter() {
            let parsed = OklabSpace.parse(color).unwrap();
            assert!(OklabSpace.in_gamut(parsed, Gamut::Srgb), "{tone}: {color}");
        }
    }

    #[test]
    fn unparsable_seed_gives_gray_ramp() {
        let p = generate_ramp_from_hex(&OklabSpace, "not-a-color", Gamut::Srgb);
        let gray = generate_ramp(&OklabSpace, Oklch::BLACK, Gamut::Srgb);
        assert_eq!(p, gray);
        let mid = OklabSpace.parse(&p[Tone::T50]).unwrap();
        assert!(mid.c < 1e-3);
    }

    #[test]
    fn overflowing_seed_gives_gray_ramp() {
        let p = generate_ramp_from_hex(&OklabSpace, "rgb(1e300 0 0)", Gamut::Srgb);
        assert_eq!(p, generate_ramp(&OklabSpace, Oklch::BLACK, Gamut::Srgb));
        assert_ne!(&p[Tone::T50], "#000000");
        let mid = OklabSpace.parse(&p[Tone::T50]).unwrap();
        assert!((mid.l - 0.5).abs() < 0.01, "T50 lightness {}", mid.l);
    }

    #[test]
    fn palette_serializes_as_level_map() {
        let p = generate_ramp(&OklabSpace, Oklch::BLACK, Gamut::Srgb);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["0"], "#000000");
        assert_eq!(json["100"], "#ffffff");
        assert_eq!(json.as_object().unwrap().len(), 14);
    }

    // ── Primitive set ───────────────────────────────────────────────

    #[test]
    fn brand_ramp_comes_from_the_seed() {
        let set = PrimitiveSet::generate(&OklabSpace, vermilion(), Gamut::Srgb, &PrimitiveOverrides::default());
        assert_eq!(set.brand, generate_ramp(&OklabSpace, vermilion(), Gamut::Srgb));
    }

    #[test]
    fn neutral_chroma_is_capped() {
        let seed = vermilion();
        let set = PrimitiveSet::generate(&OklabSpace, seed, Gamut::Srgb, &PrimitiveOverrides::default());
        let neutral = OklabSpace.parse(&set.neutral[Tone::T50]).unwrap();
        let variant = OklabSpace.parse(&set.neutral_variant[Tone::T50]).unwrap();
        assert!(neutral.c <= 0.03 + 2e-3, "neutral chroma {}", neutral.c);
        assert!(variant.c <= 0.06 + 2e-3, "variant chroma {}", variant.c);
        assert!(variant.c > neutral.c);
    }

    #[test]
    fn rotated_ramps_follow_the_hue() {
        let seed = vermilion();
        let set = PrimitiveSet::generate(&OklabSpace, seed, Gamut::Srgb, &PrimitiveOverrides::default());
        let fourth = generate_ramp(&OklabSpace, seed.shift_hue(180.0), Gamut::Srgb);
        assert_eq!(set.fourth, fourth);
        assert_ne!(set.secondary, set.brand);
    }

    #[test]
    fn overrides_replace_secondary_and_tertiary() {
        let teal = Oklch::new(0.6, 0.1, 190.0);
        let overrides = PrimitiveOverrides {
            secondary: Some(teal),
            tertiary: None,
        };
        let set = PrimitiveSet::generate(&OklabSpace, vermilion(), Gamut::Srgb, &overrides);
        assert_eq!(set.secondary, generate_ramp(&OklabSpace, teal, Gamut::Srgb));
        let default_tertiary = generate_ramp(&OklabSpace, vermilion().shift_hue(120.0), Gamut::Srgb);
        assert_eq!(set.tertiary, default_tertiary);
    }

    #[test]
    fn status_ramps_ignore_the_seed() {
        let a = PrimitiveSet::generate(&OklabSpace, vermilion(), Gamut::Srgb, &PrimitiveOverrides::default());
        let b = PrimitiveSet::generate(
            &OklabSpace,
            Oklch::new(0.5, 0.1, 250.0),
            Gamut::Srgb,
            &PrimitiveOverrides::default(),
        );
        assert_eq!(a.error, b.error);
        assert_eq!(a.warning, b.warning);
        assert_eq!(a.success, b.success);
    }

    #[test]
    fn ramp_names() {
        assert_eq!(Ramp::NeutralVariant.name(), "neutralVariant");
        assert_eq!(Ramp::NeutralVariant.token_name(), "neutral-variant");
        assert_eq!(Ramp::from_token_name("fourth"), Some(Ramp::Fourth));
    }

    #[test]
    fn primitive_set_serializes_camel_case() {
        let set = PrimitiveSet::generate(&OklabSpace, vermilion(), Gamut::Srgb, &PrimitiveOverrides::default());
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.get("neutralVariant").is_some());
        assert_eq!(json.as_object().unwrap().len(), 10);
    }
}
