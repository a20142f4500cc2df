//! Semantic tokens: named roles resolved against a primitive set.
//!
//! A token key names what a color is for (`bg.canvas`, `text.on-brand`),
//! not what it looks like. [`derive_tokens`] fills every known role from the
//! primitive ramps, choosing tone levels by mode. Text that sits on a solid
//! fill is picked by contrast rather than by tone.

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tcs_color::ColorSpace;

use crate::contrast::{DEFAULT_DARK, DEFAULT_LIGHT, pick_contrast_color};
use crate::palette::{PrimitiveSet, Ramp, Tone};

// ─── Token keys ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BrandRole {
    Primary,
    PrimaryHover,
    PrimaryBg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextRole {
    Primary,
    Secondary,
    Placeholder,
    Inverse,
    /// Text drawn on a solid fill of the given ramp.
    On(Ramp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BgRole {
    Canvas,
    Container,
    Elevated,
    Mask,
    /// Faint wash of the given ramp.
    Tint(Ramp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BorderRole {
    Default,
    Divider,
    Strong,
}

/// Feedback families. `Info` borrows the brand ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Success,
    Warning,
    Error,
    Info,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Success, Self::Warning, Self::Error, Self::Info];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    #[must_use]
    pub const fn ramp(self) -> Ramp {
        match self {
            Self::Success => Ramp::Success,
            Self::Warning => Ramp::Warning,
            Self::Error => Ramp::Error,
            Self::Info => Ramp::Brand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusRole {
    Text,
    Bg,
    Border,
    SolidBg,
    SolidText,
}

impl StatusRole {
    pub const ALL: [Self; 5] = [Self::Text, Self::Bg, Self::Border, Self::SolidBg, Self::SolidText];

    const fn suffix(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bg => "bg",
            Self::Border => "border",
            Self::SolidBg => "solid.bg",
            Self::SolidText => "solid.text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionRole {
    Base,
    Hover,
    Bg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimaryActionRole {
    Pressed,
    Disabled,
    DisabledText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShadowSize {
    Sm,
    Md,
    Lg,
}

impl ShadowSize {
    const fn name(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

/// A semantic token key.
///
/// Known roles are closed variants; anything else read from outside (an
/// override table, a caller-supplied map) lands in `Extension` verbatim.
/// The dotted string form is the interchange format in both directions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKey {
    Brand(BrandRole),
    Text(TextRole),
    Bg(BgRole),
    Border(BorderRole),
    Status(Status, StatusRole),
    /// `action.{ramp}`, `action.{ramp}.hover`, `action.{ramp}.bg`.
    Action(Ramp, ActionRole),
    PrimaryAction(PrimaryActionRole),
    Shadow(ShadowSize),
    Extension(String),
}

/// Dotted form → structured variant, for every structured key.
static STRUCTURED_KEYS: LazyLock<HashMap<String, TokenKey>> = LazyLock::new(|| {
    TokenKey::structured()
        .into_iter()
        .map(|key| (key.to_string(), key))
        .collect()
});

impl TokenKey {
    /// Every role [`derive_tokens`] produces, in derivation order.
    #[must_use]
    pub fn known() -> Vec<Self> {
        use TokenKey as K;

        let mut keys = vec![
            K::Brand(BrandRole::Primary),
            K::Brand(BrandRole::PrimaryHover),
            K::Brand(BrandRole::PrimaryBg),
            K::Text(TextRole::Primary),
            K::Text(TextRole::Secondary),
            K::Text(TextRole::Placeholder),
            K::Text(TextRole::Inverse),
            K::Text(TextRole::On(Ramp::Brand)),
            K::Text(TextRole::On(Ramp::Error)),
            K::Text(TextRole::On(Ramp::Success)),
            K::Text(TextRole::On(Ramp::Warning)),
            K::Bg(BgRole::Canvas),
            K::Bg(BgRole::Container),
            K::Bg(BgRole::Elevated),
            K::Bg(BgRole::Mask),
        ];
        keys.extend(TINT_RAMPS.map(|r| K::Bg(BgRole::Tint(r))));
        keys.extend([
            K::Border(BorderRole::Default),
            K::Border(BorderRole::Divider),
            K::Border(BorderRole::Strong),
        ]);
        for status in Status::ALL {
            for role in StatusRole::ALL {
                keys.push(K::Status(status, role));
            }
        }
        for ramp in Ramp::ACCENTS {
            keys.extend([
                K::Action(ramp, ActionRole::Base),
                K::Action(ramp, ActionRole::Hover),
                K::Action(ramp, ActionRole::Bg),
                K::Text(TextRole::On(ramp)),
            ]);
        }
        keys.extend([
            K::PrimaryAction(PrimaryActionRole::Pressed),
            K::PrimaryAction(PrimaryActionRole::Disabled),
            K::PrimaryAction(PrimaryActionRole::DisabledText),
            K::Shadow(ShadowSize::Sm),
            K::Shadow(ShadowSize::Md),
            K::Shadow(ShadowSize::Lg),
        ]);
        keys
    }

    /// Every structured variant, derived or not (`text.on-neutral` is never
    /// derived but is still a role).
    fn structured() -> Vec<Self> {
        use TokenKey as K;

        let mut keys = vec![
            K::Brand(BrandRole::Primary),
            K::Brand(BrandRole::PrimaryHover),
            K::Brand(BrandRole::PrimaryBg),
            K::Text(TextRole::Primary),
            K::Text(TextRole::Secondary),
            K::Text(TextRole::Placeholder),
            K::Text(TextRole::Inverse),
            K::Bg(BgRole::Canvas),
            K::Bg(BgRole::Container),
            K::Bg(BgRole::Elevated),
            K::Bg(BgRole::Mask),
            K::Border(BorderRole::Default),
            K::Border(BorderRole::Divider),
            K::Border(BorderRole::Strong),
            K::PrimaryAction(PrimaryActionRole::Pressed),
            K::PrimaryAction(PrimaryActionRole::Disabled),
            K::PrimaryAction(PrimaryActionRole::DisabledText),
            K::Shadow(ShadowSize::Sm),
            K::Shadow(ShadowSize::Md),
            K::Shadow(ShadowSize::Lg),
        ];
        for ramp in Ramp::ALL {
            keys.extend([
                K::Text(TextRole::On(ramp)),
                K::Bg(BgRole::Tint(ramp)),
                K::Action(ramp, ActionRole::Base),
                K::Action(ramp, ActionRole::Hover),
                K::Action(ramp, ActionRole::Bg),
            ]);
        }
        for status in Status::ALL {
            for role in StatusRole::ALL {
                keys.push(K::Status(status, role));
            }
        }
        keys
    }

    /// Read a dotted key. The dotted form of any structured variant comes
    /// back as that variant; anything else becomes [`TokenKey::Extension`].
    #[must_use]
    pub fn parse(key: &str) -> Self {
        STRUCTURED_KEYS
            .get(key)
            .cloned()
            .unwrap_or_else(|| Self::Extension(key.to_string()))
    }

    /// The one variant for this key's dotted form: an `Extension` that
    /// spells a structured key becomes that key.
    #[must_use]
    pub fn canonical(self) -> Self {
        match self {
            Self::Extension(key) => Self::parse(&key),
            structured => structured,
        }
    }

    #[must_use]
    pub const fn is_extension(&self) -> bool {
        matches!(self, Self::Extension(_))
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brand(BrandRole::Primary) => f.write_str("brand.primary"),
            Self::Brand(BrandRole::PrimaryHover) => f.write_str("brand.primary-hover"),
            Self::Brand(BrandRole::PrimaryBg) => f.write_str("brand.primary-bg"),
            Self::Text(TextRole::Primary) => f.write_str("text.primary"),
            Self::Text(TextRole::Secondary) => f.write_str("text.secondary"),
            Self::Text(TextRole::Placeholder) => f.write_str("text.placeholder"),
            Self::Text(TextRole::Inverse) => f.write_str("text.inverse"),
            Self::Text(TextRole::On(ramp)) => write!(f, "text.on-{}", ramp.token_name()),
            Self::Bg(BgRole::Canvas) => f.write_str("bg.canvas"),
            Self::Bg(BgRole::Container) => f.write_str("bg.container"),
            Self::Bg(BgRole::Elevated) => f.write_str("bg.elevated"),
            Self::Bg(BgRole::Mask) => f.write_str("bg.mask"),
            Self::Bg(BgRole::Tint(ramp)) => write!(f, "bg.tint.{}", ramp.token_name()),
            Self::Border(BorderRole::Default) => f.write_str("border.default"),
            Self::Border(BorderRole::Divider) => f.write_str("border.divider"),
            Self::Border(BorderRole::Strong) => f.write_str("border.strong"),
            Self::Status(status, role) => write!(f, "{}.{}", status.name(), role.suffix()),
            Self::Action(ramp, ActionRole::Base) => write!(f, "action.{}", ramp.token_name()),
            Self::Action(ramp, ActionRole::Hover) => write!(f, "action.{}.hover", ramp.token_name()),
            Self::Action(ramp, ActionRole::Bg) => write!(f, "action.{}.bg", ramp.token_name()),
            Self::PrimaryAction(PrimaryActionRole::Pressed) => f.write_str("action.primary.pressed"),
            Self::PrimaryAction(PrimaryActionRole::Disabled) => f.write_str("action.primary.disabled"),
            Self::PrimaryAction(PrimaryActionRole::DisabledText) => {
                f.write_str("action.primary.disabled-text")
            }
            Self::Shadow(size) => write!(f, "effect.shadow.{}", size.name()),
            Self::Extension(key) => f.write_str(key),
        }
    }
}

impl FromStr for TokenKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for TokenKey {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

// ─── Token map ───────────────────────────────────────────────────────────────

/// Token key → serialized color (or CSS value, for shadows).
///
/// Serializes as a flat object keyed by the dotted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: BTreeMap<TokenKey, String>,
}

impl TokenMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &TokenKey) -> Option<&str> {
        match key {
            TokenKey::Extension(raw) => self.get_str(raw),
            structured => self.entries.get(structured).map(String::as_str),
        }
    }

    /// Look up by dotted key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(&TokenKey::parse(key)).map(String::as_str)
    }

    /// Insert under the key's canonical variant, replacing any value stored
    /// under the same dotted form.
    pub fn insert(&mut self, key: TokenKey, value: impl Into<String>) {
        self.entries.insert(key.canonical(), value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl<K: Into<TokenKey>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into().canonical(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for TokenMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

// ─── Interaction state ───────────────────────────────────────────────────────

/// Overlay opacities for interaction feedback. The same in both modes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InteractionState {
    pub hover_opacity: f64,
    pub pressed_opacity: f64,
    pub disabled_opacity: f64,
    pub content_disabled_opacity: f64,
}

impl InteractionState {
    pub const STANDARD: Self = Self {
        hover_opacity: 0.08,
        pressed_opacity: 0.12,
        disabled_opacity: 0.38,
        content_disabled_opacity: 0.38,
    };
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ─── Derivation ──────────────────────────────────────────────────────────────

const TINT_RAMPS: [Ramp; 5] = [
    Ramp::Brand,
    Ramp::Secondary,
    Ramp::Tertiary,
    Ramp::Fourth,
    Ramp::Emphasize,
];

const MASK_LIGHT: &str = "rgba(0,0,0,0.4)";
const MASK_DARK: &str = "rgba(0,0,0,0.6)";

const SHADOWS_LIGHT: [&str; 3] = [
    "0 1px 2px 0 rgba(0, 0, 0, 0.05)",
    "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)",
    "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05)",
];
const SHADOWS_DARK: [&str; 3] = [
    "0 1px 2px 0 rgba(0, 0, 0, 0.3)",
    "0 4px 6px -1px rgba(0, 0, 0, 0.4), 0 2px 4px -1px rgba(0, 0, 0, 0.2)",
    "0 10px 15px -3px rgba(0, 0, 0, 0.4), 0 4px 6px -2px rgba(0, 0, 0, 0.2)",
];

struct Deriver<'a, S: ?Sized> {
    space: &'a S,
    primitives: &'a PrimitiveSet,
    is_dark: bool,
    tokens: TokenMap,
}

impl<S: ColorSpace + ?Sized> Deriver<'_, S> {
    fn tone(&self, ramp: Ramp, light: Tone, dark: Tone) -> &str {
        let tone = if self.is_dark { dark } else { light };
        &self.primitives.get(ramp)[tone]
    }

    fn set(&mut self, key: TokenKey, ramp: Ramp, light: Tone, dark: Tone) {
        let value = self.tone(ramp, light, dark).to_string();
        self.tokens.insert(key, value);
    }

    /// White or black, whichever reads better on `ramp` at the given tone.
    fn set_on(&mut self, key: TokenKey, ramp: Ramp, light: Tone, dark: Tone) {
        let bg = self.tone(ramp, light, dark);
        let pick = pick_contrast_color(self.space, bg, DEFAULT_LIGHT, DEFAULT_DARK);
        self.tokens.insert(key, pick);
    }

    fn fixed(&mut self, key: TokenKey, light: &str, dark: &str) {
        let value = if self.is_dark { dark } else { light };
        self.tokens.insert(key, value);
    }

    fn brand(&mut self) {
        use BrandRole::{Primary, PrimaryBg, PrimaryHover};
        self.set(TokenKey::Brand(Primary), Ramp::Brand, Tone::T40, Tone::T80);
        self.set(TokenKey::Brand(PrimaryHover), Ramp::Brand, Tone::T30, Tone::T70);
        self.set(TokenKey::Brand(PrimaryBg), Ramp::Brand, Tone::T95, Tone::T20);
    }

    fn text(&mut self) {
        use TextRole::{Inverse, On, Placeholder, Primary, Secondary};
        let n = Ramp::Neutral;
        self.set(TokenKey::Text(Primary), n, Tone::T10, Tone::T95);
        self.set(TokenKey::Text(Secondary), n, Tone::T40, Tone::T80);
        self.set(TokenKey::Text(Placeholder), n, Tone::T60, Tone::T60);
        self.set(TokenKey::Text(Inverse), n, Tone::T100, Tone::T10);

        for ramp in [Ramp::Brand, Ramp::Error, Ramp::Success] {
            self.set_on(TokenKey::Text(On(ramp)), ramp, Tone::T40, Tone::T80);
        }
        // Warning fills are light in light mode.
        self.set_on(TokenKey::Text(On(Ramp::Warning)), Ramp::Warning, Tone::T90, Tone::T80);
    }

    fn background(&mut self) {
        let n = Ramp::Neutral;
        self.set(TokenKey::Bg(BgRole::Canvas), n, Tone::T98, Tone::T0);
        self.set(TokenKey::Bg(BgRole::Container), n, Tone::T100, Tone::T10);
        self.set(TokenKey::Bg(BgRole::Elevated), n, Tone::T100, Tone::T20);
        self.fixed(TokenKey::Bg(BgRole::Mask), MASK_LIGHT, MASK_DARK);
        for ramp in TINT_RAMPS {
            self.set(TokenKey::Bg(BgRole::Tint(ramp)), ramp, Tone::T98, Tone::T10);
        }
    }

    fn border(&mut self) {
        let nv = Ramp::NeutralVariant;
        self.set(TokenKey::Border(BorderRole::Default), nv, Tone::T80, Tone::T30);
        self.set(TokenKey::Border(BorderRole::Divider), nv, Tone::T90, Tone::T20);
        self.set(TokenKey::Border(BorderRole::Strong), nv, Tone::T70, Tone::T40);
    }

    fn status(&mut self) {
        use StatusRole::{Bg, Border, SolidBg, SolidText, Text};
        for status in Status::ALL {
            let ramp = status.ramp();
            // Info text matches the brand's primary tones.
            let (text_light, text_dark) = if status == Status::Info {
                (Tone::T40, Tone::T80)
            } else {
                (Tone::T30, Tone::T90)
            };
            self.set(TokenKey::Status(status, Text), ramp, text_light, text_dark);
            self.set(TokenKey::Status(status, Bg), ramp, Tone::T95, Tone::T20);
            self.set(TokenKey::Status(status, Border), ramp, Tone::T80, Tone::T30);
            self.set(TokenKey::Status(status, SolidBg), ramp, Tone::T40, Tone::T80);
            self.set_on(TokenKey::Status(status, SolidText), ramp, Tone::T40, Tone::T80);
        }
    }

    fn actions(&mut self) {
        use PrimaryActionRole::{Disabled, DisabledText, Pressed};

        for ramp in Ramp::ACCENTS {
            self.set(TokenKey::Action(ramp, ActionRole::Base), ramp, Tone::T40, Tone::T80);
            self.set(TokenKey::Action(ramp, ActionRole::Hover), ramp, Tone::T30, Tone::T70);
            self.set(TokenKey::Action(ramp, ActionRole::Bg), ramp, Tone::T95, Tone::T20);
            self.set_on(TokenKey::Text(TextRole::On(ramp)), ramp, Tone::T40, Tone::T80);
        }
        self.set(TokenKey::PrimaryAction(Pressed), Ramp::Brand, Tone::T30, Tone::T70);
        self.set(TokenKey::PrimaryAction(Disabled), Ramp::Neutral, Tone::T90, Tone::T20);
        self.set(TokenKey::PrimaryAction(DisabledText), Ramp::Neutral, Tone::T60, Tone::T50);
    }

    fn effects(&mut self) {
        for (i, size) in [ShadowSize::Sm, ShadowSize::Md, ShadowSize::Lg].into_iter().enumerate() {
            self.fixed(TokenKey::Shadow(size), SHADOWS_LIGHT[i], SHADOWS_DARK[i]);
        }
    }
}

/// Resolve every known role against `primitives` for one mode.
///
/// Pure: the same primitives and mode always give the same map.
#[must_use]
pub fn derive_tokens<S: ColorSpace + ?Sized>(space: &S, primitives: &PrimitiveSet, is_dark: bool) -> TokenMap {
    let mut deriver = Deriver {
        space,
        primitives,
        is_dark,
        tokens: TokenMap::new(),
    };
    deriver.brand();
    deriver.text();
    deriver.background();
    deriver.border();
    deriver.status();
    deriver.actions();
    deriver.effects();

    tracing::debug!(is_dark, tokens = deriver.tokens.len(), "derived semantic tokens");
    deriver.tokens
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::wcag_contrast;
    use crate::palette::PrimitiveOverrides;
    use pretty_assertions::assert_eq;
    use tcs_color::{Gamut, OklabSpace};

    fn primitives() -> PrimitiveSet {
        let seed = OklabSpace.parse("#ff4c00").unwrap();
        PrimitiveSet::generate(&OklabSpace, seed, Gamut::Srgb, &PrimitiveOverrides::default())
    }

    // ── Keys ────────────────────────────────────────────────────────

    #[test]
    fn known_key_count() {
        assert_eq!(TokenKey::known().len(), 65);
    }

    #[test]
    fn known_keys_are_unique() {
        let names: std::collections::HashSet<String> =
            TokenKey::known().iter().map(ToString::to_string).collect();
        assert_eq!(names.len(), 65);
    }

    #[test]
    fn key_string_forms() {
        let cases = [
            (TokenKey::Brand(BrandRole::PrimaryHover), "brand.primary-hover"),
            (TokenKey::Text(TextRole::On(Ramp::Brand)), "text.on-brand"),
            (TokenKey::Bg(BgRole::Tint(Ramp::Fourth)), "bg.tint.fourth"),
            (TokenKey::Status(Status::Info, StatusRole::SolidText), "info.solid.text"),
            (TokenKey::Action(Ramp::Emphasize, ActionRole::Hover), "action.emphasize.hover"),
            (TokenKey::PrimaryAction(PrimaryActionRole::DisabledText), "action.primary.disabled-text"),
            (TokenKey::Shadow(ShadowSize::Md), "effect.shadow.md"),
        ];
        for (key, text) in cases {
            assert_eq!(key.to_string(), text);
            assert_eq!(TokenKey::parse(text), key);
        }
    }

    #[test]
    fn unknown_keys_become_extensions() {
        let key: TokenKey = "brand.sparkle".parse().unwrap();
        assert_eq!(key, TokenKey::Extension("brand.sparkle".to_string()));
        assert!(key.is_extension());
        assert_eq!(key.to_string(), "brand.sparkle");
    }

    #[test]
    fn every_structured_key_roundtrips_through_its_dotted_form() {
        let keys = TokenKey::structured();
        let names: std::collections::HashSet<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(names.len(), keys.len());
        for key in keys {
            assert_eq!(TokenKey::parse(&key.to_string()), key);
        }
    }

    #[test]
    fn extension_spelling_a_role_is_the_role() {
        let mut tokens = TokenMap::new();
        tokens.insert(TokenKey::Extension("bg.canvas".to_string()), "#aaaaaa");
        tokens.insert(TokenKey::Bg(BgRole::Canvas), "#bbbbbb");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get(&TokenKey::Extension("bg.canvas".to_string())), Some("#bbbbbb"));

        let json = serde_json::to_string(&tokens).unwrap();
        assert_eq!(json, r##"{"bg.canvas":"#bbbbbb"}"##);
    }

    #[test]
    fn underived_roles_are_found_by_name() {
        let mut tokens = TokenMap::new();
        tokens.insert(TokenKey::Text(TextRole::On(Ramp::Neutral)), "#111111");
        assert_eq!(tokens.get_str("text.on-neutral"), Some("#111111"));
        assert_eq!(
            TokenKey::parse("text.on-neutral"),
            TokenKey::Text(TextRole::On(Ramp::Neutral))
        );
        assert!(!TokenKey::known().contains(&TokenKey::Text(TextRole::On(Ramp::Neutral))));
    }

    #[test]
    fn collected_maps_merge_equal_spellings() {
        let tokens: TokenMap = [
            (TokenKey::Extension("brand.primary".to_string()), "#000001"),
            (TokenKey::Brand(BrandRole::Primary), "#000002"),
        ]
        .into_iter()
        .collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get_str("brand.primary"), Some("#000002"));
    }

    // ── Derivation ──────────────────────────────────────────────────

    #[test]
    fn every_known_key_is_derived() {
        let tokens = derive_tokens(&OklabSpace, &primitives(), false);
        assert_eq!(tokens.len(), 65);
        for key in TokenKey::known() {
            assert!(tokens.get(&key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn light_mode_tones() {
        let p = primitives();
        let tokens = derive_tokens(&OklabSpace, &p, false);
        assert_eq!(tokens.get_str("brand.primary"), Some(&p.brand[Tone::T40]));
        assert_eq!(tokens.get_str("bg.canvas"), Some(&p.neutral[Tone::T98]));
        assert_eq!(tokens.get_str("border.divider"), Some(&p.neutral_variant[Tone::T90]));
        assert_eq!(tokens.get_str("error.text"), Some(&p.error[Tone::T30]));
        assert_eq!(tokens.get_str("info.text"), Some(&p.brand[Tone::T40]));
        assert_eq!(tokens.get_str("action.fourth.bg"), Some(&p.fourth[Tone::T95]));
    }

    #[test]
    fn dark_mode_tones() {
        let p = primitives();
        let tokens = derive_tokens(&OklabSpace, &p, true);
        assert_eq!(tokens.get_str("brand.primary"), Some(&p.brand[Tone::T80]));
        assert_eq!(tokens.get_str("bg.canvas"), Some(&p.neutral[Tone::T0]));
        assert_eq!(tokens.get_str("text.primary"), Some(&p.neutral[Tone::T95]));
        assert_eq!(tokens.get_str("warning.text"), Some(&p.warning[Tone::T90]));
        assert_eq!(tokens.get_str("action.primary.disabled-text"), Some(&p.neutral[Tone::T50]));
    }

    #[test]
    fn modes_differ_on_canvas() {
        let p = primitives();
        let light = derive_tokens(&OklabSpace, &p, false);
        let dark = derive_tokens(&OklabSpace, &p, true);
        assert_ne!(light.get_str("bg.canvas"), dark.get_str("bg.canvas"));
    }

    #[test]
    fn on_colors_pick_the_readable_side() {
        let p = primitives();
        let tokens = derive_tokens(&OklabSpace, &p, false);
        let bg = &p.brand[Tone::T40];
        let on = tokens.get_str("text.on-brand").unwrap();
        let other = if on == "#ffffff" { "#000000" } else { "#ffffff" };
        assert!(wcag_contrast(&OklabSpace, on, bg) >= wcag_contrast(&OklabSpace, other, bg));
    }

    #[test]
    fn warning_on_color_uses_light_fill() {
        let p = primitives();
        let tokens = derive_tokens(&OklabSpace, &p, false);
        let expected = pick_contrast_color(&OklabSpace, &p.warning[Tone::T90], "#ffffff", "#000000");
        assert_eq!(tokens.get_str("text.on-warning"), Some(expected));
        assert_eq!(expected, "#000000");
    }

    #[test]
    fn fixed_values() {
        let p = primitives();
        let light = derive_tokens(&OklabSpace, &p, false);
        let dark = derive_tokens(&OklabSpace, &p, true);
        assert_eq!(light.get_str("bg.mask"), Some("rgba(0,0,0,0.4)"));
        assert_eq!(dark.get_str("bg.mask"), Some("rgba(0,0,0,0.6)"));
        assert_eq!(light.get_str("effect.shadow.sm"), Some("0 1px 2px 0 rgba(0, 0, 0, 0.05)"));
        assert_eq!(dark.get_str("effect.shadow.sm"), Some("0 1px 2px 0 rgba(0, 0, 0, 0.3)"));
    }

    #[test]
    fn derivation_is_pure() {
        let p = primitives();
        assert_eq!(derive_tokens(&OklabSpace, &p, true), derive_tokens(&OklabSpace, &p, true));
    }

    #[test]
    fn token_map_serializes_flat() {
        let tokens: TokenMap = [("brand.primary", "#ff0000"), ("x.custom", "#00ff00")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&tokens).unwrap();
        assert_eq!(json["brand.primary"], "#ff0000");
        assert_eq!(json["x.custom"], "#00ff00");
    }

    #[test]
    fn interaction_state_serializes_kebab_case() {
        let json = serde_json::to_value(InteractionState::default()).unwrap();
        assert_eq!(json["hover-opacity"], 0.08);
        assert_eq!(json["content-disabled-opacity"], 0.38);
    }
}
