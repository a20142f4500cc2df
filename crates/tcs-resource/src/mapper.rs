//! Resource key → color resolution for one light/dark token pair.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tcs_color::css::apply_alpha;
use tcs_theme::{TokenKey, TokenMap};

use crate::overrides::OverrideTable;
use crate::rules::{Rule, default_rules, fallback, first_match};

/// Alpha for `_transparent` and `_alpha` keys.
pub const TRANSPARENT_ALPHA: f64 = 0.6;
/// Alpha for `_disable` keys.
pub const DISABLED_ALPHA: f64 = 0.4;
/// Value for a token the map does not contain.
pub const MISSING_TOKEN: &str = "#000000";

/// Which token map a batch resolves against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Light mode. HarmonyOS calls its default resource set `base`.
    #[default]
    Base,
    Dark,
}

impl Mode {
    #[must_use]
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Base }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `key` names something other than a plain color (shadow, blur
/// effect, dimension).
#[must_use]
pub fn should_skip(key: &str) -> bool {
    key.contains("_shadow_")
        || (key.contains("blur_style") && !key.ends_with("_color"))
        || key.contains("corner_radius")
        || key.contains("padding")
        || key.contains("width")
}

/// Alpha a key's name asks for, if any. `_disable` wins over `_transparent`.
#[must_use]
pub fn alpha_for(key: &str) -> Option<f64> {
    if key.contains("_disable") {
        Some(DISABLED_ALPHA)
    } else if key.contains("_transparent") || key.contains("_alpha") {
        Some(TRANSPARENT_ALPHA)
    } else {
        None
    }
}

/// One `{name, value}` entry of a HarmonyOS `color.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorResource {
    pub name: String,
    pub value: String,
}

/// A HarmonyOS `color.json` document: `{"color": [{name, value}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceDocument {
    pub color: Vec<ColorResource>,
}

impl From<BTreeMap<String, String>> for ResourceDocument {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self {
            color: map
                .into_iter()
                .map(|(name, value)| ColorResource { name, value })
                .collect(),
        }
    }
}

/// Maps external resource keys onto a pair of token maps.
#[derive(Debug, Clone)]
pub struct ResourceMapper {
    light: TokenMap,
    dark: TokenMap,
    overrides: OverrideTable,
    rules: Vec<Rule>,
}

impl ResourceMapper {
    /// A mapper using the stock rule chain.
    #[must_use]
    pub fn new(light: TokenMap, dark: TokenMap, overrides: OverrideTable) -> Self {
        Self {
            light,
            dark,
            overrides,
            rules: default_rules(),
        }
    }

    /// Replace the rule chain.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub const fn tokens(&self, mode: Mode) -> &TokenMap {
        match mode {
            Mode::Base => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    /// The token a key resolves to, or `None` for skipped keys.
    #[must_use]
    pub fn resolve_token(&self, key: &str) -> Option<TokenKey> {
        if should_skip(key) {
            tracing::trace!(key, "skipping non-color resource");
            return None;
        }
        if let Some(token) = self.overrides.get(key) {
            tracing::trace!(key, %token, "resource override");
            return Some(token.clone());
        }
        let token = match first_match(&self.rules, key) {
            Some(rule) => {
                let token = rule.resolve(key);
                tracing::trace!(key, rule = rule.name, %token, "resource rule");
                token
            }
            None => {
                tracing::trace!(key, "no resource rule, using fallback");
                fallback()
            }
        };
        Some(token)
    }

    /// The color value for one key, or `None` for skipped keys.
    #[must_use]
    pub fn resolve(&self, key: &str, mode: Mode) -> Option<String> {
        let token = self.resolve_token(key)?;
        let color = self
            .tokens(mode)
            .get(&token)
            .filter(|value| !value.is_empty())
            .unwrap_or(MISSING_TOKEN);

        Some(match alpha_for(key) {
            Some(alpha) => apply_alpha(color, alpha),
            None => color.to_string(),
        })
    }

    /// Resolve a batch of keys. Skipped keys are absent from the result.
    pub fn map_resources<I, K>(&self, keys: I, mode: Mode) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let resolved: BTreeMap<String, String> = keys
            .into_iter()
            .filter_map(|key| {
                let key = key.as_ref();
                self.resolve(key, mode).map(|value| (key.to_string(), value))
            })
            .collect();
        tracing::debug!(%mode, resources = resolved.len(), "mapped resource keys");
        resolved
    }

    /// Resolve a batch of keys to token names instead of colors.
    ///
    /// Useful for regenerating an override table from the current rules.
    pub fn map_token_names<I, K>(&self, keys: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| {
                let key = key.as_ref();
                self.resolve_token(key).map(|token| (key.to_string(), token.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mock(suffix: &str) -> TokenMap {
        [
            ("brand.primary", format!("#brand-{suffix}")),
            ("text.primary", format!("#text-{suffix}")),
            ("bg.canvas", format!("#bg-{suffix}")),
            ("action.secondary", format!("#secondary-{suffix}")),
            ("warning.text", format!("#warning-{suffix}")),
        ]
        .into_iter()
        .collect()
    }

    fn mapper() -> ResourceMapper {
        ResourceMapper::new(mock("light"), mock("dark"), OverrideTable::builtin().unwrap())
    }

    fn one(mapper: &ResourceMapper, key: &str, mode: Mode) -> Option<String> {
        mapper.map_resources([key], mode).remove(key)
    }

    #[test]
    fn override_table_key() {
        assert_eq!(one(&mapper(), "ohos_id_color_primary", Mode::Base).as_deref(), Some("#brand-light"));
    }

    #[test]
    fn rule_fallback_key() {
        let m = ResourceMapper::new(mock("light"), mock("dark"), OverrideTable::empty());
        assert_eq!(one(&m, "ohos_id_color_secondary", Mode::Base).as_deref(), Some("#secondary-light"));
    }

    #[test]
    fn override_beats_rules() {
        let table = OverrideTable::from_json(r#"{"ohos_id_color_warning": "bg.canvas"}"#).unwrap();
        let m = ResourceMapper::new(mock("light"), mock("dark"), table);
        assert_eq!(one(&m, "ohos_id_color_warning", Mode::Base).as_deref(), Some("#bg-light"));
        assert_eq!(one(&mapper(), "ohos_id_color_warning", Mode::Base).as_deref(), Some("#warning-light"));
    }

    #[test]
    fn dark_mode_uses_dark_tokens() {
        assert_eq!(one(&mapper(), "ohos_id_color_primary", Mode::Dark).as_deref(), Some("#brand-dark"));
    }

    #[test]
    fn transparent_suffix_applies_alpha() {
        let tokens: TokenMap = [("brand.primary", "#ff0000")].into_iter().collect();
        let m = ResourceMapper::new(tokens.clone(), tokens, OverrideTable::empty());
        assert_eq!(one(&m, "x_primary_transparent", Mode::Base).as_deref(), Some("#ff000099"));
        assert_eq!(
            one(&m, "ohos_id_color_primary_transparent", Mode::Base).as_deref(),
            Some("#ff000099")
        );
    }

    #[test]
    fn disable_wins_over_transparent() {
        let tokens: TokenMap = [("brand.primary", "#ff0000")].into_iter().collect();
        let m = ResourceMapper::new(tokens.clone(), tokens, OverrideTable::empty());
        assert_eq!(one(&m, "x_primary_transparent_disable", Mode::Base).as_deref(), Some("#ff000066"));
    }

    #[test]
    fn p3_values_keep_functional_form() {
        let tokens: TokenMap = [("brand.primary", "color(display-p3 1 0 0)")].into_iter().collect();
        let m = ResourceMapper::new(tokens.clone(), tokens, OverrideTable::empty());
        assert_eq!(
            one(&m, "ohos_id_color_primary_alpha", Mode::Dark).as_deref(),
            Some("color(display-p3 1 0 0 / 0.6)")
        );
    }

    #[test]
    fn missing_token_is_black() {
        let m = ResourceMapper::new(TokenMap::new(), TokenMap::new(), OverrideTable::empty());
        assert_eq!(one(&m, "ohos_id_color_alert", Mode::Base).as_deref(), Some("#000000"));
    }

    #[test]
    fn unparsable_values_pass_through_alpha() {
        let m = mapper();
        assert_eq!(one(&m, "x_primary_transparent", Mode::Base).as_deref(), Some("#brand-light"));
    }

    #[test]
    fn non_color_keys_are_skipped() {
        let keys = [
            "ohos_id_shadow_sm",
            "ohos_id_card_shadow_color",
            "ohos_id_blur_style_thin",
            "ohos_id_corner_radius_card",
            "ohos_id_padding_start",
            "ohos_id_border_width",
        ];
        let m = mapper();
        for key in keys {
            assert!(should_skip(key), "{key}");
            assert_eq!(one(&m, key, Mode::Base), None, "{key}");
        }
        assert_eq!(one(&m, "ohos_id_blur_style_thin_color", Mode::Base).as_deref(), Some("#text-light"));
    }

    #[test]
    fn batch_keeps_every_color_key() {
        let m = mapper();
        let keys = ["ohos_id_color_primary", "ohos_id_padding_start", "ohos_id_color_background"];
        let out = m.map_resources(keys, Mode::Base);
        assert_eq!(out.len(), 2);
        assert_eq!(out["ohos_id_color_background"], "#bg-light");
    }

    #[test]
    fn token_names() {
        let m = ResourceMapper::new(TokenMap::new(), TokenMap::new(), OverrideTable::empty());
        let names = m.map_token_names(["ohos_id_color_fourth", "ohos_id_text_hint", "ohos_id_shadow_lg"]);
        assert_eq!(names.len(), 2);
        assert_eq!(names["ohos_id_color_fourth"], "action.fourth");
        assert_eq!(names["ohos_id_text_hint"], "text.placeholder");
    }

    #[test]
    fn resource_document_shape() {
        let m = mapper();
        let doc = ResourceDocument::from(m.map_resources(["ohos_id_color_primary"], Mode::Base));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["color"][0]["name"], "ohos_id_color_primary");
        assert_eq!(json["color"][0]["value"], "#brand-light");
    }

    #[test]
    fn mode_names() {
        assert_eq!(Mode::from_dark(true), Mode::Dark);
        assert_eq!(Mode::Base.to_string(), "base");
        assert_eq!(serde_json::to_value(Mode::Dark).unwrap(), "dark");
    }
}
