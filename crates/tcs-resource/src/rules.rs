//! Name heuristics for resource keys without an override.
//!
//! Rules are tried in order and the first match wins, so more specific
//! fragments (`color_primary`, `sub_background`) sit ahead of the general
//! ones (`primary`, `background`). A key no rule claims falls back to
//! `text.primary`, which is always visible.

use tcs_theme::Ramp;
use tcs_theme::tokens::{
    ActionRole, BgRole, BorderRole, BrandRole, PrimaryActionRole, Status, StatusRole, TextRole, TokenKey,
};

/// One `(predicate, resolver)` pair.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short label used in logs and tests.
    pub name: &'static str,
    predicate: fn(&str) -> bool,
    resolver: fn(&str) -> TokenKey,
}

impl Rule {
    #[must_use]
    pub const fn new(name: &'static str, predicate: fn(&str) -> bool, resolver: fn(&str) -> TokenKey) -> Self {
        Self {
            name,
            predicate,
            resolver,
        }
    }

    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        (self.predicate)(key)
    }

    #[must_use]
    pub fn resolve(&self, key: &str) -> TokenKey {
        (self.resolver)(key)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Token for keys no rule matches.
#[must_use]
pub const fn fallback() -> TokenKey {
    TokenKey::Text(TextRole::Primary)
}

/// First rule in `rules` that claims `key`.
#[must_use]
pub fn first_match<'a>(rules: &'a [Rule], key: &str) -> Option<&'a Rule> {
    rules.iter().find(|rule| rule.matches(key))
}

fn any(key: &str, fragments: &[&str]) -> bool {
    fragments.iter().any(|f| key.contains(f))
}

const fn brand_primary() -> TokenKey {
    TokenKey::Brand(BrandRole::Primary)
}

const fn on_brand() -> TokenKey {
    TokenKey::Text(TextRole::On(Ramp::Brand))
}

const fn action(ramp: Ramp) -> TokenKey {
    TokenKey::Action(ramp, ActionRole::Base)
}

const fn status_text(status: Status) -> TokenKey {
    TokenKey::Status(status, StatusRole::Text)
}

const fn canvas() -> TokenKey {
    TokenKey::Bg(BgRole::Canvas)
}

const fn container() -> TokenKey {
    TokenKey::Bg(BgRole::Container)
}

/// The stock rule chain, in evaluation order.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        // ── System colors ───────────────────────────────────────────
        Rule::new("color_primary", |k| k.contains("color_primary"), |_| brand_primary()),
        Rule::new("color_secondary", |k| k.contains("color_secondary"), |_| action(Ramp::Secondary)),
        Rule::new("color_tertiary", |k| k.contains("color_tertiary"), |_| action(Ramp::Tertiary)),
        Rule::new("color_fourth", |k| k.contains("color_fourth"), |_| action(Ramp::Fourth)),
        // ── Status ──────────────────────────────────────────────────
        Rule::new("warning", |k| k.contains("warning"), |_| status_text(Status::Warning)),
        Rule::new("error", |k| any(k, &["alert", "error"]), |_| status_text(Status::Error)),
        Rule::new(
            "success",
            |k| any(k, &["handup", "success", "connected"]),
            |_| status_text(Status::Success),
        ),
        // ── Emphasis and contrary ───────────────────────────────────
        Rule::new(
            "emphasize",
            |k| k.contains("emphasize") && !k.contains("sub_emphasize"),
            |k| if k.contains("contrary") { on_brand() } else { brand_primary() },
        ),
        Rule::new(
            "contrary",
            |k| k.contains("contrary"),
            |k| if k.contains("primary") { on_brand() } else { canvas() },
        ),
        Rule::new("foreground", |k| k.contains("foreground"), |_| TokenKey::Text(TextRole::Primary)),
        // ── Surfaces ────────────────────────────────────────────────
        Rule::new(
            "bar_bg",
            |k| any(k, &["text_field_bg", "titlebar_bg", "navigationbar_bg", "tab_bg"]),
            |_| canvas(),
        ),
        Rule::new(
            "container_bg",
            |k| any(k, &["card_bg", "panel_bg", "dialog_bg", "toast_bg", "toast_container"]),
            |_| container(),
        ),
        Rule::new("sub_background", |k| k.contains("sub_background"), |_| container()),
        Rule::new("background", |k| k.contains("background"), |_| canvas()),
        // ── Text and icons ──────────────────────────────────────────
        Rule::new("text_primary", |k| k.contains("text_primary"), |_| TokenKey::Text(TextRole::Primary)),
        Rule::new(
            "text_secondary",
            |k| k.contains("text_secondary"),
            |_| TokenKey::Text(TextRole::Secondary),
        ),
        Rule::new(
            "text_hint",
            |k| any(k, &["text_tertiary", "text_hint"]),
            |_| TokenKey::Text(TextRole::Placeholder),
        ),
        Rule::new("icon_primary", |k| k.contains("icon_primary"), |_| TokenKey::Text(TextRole::Primary)),
        Rule::new(
            "icon_secondary",
            |k| k.contains("icon_secondary"),
            |_| TokenKey::Text(TextRole::Secondary),
        ),
        // ── Controls ────────────────────────────────────────────────
        Rule::new(
            "control",
            |k| {
                k.contains("button_normal")
                    || (k.contains("switch_bg") && !k.contains("off"))
                    || k.contains("checkbox")
                    || k.contains("floating_button")
            },
            |_| brand_primary(),
        ),
        Rule::new(
            "pressed",
            |k| any(k, &["pressed", "click_effect"]),
            |_| TokenKey::PrimaryAction(PrimaryActionRole::Pressed),
        ),
        Rule::new("hover", |k| k.contains("hover"), |_| TokenKey::Brand(BrandRole::PrimaryHover)),
        // ── Structure ───────────────────────────────────────────────
        Rule::new(
            "divider",
            |k| any(k, &["separator", "divider"]),
            |_| TokenKey::Border(BorderRole::Divider),
        ),
        Rule::new("mask", |k| k.contains("mask"), |_| TokenKey::Bg(BgRole::Mask)),
        // ── Generic roles ───────────────────────────────────────────
        Rule::new("primary", |k| k.contains("primary"), |_| brand_primary()),
        Rule::new("secondary", |k| k.contains("secondary"), |_| action(Ramp::Secondary)),
        Rule::new("tertiary", |k| k.contains("tertiary"), |_| action(Ramp::Tertiary)),
    ]
}
