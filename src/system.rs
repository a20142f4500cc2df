// SPDX-License-Identifier: MIT
//
// ColorSystem: the entry point that ties the library, the palette
// generator, the token deriver and the harmony generator together.
//
//   seed reference ──► ColorEntry ──► PrimitiveSet ──► TokenMap
//        (name or hex)                 (ten ramps)      (per mode)
//
// The system owns its color-space adapter and its options. It keeps no
// cache: every call recomputes from its arguments, so the same inputs
// always give the same output and results can be shared across threads.

use serde::Serialize;
use tcs_color::{ColorSpace, Oklch, OklabSpace};
use tcs_resource::{OverrideTable, ResourceMapper};
use tcs_theme::contrast::{ContrastRating, apca_contrast, wcag_contrast};
use tcs_theme::{
    HarmonySet, InteractionState, Palette, PrimitiveOverrides, PrimitiveSet, TokenMap, derive_tokens,
    generate_ramp_from_hex, harmonies,
};

use crate::config::SystemOptions;
use crate::library::{ColorEntry, ColorLibrary, LibraryError};

/// Everything generated for one seed in one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSystem {
    /// The resolved seed.
    pub meta: ColorEntry,
    pub primitives: PrimitiveSet,
    pub tokens: TokenMap,
    pub state: InteractionState,
    pub is_dark: bool,
}

/// Seed colors in, design tokens out.
#[derive(Debug, Clone)]
pub struct ColorSystem<S: ColorSpace = OklabSpace> {
    space: S,
    library: ColorLibrary,
    options: SystemOptions,
}

impl ColorSystem<OklabSpace> {
    /// The stock Oklab adapter with the built-in color library.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] if the embedded library is malformed.
    pub fn new() -> Result<Self, LibraryError> {
        let library = ColorLibrary::builtin(&OklabSpace)?;
        Ok(Self::with_library(OklabSpace, library))
    }
}

impl<S: ColorSpace> ColorSystem<S> {
    #[must_use]
    pub fn with_library(space: S, library: ColorLibrary) -> Self {
        Self {
            space,
            library,
            options: SystemOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SystemOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn space(&self) -> &S {
        &self.space
    }

    #[must_use]
    pub const fn library(&self) -> &ColorLibrary {
        &self.library
    }

    #[must_use]
    pub const fn options(&self) -> &SystemOptions {
        &self.options
    }

    /// Resolve a seed reference: a library name, or a literal `#hex`.
    /// Anything else falls back to the library's first entry.
    #[must_use]
    pub fn resolve_seed(&self, reference: &str) -> ColorEntry {
        if let Some(entry) = self.library.get(reference) {
            return entry.clone();
        }
        if reference.trim_start().starts_with('#') {
            match ColorEntry::from_hex(&self.space, reference) {
                Ok(entry) => return entry,
                Err(err) => tracing::warn!(seed = reference, %err, "unparsable seed hex"),
            }
        }
        self.library.get_or_first(reference).clone()
    }

    /// Generate with the system's own options.
    #[must_use]
    pub fn generate(&self, reference: &str, is_dark: bool) -> GeneratedSystem {
        self.generate_with(reference, is_dark, &self.options)
    }

    /// Generate primitives and tokens for one seed and mode.
    #[must_use]
    pub fn generate_with(&self, reference: &str, is_dark: bool, options: &SystemOptions) -> GeneratedSystem {
        let meta = self.resolve_seed(reference);
        tracing::debug!(
            seed = %meta.name,
            hex = %meta.hex,
            is_dark,
            gamut = %options.target_gamut,
            "generating color system"
        );

        let overrides = PrimitiveOverrides {
            secondary: self.override_seed("secondary", options.secondary.as_deref()),
            tertiary: self.override_seed("tertiary", options.tertiary.as_deref()),
        };
        let primitives = PrimitiveSet::generate(&self.space, meta.oklch, options.target_gamut, &overrides);
        let tokens = derive_tokens(&self.space, &primitives, is_dark);

        GeneratedSystem {
            meta,
            primitives,
            tokens,
            state: InteractionState::STANDARD,
            is_dark,
        }
    }

    fn override_seed(&self, ramp: &'static str, hex: Option<&str>) -> Option<Oklch> {
        let hex = hex?;
        match self.space.parse(hex) {
            Ok(seed) => Some(seed),
            Err(err) => {
                tracing::warn!(ramp, seed = hex, %err, "ignoring unparsable override");
                None
            }
        }
    }

    /// Semantic tokens for an existing primitive set.
    #[must_use]
    pub fn tokens(&self, primitives: &PrimitiveSet, is_dark: bool) -> TokenMap {
        derive_tokens(&self.space, primitives, is_dark)
    }

    /// A single tonal palette in the configured gamut.
    #[must_use]
    pub fn tonal_palette(&self, seed_hex: &str) -> Palette {
        generate_ramp_from_hex(&self.space, seed_hex, self.options.target_gamut)
    }

    /// Harmonies of an arbitrary seed.
    #[must_use]
    pub fn harmonies(&self, seed: Oklch) -> HarmonySet {
        harmonies(&self.space, seed, self.options.target_gamut)
    }

    /// Harmonies of a library color. Unknown names give an all-black set.
    #[must_use]
    pub fn harmonies_for(&self, name: &str) -> HarmonySet {
        match self.library.get(name) {
            Some(entry) => self.harmonies(entry.oklch),
            None => {
                tracing::warn!(name, "unknown color name for harmonies");
                HarmonySet::black()
            }
        }
    }

    /// WCAG contrast ratio of two serialized colors (0.0 if either fails to
    /// parse).
    #[must_use]
    pub fn contrast(&self, a: &str, b: &str) -> f64 {
        wcag_contrast(&self.space, a, b)
    }

    /// APCA Lc of `text` over `background`.
    #[must_use]
    pub fn apca(&self, text: &str, background: &str) -> f64 {
        apca_contrast(&self.space, text, background)
    }

    /// APCA Lc together with its readability band.
    #[must_use]
    pub fn apca_rating(&self, text: &str, background: &str) -> (f64, ContrastRating) {
        let lc = self.apca(text, background);
        (lc, ContrastRating::from_lc(lc))
    }

    /// A resource mapper over this seed's light and dark tokens.
    #[must_use]
    pub fn resource_mapper(&self, reference: &str, overrides: OverrideTable) -> ResourceMapper {
        let light = self.generate(reference, false).tokens;
        let dark = self.generate(reference, true).tokens;
        ResourceMapper::new(light, dark, overrides)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
