// SPDX-License-Identifier: MIT
//
// Generation options. Every field has a default, so `{}` is a valid
// configuration and callers only spell out what they change.

use serde::{Deserialize, Serialize};
use tcs_color::Gamut;

/// Options for [`crate::ColorSystem::generate`].
///
/// ```
/// use tcs::SystemOptions;
/// use tcs_color::Gamut;
///
/// let options: SystemOptions =
///     serde_json::from_str(r##"{"target-gamut": "p3", "secondary": "#1685a9"}"##).unwrap();
/// assert_eq!(options.target_gamut, Gamut::DisplayP3);
/// assert_eq!(options.tertiary, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemOptions {
    /// Gamut palettes are fitted into and serialized for.
    pub target_gamut: Gamut,
    /// Seed for the secondary ramp instead of the hue + 60° rotation.
    pub secondary: Option<String>,
    /// Seed for the tertiary ramp instead of the hue + 120° rotation.
    pub tertiary: Option<String>,
}

impl SystemOptions {
    #[must_use]
    pub fn with_gamut(mut self, gamut: Gamut) -> Self {
        self.target_gamut = gamut;
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, hex: impl Into<String>) -> Self {
        self.secondary = Some(hex.into());
        self
    }

    #[must_use]
    pub fn with_tertiary(mut self, hex: impl Into<String>) -> Self {
        self.tertiary = Some(hex.into());
        self
    }
}
