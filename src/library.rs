// SPDX-License-Identifier: MIT
//
// The color library: named seed colors, each with its OKLCH coordinates
// computed once at load time.
//
// The library is an ordered JSON array of `{name, hex, pinyin}` rows. Order
// matters: the first entry is the fallback for names the library does not
// know. A malformed file is a load-time error; lookups never fail.

use serde::{Deserialize, Serialize};
use tcs_color::{ColorSpace, CssColor, Oklch, ParseColorError};
use thiserror::Error;

const BUILTIN: &str = include_str!("../data/colors.json");

/// Failure to load a color library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The input was not a JSON array of color rows.
    #[error("color library is not valid JSON")]
    Json {
        /// Parser error detail.
        #[source]
        source: serde_json::Error,
    },
    /// The library had no entries.
    #[error("color library is empty")]
    Empty,
    /// An entry's hex value did not parse.
    #[error("color `{name}` has an invalid hex value")]
    InvalidHex {
        /// Name of the offending entry.
        name: String,
        /// Parse failure detail.
        #[source]
        source: ParseColorError,
    },
}

#[derive(Deserialize)]
struct RawEntry {
    name: String,
    hex: String,
    #[serde(default)]
    pinyin: String,
}

/// One named seed color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorEntry {
    pub name: String,
    pub hex: String,
    pub pinyin: String,
    pub oklch: Oklch,
}

impl ColorEntry {
    /// Build an entry, computing its OKLCH coordinates from `hex`.
    ///
    /// `#rgb` and `#rrggbb` in either case are accepted; the stored hex is
    /// always lowercase `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] if `hex` is not an opaque `#`-prefixed hex
    /// color. Forms carrying alpha are rejected since seeds are opaque.
    pub fn new<S: ColorSpace + ?Sized>(
        space: &S,
        name: impl Into<String>,
        hex: impl Into<String>,
        pinyin: impl Into<String>,
    ) -> Result<Self, ParseColorError> {
        let raw = hex.into();
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').map_or(0, str::len);
        if !matches!(digits, 3 | 6) {
            return Err(ParseColorError::InvalidHex(raw));
        }
        let css: CssColor = trimmed.parse()?;
        let hex = css.rgb.to_hex();
        let oklch = space.parse(&hex)?;
        Ok(Self {
            name: name.into(),
            hex,
            pinyin: pinyin.into(),
            oklch,
        })
    }

    /// An unnamed entry for a literal hex seed. The normalized hex doubles
    /// as the name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] if `hex` does not parse.
    pub fn from_hex<S: ColorSpace + ?Sized>(space: &S, hex: &str) -> Result<Self, ParseColorError> {
        let mut entry = Self::new(space, "", hex, "")?;
        entry.name.clone_from(&entry.hex);
        Ok(entry)
    }
}

/// An ordered, non-empty list of named seed colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLibrary {
    entries: Vec<ColorEntry>,
}

impl ColorLibrary {
    /// The library shipped with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] if the embedded data is malformed.
    pub fn builtin<S: ColorSpace + ?Sized>(space: &S) -> Result<Self, LibraryError> {
        Self::from_json(space, BUILTIN)
    }

    /// Parse a library from a JSON array of `{name, hex, pinyin}` rows.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] for invalid JSON, an empty array, or any
    /// row whose hex does not parse.
    pub fn from_json<S: ColorSpace + ?Sized>(space: &S, json: &str) -> Result<Self, LibraryError> {
        let rows: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|source| LibraryError::Json { source })?;
        let entries = rows
            .into_iter()
            .map(|row| {
                ColorEntry::new(space, row.name.clone(), row.hex, row.pinyin)
                    .map_err(|source| LibraryError::InvalidHex { name: row.name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Wrap already-built entries.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Empty`] for an empty list.
    pub fn from_entries(entries: Vec<ColorEntry>) -> Result<Self, LibraryError> {
        if entries.is_empty() {
            return Err(LibraryError::Empty);
        }
        tracing::debug!(entries = entries.len(), "loaded color library");
        Ok(Self { entries })
    }

    /// Exact lookup by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// The fallback entry.
    #[must_use]
    pub fn first(&self) -> &ColorEntry {
        // Non-empty by construction.
        &self.entries[0]
    }

    /// Lookup by name, falling back to [`ColorLibrary::first`].
    #[must_use]
    pub fn get_or_first(&self, name: &str) -> &ColorEntry {
        self.get(name).unwrap_or_else(|| {
            tracing::warn!(name, fallback = %self.first().name, "unknown color name");
            self.first()
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
