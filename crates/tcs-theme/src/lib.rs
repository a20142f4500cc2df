//! # tcs-theme: design tokens from a single seed color
//!
//! Turns one OKLCH seed into ten tonal ramps, resolves semantic tokens for
//! light and dark mode against them, and measures contrast along the way.
//!
//! # Architecture
//!
//! ```text
//! seed (Oklch) + target gamut + overrides
//!     │
//!     ▼
//! palette.rs:   ten ramps × fourteen tones, each gamut-fitted
//!     │
//!     ▼
//! tokens.rs:    semantic roles per mode (on-colors via contrast.rs)
//!     │
//!     ▼
//! TokenMap + InteractionState
//!
//! harmony.rs:   hue rotations of the seed, independent of the ramps
//! ```
//!
//! # Color Space
//!
//! All math goes through a [`tcs_color::ColorSpace`] value passed in by the
//! caller. Nothing here holds global state, so every function is a pure
//! mapping from its arguments.

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod contrast;
pub mod harmony;
pub mod palette;
pub mod tokens;

pub use contrast::{ContrastRating, apca_contrast, pick_contrast_color, wcag_contrast};
pub use harmony::{HarmonySet, harmonies};
pub use palette::{Palette, PrimitiveOverrides, PrimitiveSet, Ramp, Tone, generate_ramp, generate_ramp_from_hex};
pub use tokens::{InteractionState, TokenKey, TokenMap, derive_tokens};
