// SPDX-License-Identifier: MIT
//
// tcs: a traditional color system for UI design tokens.
//
// Pick a seed (a named traditional color or any hex value) and tcs derives
// a complete, contrast-checked token set for light and dark mode:
//
//   tcs-color    → OKLCH math, sRGB / Display P3, gamut fitting
//   tcs-theme    → tonal palettes, semantic tokens, contrast, harmonies
//   tcs-resource → HarmonyOS resource keys mapped onto tokens
//
// This crate adds the color library and the `ColorSystem` facade that
// wires the layers together:
//
//   let system = ColorSystem::new()?;
//   let light = system.generate("朱红", false);
//   let dark = system.generate("朱红", true);

pub mod config;
pub mod library;
pub mod system;

pub use config::SystemOptions;
pub use library::{ColorEntry, ColorLibrary, LibraryError};
pub use system::{ColorSystem, GeneratedSystem};

pub use tcs_color as color;
pub use tcs_resource as resource;
pub use tcs_theme as theme;
