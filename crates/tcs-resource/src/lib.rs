//! # tcs-resource: HarmonyOS resource mapping
//!
//! HarmonyOS themes are a flat list of `ohos_id_*` color resources. This
//! crate fills them from a pair of tcs token maps (light and dark):
//!
//! 1. Keys that are not plain colors (shadows, blur styles, dimensions)
//!    are skipped.
//! 2. An exact-match [`OverrideTable`] is consulted first.
//! 3. Otherwise an ordered list of name [`Rule`]s picks a token, with
//!    `text.primary` as the last resort.
//! 4. `_transparent`, `_alpha` and `_disable` keys get their alpha
//!    replaced.

pub mod error;
pub mod mapper;
pub mod overrides;
pub mod rules;

pub use error::OverrideTableError;
pub use mapper::{Mode, ResourceDocument, ResourceMapper};
pub use overrides::OverrideTable;
pub use rules::{Rule, default_rules};
