//! Error types for loading mapper data.

use thiserror::Error;

/// Failure to load a resource override table.
#[derive(Debug, Error)]
pub enum OverrideTableError {
    /// The input was not valid JSON.
    #[error("override table is not valid JSON")]
    Json {
        /// Parser error detail.
        #[source]
        source: serde_json::Error,
    },
    /// The top-level value was not a JSON object.
    #[error("override table must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },
    /// A resource key mapped to something other than a token key string.
    #[error("override for `{key}` must be a token key string")]
    InvalidTarget {
        /// Resource key with the bad target.
        key: String,
    },
}
