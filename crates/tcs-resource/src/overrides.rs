//! Exact-match overrides from resource key to token key.
//!
//! The table is a flat JSON object, `{"ohos_id_color_primary": "brand.primary"}`.
//! It is consulted before any heuristic rule, so it pins keys whose names
//! would otherwise be guessed wrong.

use std::collections::BTreeMap;

use serde_json::Value;
use tcs_theme::TokenKey;

use crate::error::OverrideTableError;

const BUILTIN: &str = include_str!("../data/resource-overrides.json");

/// Resource key → token key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, TokenKey>,
}

impl OverrideTable {
    /// An empty table; every key falls through to the rules.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideTableError`] if the embedded data is malformed.
    pub fn builtin() -> Result<Self, OverrideTableError> {
        Self::from_json(BUILTIN)
    }

    /// Parse a table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideTableError`] when the text is not JSON, the top
    /// level is not an object, or any value is not a string.
    pub fn from_json(json: &str) -> Result<Self, OverrideTableError> {
        let value: Value =
            serde_json::from_str(json).map_err(|source| OverrideTableError::Json { source })?;
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(OverrideTableError::NotAnObject {
                    found: json_type(&other),
                });
            }
        };

        let mut entries = BTreeMap::new();
        for (key, target) in object {
            let Value::String(target) = target else {
                return Err(OverrideTableError::InvalidTarget { key });
            };
            let token = TokenKey::parse(&target);
            if token.is_extension() {
                tracing::debug!(resource = %key, token = %token, "override targets a non-standard token");
            }
            entries.insert(key, token);
        }

        tracing::debug!(entries = entries.len(), "loaded resource override table");
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TokenKey> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_loads() {
        let table = OverrideTable::builtin().unwrap();
        assert!(!table.is_empty());
        assert_eq!(
            table.get("ohos_id_color_primary"),
            Some(&TokenKey::parse("brand.primary"))
        );
        assert_eq!(
            table.get("ohos_id_color_warning"),
            Some(&TokenKey::parse("warning.text"))
        );
    }

    #[test]
    fn builtin_targets_are_known_tokens() {
        let table = OverrideTable::builtin().unwrap();
        for (key, token) in &table.entries {
            assert!(!token.is_extension(), "{key} -> {token}");
        }
    }

    #[test]
    fn custom_table() {
        let table = OverrideTable::from_json(r#"{"a_key": "bg.canvas", "b_key": "my.token"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("b_key"), Some(&TokenKey::Extension("my.token".to_string())));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            OverrideTable::from_json("{not json"),
            Err(OverrideTableError::Json { .. })
        ));
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            OverrideTable::from_json(r#"["brand.primary"]"#),
            Err(OverrideTableError::NotAnObject { found: "array" })
        ));
    }

    #[test]
    fn rejects_non_string_target() {
        let err = OverrideTable::from_json(r#"{"ohos_id_color_primary": 42}"#).unwrap_err();
        assert_eq!(err.to_string(), "override for `ohos_id_color_primary` must be a token key string");
    }

    #[test]
    fn empty_table() {
        assert!(OverrideTable::empty().is_empty());
    }
}
