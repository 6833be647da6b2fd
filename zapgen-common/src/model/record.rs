// zapgen-common/src/model/record.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Helper to coerce string-or-list into Vec<String>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s],
            StringOrList::Many(v) => v,
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.clone().into_vec()
    }
}

impl From<StringOrList> for Vec<String> {
    fn from(item: StringOrList) -> Self {
        item.into_vec()
    }
}

/// The same scalar/list normalization for untyped nodes inside artifact
/// trees. Non-string entries are skipped, never an error.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// One package-metadata record as served by the Homebrew cask JSON API.
/// Also accepts the local catalog's app.json shape, which carries at least
/// `name`. Every field is optional; the artifacts sequence stays untyped
/// because its elements are polymorphic (bare strings, maps, nested
/// string-or-list values).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CaskRecord {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub name: Option<StringOrList>,

    #[serde(default)]
    pub artifacts: Option<Vec<Value>>,

    #[serde(default)]
    pub pkgutil: Option<StringOrList>,
    #[serde(default)]
    pub launchctl: Option<StringOrList>,
    #[serde(default)]
    pub quit: Option<StringOrList>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl CaskRecord {
    /// Get a friendly name for display purposes
    pub fn display_name(&self) -> String {
        self.name
            .as_ref()
            .and_then(|names| names.to_vec().into_iter().next())
            .or_else(|| self.token.clone())
            .unwrap_or_default()
    }
}
