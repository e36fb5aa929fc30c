//! Component properties
//!
//! Props are an open map keyed by the camelCase names the property panel
//! uses. The core only interprets a handful of them; everything else is
//! carried through untouched for the render and form collaborators.
//! Keys keep the order they were loaded or first set in, so an exported
//! template diffs cleanly against the one it came from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property map of a single component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

/// Partial property update produced by an edit form.
///
/// A `null` value clears the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropsPatch(Map<String, Value>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow merge: keys in `patch` overwrite, `null` removes, other keys stay.
    pub fn merge(&mut self, patch: PropsPatch) {
        for (key, value) in patch.0 {
            if value.is_null() {
                self.0.shift_remove(&key);
            } else {
                self.0.insert(key, value);
            }
        }
    }

    /// Copy of these props with `patch` merged in
    pub fn merged(&self, patch: &PropsPatch) -> Props {
        let mut next = self.clone();
        next.merge(patch.clone());
        next
    }

    /// `enabled` flag; absent means enabled
    pub fn enabled(&self) -> Option<bool> {
        self.get_bool("enabled")
    }

    /// Custom layer name
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn url_bar_sticky(&self) -> bool {
        self.get_bool("urlBarSticky").unwrap_or(false)
    }

    pub fn header_bar_sticky(&self) -> bool {
        self.get_bool("headerBarSticky").unwrap_or(false)
    }

    /// Column distribution of a flex container, e.g. `"1:2:1"`
    pub fn column_distribution(&self) -> Option<&str> {
        self.get_str("columnDistribution")
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Props(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl PropsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Clear `key` when merged
    pub fn clear(self, key: impl Into<String>) -> Self {
        self.with(key, Value::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for PropsPatch {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        PropsPatch(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
