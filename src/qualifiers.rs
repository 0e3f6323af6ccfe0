//! Qualifier maps attached to a Package URL.
//!
//! Keys are kept sorted so that iteration order, and therefore the
//! canonical serialization, is deterministic.

use crate::error::{Error, Result};
use std::collections::btree_map::{self, BTreeMap};

/// Ordered key/value qualifiers (e.g. `arch=x86_64`, `classifier=sources`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    entries: BTreeMap<String, String>,
}

impl Qualifiers {
    /// Create an empty qualifier map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a qualifier, returning the previous value.
    ///
    /// Keys are case-insensitive and stored lowercase, matching how they
    /// are rendered.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let mut key = key.into();
        key.make_ascii_lowercase();
        self.entries.insert(key, value.into())
    }

    /// Remove a qualifier, ignoring case. Absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(&key.to_ascii_lowercase())
    }

    /// Return a copy with `key` set to `value`, leaving `self` untouched.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.insert(key, value);
        next
    }

    /// Return a copy without `key`, leaving `self` untouched.
    pub fn without(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.remove(key);
        next
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate qualifiers in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Validate keys for use in a Package URL, dropping entries with empty
    /// values.
    pub(crate) fn normalized(self) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (key, value) in self.entries {
            validate_key(&key)?;
            if value.is_empty() {
                continue;
            }
            entries.insert(key, value);
        }
        Ok(Qualifiers { entries })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Qualifiers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut qualifiers = Qualifiers::new();
        for (key, value) in iter {
            qualifiers.insert(key, value);
        }
        qualifiers
    }
}

impl<'a> IntoIterator for &'a Qualifiers {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Check a qualifier key: ASCII letters, digits, `.`, `-` and `_`, not
/// starting with a digit.
pub fn validate_key(key: &str) -> Result<()> {
    let Some(first) = key.chars().next() else {
        return Err(Error::construction("qualifier key", "key must not be empty"));
    };
    if first.is_ascii_digit() {
        return Err(Error::construction(
            "qualifier key",
            format!("'{}' must not start with a digit", key),
        ));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
    {
        return Err(Error::construction(
            "qualifier key",
            format!("'{}' contains invalid character '{}'", key, bad),
        ));
    }
    Ok(())
}
