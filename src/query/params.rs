//! Raw query-parameter map.
//!
//! The transport layer hands the builder a flat list of percent-decoded
//! `key=value` pairs. Range-style operators use the one-level nested
//! syntax `field[op]=value`, which [`RawParams::from_pairs`] folds into a
//! nested entry. Once built, the map is only read and copied, never
//! mutated by the query pipeline.

use std::collections::BTreeMap;

/// A single parameter value: either a plain string or a one-level nested
/// map of operator token to string (from `field[op]=value` syntax).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Nested(BTreeMap<String, String>),
}

/// Mapping from parameter name to [`ParamValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: BTreeMap<String, ParamValue>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from flat `key=value` pairs.
    ///
    /// `field[op]=value` pairs are folded into a nested entry under
    /// `field`. For duplicate keys the last occurrence wins; a nested pair
    /// replaces an earlier plain value for the same field and vice versa.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            match split_nested_key(&key) {
                Some((field, op)) => params.set_nested(field, op, &value),
                None => params.set(&key, &value),
            }
        }
        params
    }

    /// Set a plain value, replacing any existing entry for `key`.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), ParamValue::Single(value.to_string()));
    }

    /// Set one operator of a nested entry, merging with existing operators
    /// for the same field. A previous plain value for the field is replaced.
    pub fn set_nested(&mut self, field: &str, op: &str, value: &str) {
        let entry = self
            .entries
            .entry(field.to_string())
            .or_insert_with(|| ParamValue::Nested(BTreeMap::new()));
        if !matches!(entry, ParamValue::Nested(_)) {
            *entry = ParamValue::Nested(BTreeMap::new());
        }
        if let ParamValue::Nested(map) = entry {
            map.insert(op.to_string(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Plain string value for `key`, if present and not nested.
    pub fn get_single(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ParamValue::Single(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `field[op]` into `(field, op)`. Returns `None` for keys without
/// the nested syntax; deeper nesting is not recognized.
fn split_nested_key(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let rest = &key[open + 1..];
    let close = rest.find(']')?;
    // Trailing characters after the closing bracket mean this is not the
    // one-level syntax we accept.
    if open == 0 || close + 1 != rest.len() || rest[..close].is_empty() {
        return None;
    }
    Some((&key[..open], &rest[..close]))
}
