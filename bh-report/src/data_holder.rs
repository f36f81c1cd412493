// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Ordered key/value storage shared by the stages of a single report run.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// An ordered mapping from string keys to JSON values.
///
/// A fresh [`DataHolder`] is created for every report run and carries the
/// sections written by the providers.  The same type is used to hold the
/// configuration of senders.
///
/// Keys are unique and kept in insertion order, which is also the order in
/// which they are serialized.  Setting an existing key replaces its value
/// wholesale, without merging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataHolder {
    data: Map<String, Value>,
}

impl DataHolder {
    /// Creates an empty [`DataHolder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.data.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`, or `default` if there is none.
    ///
    /// This never fails.  Use [`Value::Null`] as the `default` when no better
    /// sentinel exists.
    pub fn get<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.data.get(key).unwrap_or(default)
    }

    /// Returns the value stored under `key`, if any.
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the stored entries in insertion order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.data.iter()
    }

    /// Returns a new [`DataHolder`] with only the entries whose keys are
    /// listed in `keys`.
    ///
    /// The entries keep the order of `self`, not the order of `keys`.  Keys
    /// that are not present are skipped.
    pub fn subset<'k, I>(&self, keys: I) -> DataHolder
    where
        I: IntoIterator<Item = &'k str>,
    {
        let keys: Vec<&str> = keys.into_iter().collect();

        self.data
            .iter()
            .filter(|(key, _)| keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns a reference to the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Converts the holder into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}

impl Serialize for DataHolder {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl From<Map<String, Value>> for DataHolder {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

impl TryFrom<Value> for DataHolder {
    type Error = bherror::Error<Error>;

    /// Builds a holder from a JSON object, e.g. a configuration written with
    /// [`serde_json::json`].
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            other => Err(bherror::Error::root(Error::InvalidConfiguration(format!(
                "expected a JSON object, got {other}"
            )))),
        }
    }
}

impl FromIterator<(String, Value)> for DataHolder {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DataHolder {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_get_returns_default_when_absent() {
        let data = DataHolder::new();
        let default = json!("default");

        assert!(!data.has("foo"));
        assert_eq!(data.get("foo", &default), &default);
        assert_eq!(data.find("foo"), None);
    }

    #[test]
    fn test_get_returns_last_value_set() {
        let mut data = DataHolder::new();
        let default = Value::Null;

        data.set("foo", "bar");
        assert!(data.has("foo"));
        assert_eq!(data.get("foo", &default), &json!("bar"));

        data.set("foo", 123);
        assert_eq!(data.get("foo", &default), &json!(123));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_set_overwrites_without_merge() {
        let mut data = DataHolder::new();

        data.set("summary", json!({ "class": "First", "code": 1 }));
        data.set("summary", json!({ "message": "second" }));

        assert_eq!(data.find("summary"), Some(&json!({ "message": "second" })));
    }

    #[test]
    fn test_serialization_keeps_insertion_order() {
        let mut data = DataHolder::new();
        data.set("zeta", 1);
        data.set("alpha", 2);
        data.set("mid", 3);

        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }

    #[test]
    fn test_subset() {
        let mut data = DataHolder::new();
        data.set("summary", 1);
        data.set("trace", 2);
        data.set("env", 3);

        let subset = data.subset(["env", "summary", "missing"]);

        assert_eq!(
            subset.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>(),
            ["summary", "env"]
        );
    }

    #[test]
    fn test_try_from_value() {
        let data = DataHolder::try_from(json!({ "format": "json", "log_level": "ALERT" })).unwrap();
        assert_eq!(data.find("format"), Some(&json!("json")));

        let error = DataHolder::try_from(json!(["format"])).unwrap_err();
        assert_matches!(error.error, Error::InvalidConfiguration(_));
    }
}
