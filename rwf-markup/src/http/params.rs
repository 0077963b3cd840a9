//! Request parameters parsed from the query string.
use std::collections::{btree_map::Iter, BTreeMap};
use std::str::FromStr;

use super::urldecode;

/// Request parameters, e.g. `?a=1&b=2`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Params {
    params: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, without the leading `?`.
    ///
    /// # Example
    ///
    /// ```
    /// # use rwf_markup::http::Params;
    /// let params = Params::parse("id=5&name=hello%20world#top");
    ///
    /// assert_eq!(params.get::<i64>("id"), Some(5));
    /// assert_eq!(params.get::<String>("name"), Some("hello world".into()));
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();

        // Remove the anchor if any.
        let without_anchor = query.split('#').next().unwrap_or("");

        for part in without_anchor.split('&').filter(|part| !part.is_empty()) {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));

            // ?key=a=b is malformed
            if value.contains('=') {
                continue;
            }

            params.insert(urldecode(key), urldecode(value));
        }

        params
    }

    pub fn insert(&mut self, name: impl ToString, value: impl ToString) {
        self.params.insert(name.to_string(), value.to_string());
    }

    /// Get a parameter converted to any type that can be parsed from a string.
    pub fn get<T: FromStr>(&self, name: &str) -> Option<T> {
        self.params.get(name).and_then(|value| value.parse().ok())
    }

    /// Get the raw parameter value.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|value| value.as_str())
    }

    pub fn iter(&self) -> Iter<String, String> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.params).unwrap_or_default()
    }
}

impl std::fmt::Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
