//! HTTP headers.
use std::collections::{btree_map::Iter, BTreeMap};

/// HTTP headers.
///
/// Names are stored lowercase. Kept sorted so serialized responses are deterministic.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Headers {
    headers: BTreeMap<String, String>,
}

impl Headers {
    /// Create new empty headers storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header to the headers storage. The name will be converted to lowercase.
    ///
    /// # Example
    ///
    /// ```
    /// # use rwf_markup::http::Headers;
    /// let mut headers = Headers::new();
    /// headers.insert("X-My-Header", "134");
    /// assert_eq!(headers.get("x-my-header"), Some(&String::from("134")));
    /// ```
    pub fn insert(&mut self, name: impl ToString, value: impl ToString) {
        self.headers
            .insert(name.to_string().to_lowercase(), value.to_string());
    }

    /// Get a header value by name. Case insensitive.
    pub fn get(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    /// Remove a header by name. Case insensitive.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers.remove(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_lowercase())
    }

    /// Get a borrowing interator to the headers.
    pub fn iter(&self) -> Iter<String, String> {
        self.headers.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Convert headers to bytes.
    /// Used to send headers to the client.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (name, value) in &self.headers {
            bytes.extend_from_slice(name.as_bytes());
            bytes.extend_from_slice(b": ");
            bytes.extend_from_slice(value.as_bytes());
            bytes.extend_from_slice(b"\r\n");
        }
        bytes
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Headers {
    fn from(headers: [(&str, &str); N]) -> Self {
        let mut result = Headers::new();
        for (name, value) in headers {
            result.insert(name, value);
        }
        result
    }
}
