//! Case-insensitive header bag.
//!
//! Names are normalized to lower case on every write and lookup, values are
//! kept verbatim, and each name holds exactly one value (last write wins).
//! Entries keep their insertion order, and overwriting a value keeps the
//! entry's original position.
//!
//! # Examples
//!
//! ```
//! use webstub::fetch::Headers;
//!
//! let mut headers = Headers::new();
//! headers.set("Content-Type", "application/json");
//! assert_eq!(headers.get("content-type"), Some("application/json"));
//! assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
//! ```

use http::header::{HeaderMap, HeaderName, HeaderValue};

/// Ordered, case-insensitive, single-value-per-name header collection.
///
/// Initializers mirror the shapes the emulated primitive accepts: another
/// `Headers` via [`Clone`], ordered pairs via [`FromIterator`] or
/// `From<[(K, V); N]>`, and an overlay of any pair iterator via [`Extend`]
/// (which applies [`set`](Headers::set) semantics per entry).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `name`, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(stored, _)| stored.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Stores `value` under the lower-cased `name`, overwriting any existing
    /// value. An overwrite keeps the entry's original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter().position(|(stored, _)| *stored == name) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns whether a value is stored under `name`, matched
    /// case-insensitively.
    pub fn has(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(stored, _)| stored.eq_ignore_ascii_case(name))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the bag holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order. Names come
    /// back in their stored (lower-cased) form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Builds a bag from an [`http::HeaderMap`]. Values that are not valid
    /// UTF-8 are kept as empty strings; repeated names collapse to the last
    /// value.
    pub fn from_header_map(map: &HeaderMap) -> Headers {
        let mut headers = Headers::new();
        for (name, value) in map {
            headers.set(name.as_str(), value.to_str().unwrap_or(""));
        }
        headers
    }

    /// Converts the bag into an [`http::HeaderMap`]. Entries whose name or
    /// value the `http` types reject are skipped with a warning.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in self.iter() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => log::warn!("skipping header not representable as http types: {}", name),
            }
        }
        map
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.extend(iter);
        headers
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> Extend<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let project: fn(&'a (String, String)) -> (&'a str, &'a str) =
            |(name, value)| (name.as_str(), value.as_str());
        self.entries.iter().map(project)
    }
}
