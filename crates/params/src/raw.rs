//! The raw, untyped parameter map as it arrives over the wire.

use serde::{Deserialize, Serialize};

/// Insertion-ordered map of `name -> raw bytes`.
///
/// Keys that match no declared field are permitted and ignored by the
/// binder; callers routinely supply partial override maps. Absent keys mean
/// "let the field's binding rule decide".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParams {
    entries: Vec<(String, Vec<u8>)>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous value under the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(name, value);
        self
    }

    /// Non-consuming variant of [`set`](Self::set).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// The value under `name` decoded as UTF-8, for assertions.
    pub fn get_utf8(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }
}

impl<N: Into<String>, V: Into<Vec<u8>>> FromIterator<(N, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut raw = RawParams::new();
        for (name, value) in iter {
            raw.insert(name, value);
        }
        raw
    }
}
