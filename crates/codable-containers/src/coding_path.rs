//! Coding keys and coding paths.
//!
//! A coding path records where a container or value sits inside the document
//! being decoded or encoded. It is rendered as an RFC 6901 JSON Pointer.

use std::fmt;

/// One step of a coding path: an object member name or a sequence position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodingKey {
    Key(String),
    Index(usize),
}

impl CodingKey {
    /// The key as it appears in a JSON Pointer component (unescaped).
    pub fn string_value(&self) -> String {
        match self {
            CodingKey::Key(key) => key.clone(),
            CodingKey::Index(index) => index.to_string(),
        }
    }

    /// The integer value, for positional keys only.
    pub fn int_value(&self) -> Option<usize> {
        match self {
            CodingKey::Key(_) => None,
            CodingKey::Index(index) => Some(*index),
        }
    }
}

impl From<&str> for CodingKey {
    fn from(key: &str) -> Self {
        CodingKey::Key(key.to_owned())
    }
}

impl From<String> for CodingKey {
    fn from(key: String) -> Self {
        CodingKey::Key(key)
    }
}

impl From<usize> for CodingKey {
    fn from(index: usize) -> Self {
        CodingKey::Index(index)
    }
}

/// Ordered list of [`CodingKey`]s from the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodingPath {
    keys: Vec<CodingKey>,
}

impl CodingPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[CodingKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns a new path with `key` appended; `self` is left untouched.
    pub fn appending(&self, key: impl Into<CodingKey>) -> Self {
        let mut keys = Vec::with_capacity(self.keys.len() + 1);
        keys.extend(self.keys.iter().cloned());
        keys.push(key.into());
        Self { keys }
    }

    /// Formats the path as a JSON Pointer.
    ///
    /// Examples:
    /// - `[] -> ""`
    /// - `["a/b", 0, "~k"] -> "/a~1b/0/~0k"`
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for key in &self.keys {
            out.push('/');
            match key {
                CodingKey::Key(name) => push_escaped(&mut out, name),
                CodingKey::Index(index) => out.push_str(&index.to_string()),
            }
        }
        out
    }
}

impl From<Vec<CodingKey>> for CodingPath {
    fn from(keys: Vec<CodingKey>) -> Self {
        Self { keys }
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.to_pointer())
    }
}

/// Appends one pointer reference token, escaping `~` and `/` (RFC 6901).
fn push_escaped(out: &mut String, name: &str) {
    for ch in name.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(ch),
        }
    }
}
