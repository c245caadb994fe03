//! Container abstractions for reading and writing structured data.
//!
//! Three roles exist on each side: keyed (object members addressed by name),
//! unkeyed (sequence elements addressed by an advancing cursor) and single
//! value. Wire values are anything serde can deserialize or serialize.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::coding_path::CodingPath;

/// Read access to name-keyed values.
pub trait KeyedDecodingContainer {
    type Error;

    fn coding_path(&self) -> &CodingPath;

    /// Every key stored in the container, in document order.
    fn all_keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool;

    /// Whether the entry for `key` is an explicit null.
    ///
    /// Fails with a key-not-found error if `key` is absent.
    fn decode_nil(&self, key: &str) -> Result<bool, Self::Error>;

    /// Fails with key-not-found, value-not-found (null entry) or type-mismatch.
    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, Self::Error>;

    /// Returns `None` when `key` is absent or null. Type mismatches still fail.
    fn decode_if_present<T: DeserializeOwned>(&self, key: &str)
        -> Result<Option<T>, Self::Error>;
}

/// Write access to name-keyed values.
pub trait KeyedEncodingContainer {
    type Error;

    fn coding_path(&self) -> &CodingPath;

    fn encode<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), Self::Error>;

    fn encode_nil(&mut self, key: &str) -> Result<(), Self::Error>;

    /// Writes `value` when present. The default leaves `key` out entirely
    /// when `value` is `None`.
    fn encode_if_present<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: Option<&T>,
    ) -> Result<(), Self::Error> {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }
}

/// Read access to a container holding exactly one value.
pub trait SingleValueDecodingContainer {
    type Error;

    fn coding_path(&self) -> &CodingPath;

    fn decode_nil(&self) -> bool;

    /// Fails with value-not-found (null) or type-mismatch.
    fn decode<T: DeserializeOwned>(&mut self) -> Result<T, Self::Error>;
}

/// Write access to a container holding exactly one value.
///
/// A single-value container accepts one write.
pub trait SingleValueEncodingContainer {
    type Error;

    fn coding_path(&self) -> &CodingPath;

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error>;

    fn encode_nil(&mut self) -> Result<(), Self::Error>;
}

/// Read access to position-ordered values behind a cursor.
pub trait UnkeyedDecodingContainer {
    type Error;

    fn coding_path(&self) -> &CodingPath;

    /// Number of elements, if known up front.
    fn count(&self) -> Option<usize>;

    fn is_at_end(&self) -> bool;

    fn current_index(&self) -> usize;

    /// Consumes the next element if it is null and reports whether it was.
    fn decode_nil(&mut self) -> Result<bool, Self::Error>;

    /// Reads the next element and advances the cursor by one.
    ///
    /// Fails with value-not-found if the element is null or the sequence is
    /// exhausted, type-mismatch if unreadable. The cursor does not move on
    /// failure.
    fn decode<T: DeserializeOwned>(&mut self) -> Result<T, Self::Error>;

    /// Returns `None` when the sequence is exhausted or the next element is
    /// null (a null is consumed).
    fn decode_if_present<T: DeserializeOwned>(&mut self) -> Result<Option<T>, Self::Error>;
}

/// Write access to position-ordered values.
pub trait UnkeyedEncodingContainer {
    type Error;

    fn coding_path(&self) -> &CodingPath;

    /// Number of elements written so far.
    fn count(&self) -> usize;

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error>;

    fn encode_nil(&mut self) -> Result<(), Self::Error>;
}
