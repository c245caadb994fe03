//! Conversion helpers for sequence (unkeyed) containers.

use codable_containers::{UnkeyedDecodingContainer, UnkeyedEncodingContainer};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode-and-convert for every [`UnkeyedDecodingContainer`].
pub trait UnkeyedDecodingContainerExt: UnkeyedDecodingContainer {
    /// Decodes the next element as `T` and converts it with `convert`.
    ///
    /// The cursor advances exactly as the plain decode does. Fails with
    /// value-not-found when the element is null or the sequence is exhausted
    /// and with type-mismatch when it is unreadable; `convert` does not run
    /// then.
    fn decode_with<T, C, E, F>(&mut self, convert: F) -> Result<C, E>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> Result<C, E>,
        E: From<Self::Error>,
    {
        let value = self.decode::<T>()?;
        convert(value)
    }

    /// Decodes the next element if one remains and is not null, then
    /// converts it.
    ///
    /// Returns `None` at the end of the sequence, for a null element, or when
    /// `convert` returns `None`. `convert` runs only for a present element.
    /// Check [`UnkeyedDecodingContainer::is_at_end`] to tell an exhausted
    /// sequence from a null.
    fn decode_if_present_with<T, C, E, F>(&mut self, convert: F) -> Result<Option<C>, E>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> Result<Option<C>, E>,
        E: From<Self::Error>,
    {
        match self.decode_if_present::<T>()? {
            Some(value) => convert(value),
            None => Ok(None),
        }
    }
}

impl<U: UnkeyedDecodingContainer + ?Sized> UnkeyedDecodingContainerExt for U {}

/// Convert-and-encode for every [`UnkeyedEncodingContainer`].
pub trait UnkeyedEncodingContainerExt: UnkeyedEncodingContainer {
    /// Appends the value produced by `converter`.
    fn encode_with<T, E, F>(&mut self, converter: F) -> Result<(), E>
    where
        T: Serialize,
        F: FnOnce() -> Result<T, E>,
        E: From<Self::Error>,
    {
        let converted = converter()?;
        self.encode(&converted)?;
        Ok(())
    }
}

impl<U: UnkeyedEncodingContainer + ?Sized> UnkeyedEncodingContainerExt for U {}
