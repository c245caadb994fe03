//! Convert-before-encode for name-keyed containers.

use codable_containers::KeyedEncodingContainer;
use serde::Serialize;

/// Convert-and-encode operations for every [`KeyedEncodingContainer`].
pub trait KeyedEncodingContainerExt: KeyedEncodingContainer {
    /// Encodes the value produced by `converter` for `key`.
    ///
    /// Makes a conversion at the encoding site visible, for example writing a
    /// number as a string.
    fn encode_with<T, E, F>(&mut self, key: &str, converter: F) -> Result<(), E>
    where
        T: Serialize,
        F: FnOnce() -> Result<T, E>,
        E: From<Self::Error>,
    {
        let converted = converter()?;
        self.encode(key, &converted)?;
        Ok(())
    }

    /// Encodes the value produced by `converter` for `key` unless it is
    /// `None`.
    ///
    /// For `None` the container's `encode_if_present` decides what happens;
    /// by default nothing is written for `key`.
    fn encode_if_converted<T, E, F>(&mut self, key: &str, converter: F) -> Result<(), E>
    where
        T: Serialize,
        F: FnOnce() -> Result<Option<T>, E>,
        E: From<Self::Error>,
    {
        let converted = converter()?;
        self.encode_if_present(key, converted.as_ref())?;
        Ok(())
    }
}

impl<K: KeyedEncodingContainer + ?Sized> KeyedEncodingContainerExt for K {}
