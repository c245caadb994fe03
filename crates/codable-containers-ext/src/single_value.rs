//! Conversion helpers for single-value containers.

use codable_containers::{SingleValueDecodingContainer, SingleValueEncodingContainer};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode-and-convert for every [`SingleValueDecodingContainer`].
pub trait SingleValueDecodingContainerExt: SingleValueDecodingContainer {
    /// Decodes the container's value as `T` and converts it with `convert`.
    ///
    /// Fails with type-mismatch or value-not-found (null) before `convert`
    /// runs. Like the plain decode, call this once per container.
    fn decode_with<T, C, E, F>(&mut self, convert: F) -> Result<C, E>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> Result<C, E>,
        E: From<Self::Error>,
    {
        let value = self.decode::<T>()?;
        convert(value)
    }
}

impl<S: SingleValueDecodingContainer + ?Sized> SingleValueDecodingContainerExt for S {}

/// Convert-and-encode for every [`SingleValueEncodingContainer`].
pub trait SingleValueEncodingContainerExt: SingleValueEncodingContainer {
    /// Encodes the value produced by `converter`.
    ///
    /// Must not be called after the container already received a value.
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

impl<S: SingleValueEncodingContainer + ?Sized> SingleValueEncodingContainerExt for S {}
