//! Convert-on-decode for name-keyed containers.

use codable_containers::KeyedDecodingContainer;
use serde::de::DeserializeOwned;

/// Decode-and-convert operations for every [`KeyedDecodingContainer`].
pub trait KeyedDecodingContainerExt: KeyedDecodingContainer {
    /// Decodes a `T` for `key` and passes it through `convert`.
    ///
    /// Useful when a document carries a value in an inconvenient shape, such
    /// as a number encoded as a string:
    ///
    /// ```
    /// use std::error::Error;
    ///
    /// use codable_containers::ValueDecoder;
    /// use codable_containers_ext::KeyedDecodingContainerExt;
    ///
    /// let doc = serde_json::json!({"price": "9.95"});
    /// let keyed = ValueDecoder::new(&doc).keyed_container()?;
    /// let price = keyed.decode_with("price", |raw: String| {
    ///     Ok::<_, Box<dyn Error>>(raw.parse::<f64>()?)
    /// })?;
    /// assert_eq!(price, 9.95);
    /// # Ok::<(), Box<dyn Error>>(())
    /// ```
    ///
    /// Fails with the container's key-not-found, value-not-found or
    /// type-mismatch error, lifted into `E`. `convert` does not run in that
    /// case. A failure returned by `convert` comes back unchanged.
    fn decode_with<T, C, E, F>(&self, key: &str, convert: F) -> Result<C, E>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> Result<C, E>,
        E: From<Self::Error>,
    {
        let decoded = self.decode::<T>(key)?;
        convert(decoded)
    }

    /// Decodes a `T` for `key`, if present, and passes it through `convert`.
    ///
    /// Returns `None` when `key` is absent, when its value is null, or when
    /// `convert` returns `None`. Use [`KeyedDecodingContainer::contains`] and
    /// [`KeyedDecodingContainer::decode_nil`] to tell these apart.
    /// Type mismatches still fail.
    fn decode_if_present_with<T, C, E, F>(&self, key: &str, convert: F) -> Result<Option<C>, E>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> Result<Option<C>, E>,
        E: From<Self::Error>,
    {
        match self.decode_if_present::<T>(key)? {
            Some(decoded) => convert(decoded),
            None => Ok(None),
        }
    }
}

impl<K: KeyedDecodingContainer + ?Sized> KeyedDecodingContainerExt for K {}
