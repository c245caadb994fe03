//! Convert-on-decode and convert-before-encode helpers for coding containers.
//!
//! Each container role from [`codable_containers`] gets an extension trait
//! with a blanket impl. The helpers decode a wire value and hand it to a
//! conversion closure in one step, or run a converter and encode what it
//! returns:
//!
//! ```
//! use codable_containers::{DecodingError, JsonDecoder};
//! use codable_containers_ext::prelude::*;
//!
//! #[derive(Debug)]
//! enum AppError {
//!     Decoding(DecodingError),
//!     BadAge(String),
//! }
//!
//! impl From<DecodingError> for AppError {
//!     fn from(err: DecodingError) -> Self {
//!         AppError::Decoding(err)
//!     }
//! }
//!
//! let age = JsonDecoder::new().decode(br#"{"age": "42"}"#, |decoder| {
//!     decoder.keyed_container()?.decode_with("age", |raw: String| {
//!         raw.parse::<u32>().map_err(|_| AppError::BadAge(raw))
//!     })
//! })?;
//! assert_eq!(age, 42);
//! # Ok::<(), AppError>(())
//! ```
//!
//! Errors from the container reach the caller through `E: From<_>`;
//! errors from the conversion closure come back untouched. None of the
//! helpers keep state between calls.

mod keyed_decoding;
mod keyed_encoding;
mod single_value;
mod unkeyed;

pub use keyed_decoding::KeyedDecodingContainerExt;
pub use keyed_encoding::KeyedEncodingContainerExt;
pub use single_value::{SingleValueDecodingContainerExt, SingleValueEncodingContainerExt};
pub use unkeyed::{UnkeyedDecodingContainerExt, UnkeyedEncodingContainerExt};

/// Container traits together with their extensions.
pub mod prelude {
    pub use codable_containers::{
        KeyedDecodingContainer, KeyedEncodingContainer, SingleValueDecodingContainer,
        SingleValueEncodingContainer, UnkeyedDecodingContainer, UnkeyedEncodingContainer,
    };

    pub use crate::{
        KeyedDecodingContainerExt, KeyedEncodingContainerExt, SingleValueDecodingContainerExt,
        SingleValueEncodingContainerExt, UnkeyedDecodingContainerExt, UnkeyedEncodingContainerExt,
    };
}
