//! Keyed, unkeyed and single-value coding containers.
//!
//! Containers read and write serde types at a position in a structured
//! document. Two backends are provided:
//!
//! - [`value`] reads from and builds a `serde_json::Value` tree, with
//!   [`json`] wrapping it for raw JSON bytes.
//! - [`ser`] exposes serde's `SerializeMap`, `SerializeSeq` and `Serializer`
//!   as encoding containers, for use inside hand-written `Serialize` impls.

pub mod coding_path;
pub mod container;
pub mod error;
pub mod json;
pub mod options;
pub mod ser;
pub mod value;

pub use coding_path::{CodingKey, CodingPath};
pub use container::{
    KeyedDecodingContainer, KeyedEncodingContainer, SingleValueDecodingContainer,
    SingleValueEncodingContainer, UnkeyedDecodingContainer, UnkeyedEncodingContainer,
};
pub use error::{Context, DecodingError, EncodingError};
pub use json::{JsonDecoder, JsonEncoder};
pub use options::{AbsentValuePolicy, EncoderOptions};
pub use value::{ValueDecoder, ValueEncoder};
