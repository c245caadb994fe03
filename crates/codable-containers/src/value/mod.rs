//! Containers backed by an in-memory `serde_json::Value` tree.
//!
//! Decoders borrow the tree they read from. [`ValueEncoder`] owns the tree it
//! builds and hands out containers that borrow it mutably, so nested
//! containers write straight into their parent.

mod decoder;
mod encoder;
mod finite;

pub use decoder::{KeyedValueDecoder, SingleValueDecoder, UnkeyedValueDecoder, ValueDecoder};
pub use encoder::{KeyedValueEncoder, SingleValueEncoder, UnkeyedValueEncoder, ValueEncoder};

use serde_json::Value;

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
