//! Decoding containers over a borrowed `serde_json::Value`.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::kind_of;
use crate::coding_path::CodingPath;
use crate::container::{
    KeyedDecodingContainer, SingleValueDecodingContainer, UnkeyedDecodingContainer,
};
use crate::error::{Context, DecodingError};

static NULL: Value = Value::Null;

/// Reads `value` as `T`.
///
/// A null that `T` refuses is reported as value-not-found rather than a type
/// mismatch, so `Option<_>` and `()` still accept null.
fn read_value<T: DeserializeOwned>(value: &Value, path: &CodingPath) -> Result<T, DecodingError> {
    match T::deserialize(value) {
        Ok(decoded) => Ok(decoded),
        Err(_) if value.is_null() => Err(value_not_found::<T>(path, "value is null")),
        Err(err) => {
            trace!(path = %path, expected = type_name::<T>(), error = %err, "type mismatch");
            Err(DecodingError::TypeMismatch {
                expected: type_name::<T>(),
                context: Context::new(path.clone(), err.to_string()),
            })
        }
    }
}

fn value_not_found<T: ?Sized>(path: &CodingPath, description: &str) -> DecodingError {
    trace!(path = %path, expected = type_name::<T>(), "{description}");
    DecodingError::ValueNotFound {
        expected: type_name::<T>(),
        context: Context::new(path.clone(), description),
    }
}

fn key_not_found(path: &CodingPath, key: &str) -> DecodingError {
    trace!(path = %path, key, "key not found");
    DecodingError::KeyNotFound {
        key: key.to_owned(),
        context: Context::new(path.appending(key), "key not present"),
    }
}

fn container_mismatch(path: &CodingPath, expected: &'static str, found: &Value) -> DecodingError {
    if found.is_null() {
        trace!(path = %path, expected, "container is null");
        return DecodingError::ValueNotFound {
            expected,
            context: Context::new(path.clone(), format!("expected {expected} but found null")),
        };
    }
    trace!(path = %path, expected, found = kind_of(found), "container type mismatch");
    DecodingError::TypeMismatch {
        expected,
        context: Context::new(path.clone(), format!("expected {expected} but found {}", kind_of(found))),
    }
}

/// Entry point for decoding a borrowed JSON value tree.
#[derive(Debug, Clone)]
pub struct ValueDecoder<'a> {
    value: &'a Value,
    coding_path: CodingPath,
}

impl<'a> ValueDecoder<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self::with_path(value, CodingPath::new())
    }

    pub(crate) fn with_path(value: &'a Value, coding_path: CodingPath) -> Self {
        Self { value, coding_path }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Views the value as an object. Fails with type-mismatch for non-objects
    /// and value-not-found for null.
    pub fn keyed_container(&self) -> Result<KeyedValueDecoder<'a>, DecodingError> {
        match self.value {
            Value::Object(map) => Ok(KeyedValueDecoder {
                map,
                coding_path: self.coding_path.clone(),
            }),
            other => Err(container_mismatch(&self.coding_path, "object", other)),
        }
    }

    /// Views the value as an array. Fails with type-mismatch for non-arrays
    /// and value-not-found for null.
    pub fn unkeyed_container(&self) -> Result<UnkeyedValueDecoder<'a>, DecodingError> {
        match self.value {
            Value::Array(items) => Ok(UnkeyedValueDecoder {
                items,
                index: 0,
                coding_path: self.coding_path.clone(),
            }),
            other => Err(container_mismatch(&self.coding_path, "array", other)),
        }
    }

    pub fn single_value_container(&self) -> SingleValueDecoder<'a> {
        SingleValueDecoder {
            value: self.value,
            coding_path: self.coding_path.clone(),
        }
    }
}

/// Name-keyed view of a JSON object.
#[derive(Debug, Clone)]
pub struct KeyedValueDecoder<'a> {
    map: &'a Map<String, Value>,
    coding_path: CodingPath,
}

impl<'a> KeyedValueDecoder<'a> {
    fn entry(&self, key: &str) -> Result<&'a Value, DecodingError> {
        self.map
            .get(key)
            .ok_or_else(|| key_not_found(&self.coding_path, key))
    }

    pub fn nested_keyed_container(&self, key: &str) -> Result<KeyedValueDecoder<'a>, DecodingError> {
        let value = self.entry(key)?;
        ValueDecoder::with_path(value, self.coding_path.appending(key)).keyed_container()
    }

    pub fn nested_unkeyed_container(
        &self,
        key: &str,
    ) -> Result<UnkeyedValueDecoder<'a>, DecodingError> {
        let value = self.entry(key)?;
        ValueDecoder::with_path(value, self.coding_path.appending(key)).unkeyed_container()
    }

    /// Decoder for the value under `key`; a missing key yields a decoder over
    /// null.
    pub fn super_decoder(&self, key: &str) -> ValueDecoder<'a> {
        let value = self.map.get(key).unwrap_or(&NULL);
        ValueDecoder::with_path(value, self.coding_path.appending(key))
    }
}

impl KeyedDecodingContainer for KeyedValueDecoder<'_> {
    type Error = DecodingError;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn all_keys(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn decode_nil(&self, key: &str) -> Result<bool, DecodingError> {
        Ok(self.entry(key)?.is_null())
    }

    fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodingError> {
        let value = self.entry(key)?;
        read_value(value, &self.coding_path.appending(key))
    }

    fn decode_if_present<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DecodingError> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => read_value(value, &self.coding_path.appending(key)).map(Some),
        }
    }
}

/// Cursor over the elements of a JSON array.
#[derive(Debug, Clone)]
pub struct UnkeyedValueDecoder<'a> {
    items: &'a [Value],
    index: usize,
    coding_path: CodingPath,
}

impl<'a> UnkeyedValueDecoder<'a> {
    fn element_path(&self) -> CodingPath {
        self.coding_path.appending(self.index)
    }

    fn peek<T: ?Sized>(&self) -> Result<&'a Value, DecodingError> {
        self.items
            .get(self.index)
            .ok_or_else(|| value_not_found::<T>(&self.element_path(), "unkeyed container is at end"))
    }

    /// Views the next element as an object and advances past it.
    pub fn nested_keyed_container(&mut self) -> Result<KeyedValueDecoder<'a>, DecodingError> {
        let value = self.peek::<Map<String, Value>>()?;
        let nested = ValueDecoder::with_path(value, self.element_path()).keyed_container()?;
        self.index += 1;
        Ok(nested)
    }

    /// Views the next element as an array and advances past it.
    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedValueDecoder<'a>, DecodingError> {
        let value = self.peek::<Vec<Value>>()?;
        let nested = ValueDecoder::with_path(value, self.element_path()).unkeyed_container()?;
        self.index += 1;
        Ok(nested)
    }

    /// Decoder for the next element; advances past it.
    pub fn super_decoder(&mut self) -> Result<ValueDecoder<'a>, DecodingError> {
        let value = self.peek::<Value>()?;
        let decoder = ValueDecoder::with_path(value, self.element_path());
        self.index += 1;
        Ok(decoder)
    }
}

impl UnkeyedDecodingContainer for UnkeyedValueDecoder<'_> {
    type Error = DecodingError;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn count(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn is_at_end(&self) -> bool {
        self.index >= self.items.len()
    }

    fn current_index(&self) -> usize {
        self.index
    }

    fn decode_nil(&mut self) -> Result<bool, DecodingError> {
        if self.peek::<()>()?.is_null() {
            self.index += 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn decode<T: DeserializeOwned>(&mut self) -> Result<T, DecodingError> {
        let value = self.peek::<T>()?;
        let decoded = read_value(value, &self.element_path())?;
        self.index += 1;
        Ok(decoded)
    }

    fn decode_if_present<T: DeserializeOwned>(&mut self) -> Result<Option<T>, DecodingError> {
        match self.items.get(self.index) {
            None => Ok(None),
            Some(Value::Null) => {
                self.index += 1;
                Ok(None)
            }
            Some(value) => {
                let decoded = read_value(value, &self.element_path())?;
                self.index += 1;
                Ok(Some(decoded))
            }
        }
    }
}

/// A JSON value read as one standalone value.
#[derive(Debug, Clone)]
pub struct SingleValueDecoder<'a> {
    value: &'a Value,
    coding_path: CodingPath,
}

impl SingleValueDecodingContainer for SingleValueDecoder<'_> {
    type Error = DecodingError;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn decode_nil(&self) -> bool {
        self.value.is_null()
    }

    fn decode<T: DeserializeOwned>(&mut self) -> Result<T, DecodingError> {
        read_value(self.value, &self.coding_path)
    }
}
