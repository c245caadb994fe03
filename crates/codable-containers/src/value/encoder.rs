//! Encoding containers that build a `serde_json::Value` tree.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::finite::Finite;
use super::kind_of;
use crate::coding_path::CodingPath;
use crate::container::{
    KeyedEncodingContainer, SingleValueEncodingContainer, UnkeyedEncodingContainer,
};
use crate::error::EncodingError;
use crate::options::{AbsentValuePolicy, EncoderOptions};

fn write_value<T: Serialize + ?Sized>(value: &T, path: &CodingPath) -> Result<Value, EncodingError> {
    Finite(value)
        .serialize(serde_json::value::Serializer)
        .map_err(|err| invalid_value(path, err.to_string()))
}

fn invalid_value(path: &CodingPath, description: String) -> EncodingError {
    trace!(path = %path, "invalid value: {description}");
    EncodingError::invalid_value(path.clone(), description)
}

fn object_slot(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot holds an object"),
    }
}

fn array_slot(slot: &mut Value) -> &mut Vec<Value> {
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot holds an array"),
    }
}

/// Builds a JSON value tree through coding containers.
///
/// Call [`ValueEncoder::finish`] to take the result.
#[derive(Debug, Clone, Default)]
pub struct ValueEncoder {
    root: Option<Value>,
    // Root was stored by a single-value write and is sealed against containers.
    single: bool,
    options: EncoderOptions,
    coding_path: CodingPath,
}

impl ValueEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    /// The tree built so far.
    pub fn value(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Keyed container writing into the root object. Asking twice returns
    /// containers over the same object.
    pub fn keyed_container(&mut self) -> Result<KeyedValueEncoder<'_>, EncodingError> {
        self.check_unsealed("an object")?;
        match self.root.get_or_insert_with(|| Value::Object(Map::new())) {
            Value::Object(map) => Ok(KeyedValueEncoder {
                map,
                options: self.options,
                coding_path: self.coding_path.clone(),
            }),
            other => Err(invalid_value(
                &self.coding_path,
                format!("cannot encode an object over an existing {}", kind_of(other)),
            )),
        }
    }

    /// Unkeyed container appending to the root array.
    pub fn unkeyed_container(&mut self) -> Result<UnkeyedValueEncoder<'_>, EncodingError> {
        self.check_unsealed("an array")?;
        match self.root.get_or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(items) => Ok(UnkeyedValueEncoder {
                items,
                options: self.options,
                coding_path: self.coding_path.clone(),
            }),
            other => Err(invalid_value(
                &self.coding_path,
                format!("cannot encode an array over an existing {}", kind_of(other)),
            )),
        }
    }

    pub fn single_value_container(&mut self) -> SingleValueEncoder<'_> {
        SingleValueEncoder {
            slot: &mut self.root,
            single: &mut self.single,
            coding_path: self.coding_path.clone(),
        }
    }

    fn check_unsealed(&self, kind: &str) -> Result<(), EncodingError> {
        if self.single {
            return Err(invalid_value(
                &self.coding_path,
                format!("cannot encode {kind} over a single value"),
            ));
        }
        Ok(())
    }

    /// Takes the encoded tree. Fails if nothing was encoded.
    pub fn finish(self) -> Result<Value, EncodingError> {
        let path = self.coding_path;
        self.root
            .ok_or_else(|| invalid_value(&path, "no value was encoded".to_owned()))
    }
}

/// Writes members into a JSON object.
#[derive(Debug)]
pub struct KeyedValueEncoder<'a> {
    map: &'a mut Map<String, Value>,
    options: EncoderOptions,
    coding_path: CodingPath,
}

impl KeyedValueEncoder<'_> {
    /// Object stored under `key`. Asking again returns a container over the
    /// same object; a non-object already written there is invalid-value.
    pub fn nested_keyed_container(
        &mut self,
        key: &str,
    ) -> Result<KeyedValueEncoder<'_>, EncodingError> {
        let coding_path = self.coding_path.appending(key);
        let slot = self.map.entry(key.to_owned()).or_insert(Value::Null);
        if !(slot.is_null() || slot.is_object()) {
            return Err(invalid_value(
                &coding_path,
                format!("cannot nest an object over an existing {}", kind_of(slot)),
            ));
        }
        Ok(KeyedValueEncoder {
            map: object_slot(slot),
            options: self.options,
            coding_path,
        })
    }

    /// Array stored under `key`, appending to one already there.
    pub fn nested_unkeyed_container(
        &mut self,
        key: &str,
    ) -> Result<UnkeyedValueEncoder<'_>, EncodingError> {
        let coding_path = self.coding_path.appending(key);
        let slot = self.map.entry(key.to_owned()).or_insert(Value::Null);
        if !(slot.is_null() || slot.is_array()) {
            return Err(invalid_value(
                &coding_path,
                format!("cannot nest an array over an existing {}", kind_of(slot)),
            ));
        }
        Ok(UnkeyedValueEncoder {
            items: array_slot(slot),
            options: self.options,
            coding_path,
        })
    }
}

impl KeyedEncodingContainer for KeyedValueEncoder<'_> {
    type Error = EncodingError;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn encode<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), EncodingError> {
        let value = write_value(value, &self.coding_path.appending(key))?;
        self.map.insert(key.to_owned(), value);
        Ok(())
    }

    fn encode_nil(&mut self, key: &str) -> Result<(), EncodingError> {
        self.map.insert(key.to_owned(), Value::Null);
        Ok(())
    }

    fn encode_if_present<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: Option<&T>,
    ) -> Result<(), EncodingError> {
        match (value, self.options.absent_values) {
            (Some(value), _) => self.encode(key, value),
            (None, AbsentValuePolicy::Omit) => Ok(()),
            (None, AbsentValuePolicy::WriteNull) => self.encode_nil(key),
        }
    }
}

/// Appends elements to a JSON array.
#[derive(Debug)]
pub struct UnkeyedValueEncoder<'a> {
    items: &'a mut Vec<Value>,
    options: EncoderOptions,
    coding_path: CodingPath,
}

impl UnkeyedValueEncoder<'_> {
    /// Appends an empty object and returns a container writing into it.
    pub fn nested_keyed_container(&mut self) -> KeyedValueEncoder<'_> {
        let index = self.items.len();
        self.items.push(Value::Object(Map::new()));
        KeyedValueEncoder {
            map: object_slot(&mut self.items[index]),
            options: self.options,
            coding_path: self.coding_path.appending(index),
        }
    }

    /// Appends an empty array and returns a container writing into it.
    pub fn nested_unkeyed_container(&mut self) -> UnkeyedValueEncoder<'_> {
        let index = self.items.len();
        self.items.push(Value::Array(Vec::new()));
        UnkeyedValueEncoder {
            items: array_slot(&mut self.items[index]),
            options: self.options,
            coding_path: self.coding_path.appending(index),
        }
    }
}

impl UnkeyedEncodingContainer for UnkeyedValueEncoder<'_> {
    type Error = EncodingError;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        let value = write_value(value, &self.coding_path.appending(self.items.len()))?;
        self.items.push(value);
        Ok(())
    }

    fn encode_nil(&mut self) -> Result<(), EncodingError> {
        self.items.push(Value::Null);
        Ok(())
    }
}

/// Writes the encoder's root as one standalone value.
#[derive(Debug)]
pub struct SingleValueEncoder<'a> {
    slot: &'a mut Option<Value>,
    single: &'a mut bool,
    coding_path: CodingPath,
}

impl SingleValueEncoder<'_> {
    fn store(&mut self, value: Value) -> Result<(), EncodingError> {
        if let Some(existing) = self.slot.as_ref() {
            return Err(invalid_value(
                &self.coding_path,
                format!("single value container already holds {}", kind_of(existing)),
            ));
        }
        *self.slot = Some(value);
        *self.single = true;
        Ok(())
    }
}

impl SingleValueEncodingContainer for SingleValueEncoder<'_> {
    type Error = EncodingError;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        let value = write_value(value, &self.coding_path)?;
        self.store(value)
    }

    fn encode_nil(&mut self) -> Result<(), EncodingError> {
        self.store(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn keyed_encode_matrix() {
        let mut encoder = ValueEncoder::new();
        {
            let mut keyed = encoder.keyed_container().unwrap();
            keyed.encode("name", "ada").unwrap();
            keyed.encode("age", &36).unwrap();
            keyed.encode_nil("nick").unwrap();
            keyed.encode_if_present::<str>("email", None).unwrap();
            keyed.encode_if_present("city", Some("paris")).unwrap();
        }
        assert_eq!(
            encoder.finish().unwrap(),
            json!({"name": "ada", "age": 36, "nick": null, "city": "paris"})
        );
    }

    #[test]
    fn absent_values_written_as_null_when_configured() {
        let mut encoder = ValueEncoder::with_options(EncoderOptions {
            absent_values: AbsentValuePolicy::WriteNull,
            ..EncoderOptions::default()
        });
        encoder
            .keyed_container()
            .unwrap()
            .encode_if_present::<i32>("score", None)
            .unwrap();
        assert_eq!(encoder.finish().unwrap(), json!({"score": null}));
    }

    #[test]
    fn nested_encoders_write_into_parent() {
        let mut encoder = ValueEncoder::new();
        {
            let mut root = encoder.keyed_container().unwrap();
            {
                let mut user = root.nested_keyed_container("user").unwrap();
                user.encode("id", &1).unwrap();
                let mut tags = user.nested_unkeyed_container("tags").unwrap();
                tags.encode("a").unwrap();
                tags.encode_nil().unwrap();
                assert_eq!(tags.count(), 2);
                assert_eq!(tags.coding_path().to_pointer(), "/user/tags");
            }
            let mut rows = root.nested_unkeyed_container("rows").unwrap();
            rows.nested_keyed_container().encode("x", &0).unwrap();
            rows.nested_unkeyed_container().encode(&true).unwrap();
        }
        assert_eq!(
            encoder.finish().unwrap(),
            json!({"user": {"id": 1, "tags": ["a", null]}, "rows": [{"x": 0}, [true]]})
        );
    }

    #[test]
    fn invalid_value_matrix() {
        let mut bad_keys = BTreeMap::new();
        bad_keys.insert((1, 2), "pair");

        let mut encoder = ValueEncoder::new();
        let err = encoder
            .keyed_container()
            .unwrap()
            .encode("bad", &bad_keys)
            .unwrap_err();
        assert_eq!(err.coding_path().to_pointer(), "/bad");

        let mut encoder = ValueEncoder::new();
        encoder.unkeyed_container().unwrap().encode(&1).unwrap();
        assert!(encoder.keyed_container().is_err());
    }

    #[test]
    fn non_finite_floats_are_invalid_value() {
        let mut encoder = ValueEncoder::new();
        {
            let mut keyed = encoder.keyed_container().unwrap();
            let err = keyed.encode("ratio", &f64::NAN).unwrap_err();
            assert_eq!(err.coding_path().to_pointer(), "/ratio");
            keyed.encode("ok", &0.5).unwrap();

            let mut seq = keyed.nested_unkeyed_container("xs").unwrap();
            seq.encode(&1.0f32).unwrap();
            let err = seq.encode(&f32::INFINITY).unwrap_err();
            assert_eq!(err.coding_path().to_pointer(), "/xs/1");
            assert_eq!(seq.count(), 1);
        }
        assert_eq!(encoder.finish().unwrap(), json!({"ok": 0.5, "xs": [1.0]}));

        let mut encoder = ValueEncoder::new();
        let err = encoder
            .single_value_container()
            .encode(&vec![f64::NEG_INFINITY])
            .unwrap_err();
        assert!(matches!(err, EncodingError::InvalidValue { .. }));
        assert!(encoder.value().is_none());
    }

    #[test]
    fn nested_container_over_scalar_is_invalid_value() {
        let mut encoder = ValueEncoder::new();
        let mut root = encoder.keyed_container().unwrap();
        root.encode("name", "ada").unwrap();
        let err = root.nested_keyed_container("name").unwrap_err();
        assert_eq!(err.coding_path().to_pointer(), "/name");
        assert!(root.nested_unkeyed_container("name").is_err());

        root.encode_nil("tags").unwrap();
        root.nested_unkeyed_container("tags").unwrap().encode("a").unwrap();
        root.nested_unkeyed_container("tags").unwrap().encode("b").unwrap();
        assert!(root.nested_keyed_container("tags").is_err());
        root.nested_keyed_container("user").unwrap().encode("id", &1).unwrap();
        root.nested_keyed_container("user").unwrap().encode("ok", &true).unwrap();
        assert_eq!(
            encoder.finish().unwrap(),
            json!({"name": "ada", "tags": ["a", "b"], "user": {"id": 1, "ok": true}})
        );
    }

    #[test]
    fn single_value_root_rejects_containers() {
        let mut encoder = ValueEncoder::new();
        encoder
            .single_value_container()
            .encode(&json!({"a": 1}))
            .unwrap();
        assert!(matches!(
            encoder.keyed_container(),
            Err(EncodingError::InvalidValue { .. })
        ));
        assert!(encoder.unkeyed_container().is_err());
        assert_eq!(encoder.finish().unwrap(), json!({"a": 1}));
    }

    #[test]
    fn single_value_accepts_one_write() {
        let mut encoder = ValueEncoder::new();
        let mut single = encoder.single_value_container();
        single.encode(&4.5).unwrap();
        assert!(matches!(
            single.encode(&1),
            Err(EncodingError::InvalidValue { .. })
        ));
        assert!(single.encode_nil().is_err());
        assert_eq!(encoder.finish().unwrap(), json!(4.5));
    }

    #[test]
    fn finish_without_value_fails() {
        assert!(ValueEncoder::new().finish().is_err());
    }
}
