//! Encoding containers over serde's serializer traits.
//!
//! These let a hand-written `impl Serialize` drive any serde format through
//! the container API:
//!
//! ```
//! use codable_containers::container::KeyedEncodingContainer;
//! use codable_containers::ser::MapContainer;
//! use serde::ser::{Serialize, SerializeMap, Serializer};
//!
//! struct Celsius(f64);
//!
//! impl Serialize for Celsius {
//!     fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
//!         let mut map = serializer.serialize_map(Some(1))?;
//!         MapContainer::new(&mut map).encode("celsius", &self.0)?;
//!         map.end()
//!     }
//! }
//!
//! assert_eq!(serde_json::to_string(&Celsius(21.5)).unwrap(), r#"{"celsius":21.5}"#);
//! ```

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::coding_path::CodingPath;
use crate::container::{
    KeyedEncodingContainer, SingleValueEncodingContainer, UnkeyedEncodingContainer,
};
use crate::options::AbsentValuePolicy;

/// Keyed container writing entries into a [`SerializeMap`].
pub struct MapContainer<'a, M> {
    map: &'a mut M,
    absent_values: AbsentValuePolicy,
    coding_path: CodingPath,
}

impl<'a, M: SerializeMap> MapContainer<'a, M> {
    pub fn new(map: &'a mut M) -> Self {
        Self {
            map,
            absent_values: AbsentValuePolicy::default(),
            coding_path: CodingPath::new(),
        }
    }

    pub fn with_absent_values(mut self, policy: AbsentValuePolicy) -> Self {
        self.absent_values = policy;
        self
    }

    pub fn with_coding_path(mut self, coding_path: CodingPath) -> Self {
        self.coding_path = coding_path;
        self
    }
}

impl<M: SerializeMap> KeyedEncodingContainer for MapContainer<'_, M> {
    type Error = M::Error;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn encode<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), M::Error> {
        self.map.serialize_entry(key, value)
    }

    fn encode_nil(&mut self, key: &str) -> Result<(), M::Error> {
        self.map.serialize_entry(key, &None::<()>)
    }

    fn encode_if_present<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: Option<&T>,
    ) -> Result<(), M::Error> {
        match (value, self.absent_values) {
            (Some(value), _) => self.encode(key, value),
            (None, AbsentValuePolicy::Omit) => Ok(()),
            (None, AbsentValuePolicy::WriteNull) => self.encode_nil(key),
        }
    }
}

/// Unkeyed container appending elements to a [`SerializeSeq`].
pub struct SeqContainer<'a, S> {
    seq: &'a mut S,
    count: usize,
    coding_path: CodingPath,
}

impl<'a, S: SerializeSeq> SeqContainer<'a, S> {
    pub fn new(seq: &'a mut S) -> Self {
        Self {
            seq,
            count: 0,
            coding_path: CodingPath::new(),
        }
    }

    pub fn with_coding_path(mut self, coding_path: CodingPath) -> Self {
        self.coding_path = coding_path;
        self
    }
}

impl<S: SerializeSeq> UnkeyedEncodingContainer for SeqContainer<'_, S> {
    type Error = S::Error;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn count(&self) -> usize {
        self.count
    }

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), S::Error> {
        self.seq.serialize_element(value)?;
        self.count += 1;
        Ok(())
    }

    fn encode_nil(&mut self) -> Result<(), S::Error> {
        self.encode(&None::<()>)
    }
}

/// Single-value container that hands its one value to a [`Serializer`].
///
/// The serializer is consumed by the first write; a second write fails with
/// the format's custom error.
pub struct SerializerContainer<S: Serializer> {
    serializer: Option<S>,
    output: Option<S::Ok>,
    coding_path: CodingPath,
}

impl<S: Serializer> SerializerContainer<S> {
    pub fn new(serializer: S) -> Self {
        Self {
            serializer: Some(serializer),
            output: None,
            coding_path: CodingPath::new(),
        }
    }

    pub fn with_coding_path(mut self, coding_path: CodingPath) -> Self {
        self.coding_path = coding_path;
        self
    }

    fn take_serializer(&mut self) -> Result<S, S::Error> {
        self.serializer
            .take()
            .ok_or_else(|| S::Error::custom("single value container already holds a value"))
    }

    /// The serializer's output. Fails if nothing was written.
    pub fn into_ok(self) -> Result<S::Ok, S::Error> {
        self.output
            .ok_or_else(|| S::Error::custom("no value was encoded"))
    }
}

impl<S: Serializer> SingleValueEncodingContainer for SerializerContainer<S> {
    type Error = S::Error;

    fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), S::Error> {
        let serializer = self.take_serializer()?;
        self.output = Some(value.serialize(serializer)?);
        Ok(())
    }

    fn encode_nil(&mut self) -> Result<(), S::Error> {
        let serializer = self.take_serializer()?;
        self.output = Some(serializer.serialize_none()?);
        Ok(())
    }
}
