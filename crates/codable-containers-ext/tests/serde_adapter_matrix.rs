//! Helpers driven through the serde serializer adapters.

use codable_containers::ser::{MapContainer, SeqContainer, SerializerContainer};
use codable_containers::{AbsentValuePolicy, EncodingError, ValueEncoder};
use codable_containers_ext::prelude::*;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::json;

struct Reading {
    celsius: f64,
    label: Option<&'static str>,
    samples: Vec<u16>,
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        {
            let mut keyed = MapContainer::new(&mut map);
            keyed.encode_with("fahrenheit", || {
                Ok::<_, S::Error>(self.celsius * 9.0 / 5.0 + 32.0)
            })?;
            keyed.encode_if_converted("label", || {
                Ok::<_, S::Error>(self.label.map(str::to_uppercase))
            })?;
            keyed.encode_with("samples", || Ok::<_, S::Error>(Hex(&self.samples)))?;
        }
        map.end()
    }
}

struct Hex<'a>(&'a [u16]);

impl Serialize for Hex<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        {
            let mut unkeyed = SeqContainer::new(&mut seq);
            for sample in self.0 {
                unkeyed.encode_with(|| Ok::<_, S::Error>(format!("{sample:#06x}")))?;
            }
        }
        seq.end()
    }
}

fn reading_via_value_encoder(reading: &Reading) -> Result<serde_json::Value, EncodingError> {
    let mut encoder = ValueEncoder::new();
    {
        let mut keyed = encoder.keyed_container()?;
        keyed.encode_with("fahrenheit", || {
            Ok::<_, EncodingError>(reading.celsius * 9.0 / 5.0 + 32.0)
        })?;
        keyed.encode_if_converted("label", || {
            Ok::<_, EncodingError>(reading.label.map(str::to_uppercase))
        })?;
        let mut samples = keyed.nested_unkeyed_container("samples")?;
        for sample in &reading.samples {
            samples.encode_with(|| Ok::<_, EncodingError>(format!("{sample:#06x}")))?;
        }
    }
    encoder.finish()
}

#[test]
fn serde_adapters_match_value_backend() {
    let readings = [
        Reading {
            celsius: 100.0,
            label: Some("boil"),
            samples: vec![1, 255],
        },
        Reading {
            celsius: -40.0,
            label: None,
            samples: vec![],
        },
    ];
    for reading in &readings {
        let via_serde = serde_json::to_value(reading).unwrap();
        let via_containers = reading_via_value_encoder(reading).unwrap();
        assert_eq!(via_serde, via_containers);
    }

    assert_eq!(
        serde_json::to_value(&readings[0]).unwrap(),
        json!({"fahrenheit": 212.0, "label": "BOIL", "samples": ["0x0001", "0x00ff"]})
    );
    assert_eq!(
        serde_json::to_value(&readings[1]).unwrap(),
        json!({"fahrenheit": -40.0, "samples": []})
    );
}

#[test]
fn map_container_write_null_policy() {
    struct Sparse;

    impl Serialize for Sparse {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            MapContainer::new(&mut map)
                .with_absent_values(AbsentValuePolicy::WriteNull)
                .encode_if_converted("gone", || Ok::<Option<u8>, S::Error>(None))?;
            map.end()
        }
    }

    assert_eq!(serde_json::to_string(&Sparse).unwrap(), r#"{"gone":null}"#);
}

#[test]
fn serializer_container_single_value() {
    let mut single = SerializerContainer::new(serde_json::value::Serializer);
    single
        .encode_with(|| Ok::<_, serde_json::Error>(format!("{}%", 42)))
        .unwrap();
    assert_eq!(single.into_ok().unwrap(), json!("42%"));
}

#[test]
fn converter_failure_surfaces_from_serialize() {
    struct Strict(u32);

    impl Serialize for Strict {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            use serde::ser::Error;

            let mut map = serializer.serialize_map(None)?;
            MapContainer::new(&mut map).encode_with("percent", || {
                if self.0 > 100 {
                    return Err(S::Error::custom(format!("{} is not a percentage", self.0)));
                }
                Ok(self.0)
            })?;
            map.end()
        }
    }

    assert_eq!(serde_json::to_string(&Strict(7)).unwrap(), r#"{"percent":7}"#);
    let err = serde_json::to_string(&Strict(120)).unwrap_err();
    assert_eq!(err.to_string(), "120 is not a percentage");
}
