//! Property tests: converting helpers behave exactly like the plain
//! container operation followed by the conversion.

use codable_containers::{DecodingError, EncodingError, ValueDecoder, ValueEncoder};
use codable_containers_ext::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

fn convert(raw: i64) -> Result<String, DecodingError> {
    Ok(format!("#{raw}"))
}

proptest! {
    #[test]
    fn keyed_decode_with_equals_convert_of_plain_decode(key in "[a-z]{1,8}", value in any::<i64>()) {
        let doc = json!({ key.clone(): value });
        let keyed = ValueDecoder::new(&doc).keyed_container().unwrap();

        let plain = keyed.decode::<i64>(&key).unwrap();
        prop_assert_eq!(keyed.decode_with(&key, convert).unwrap(), convert(plain).unwrap());
    }

    #[test]
    fn keyed_decode_if_present_with_is_none_exactly_when_absent_null_or_rejected(
        value in proptest::option::of(any::<i32>()),
        present in any::<bool>(),
        accept in any::<bool>(),
    ) {
        let doc = if present { json!({ "k": value }) } else { json!({}) };
        let keyed = ValueDecoder::new(&doc).keyed_container().unwrap();

        let result = keyed
            .decode_if_present_with("k", |v: i32| Ok::<_, DecodingError>(accept.then_some(v)))
            .unwrap();
        let expected = if present && accept { value } else { None };
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn type_mismatch_is_identical_and_skips_conversion(text in "[a-z]{1,12}") {
        let doc = json!({ "n": text });
        let keyed = ValueDecoder::new(&doc).keyed_container().unwrap();

        let plain = keyed.decode::<i64>("n").unwrap_err();
        let converted = keyed
            .decode_with("n", |_: i64| -> Result<(), DecodingError> {
                panic!("conversion must not run after a type mismatch")
            })
            .unwrap_err();
        prop_assert_eq!(plain, converted);
    }

    #[test]
    fn sequence_cursor_advances_like_plain_decode(values in proptest::collection::vec(any::<u16>(), 0..16), take in 0usize..16) {
        let doc = Value::from(values.clone());
        let take = take.min(values.len());

        let mut plain = ValueDecoder::new(&doc).unkeyed_container().unwrap();
        let mut converting = ValueDecoder::new(&doc).unkeyed_container().unwrap();
        for expected in values.iter().take(take) {
            let a = plain.decode::<u16>().unwrap();
            let b = converting
                .decode_with(|v: u16| Ok::<_, DecodingError>(u32::from(v) * 2))
                .unwrap();
            prop_assert_eq!(a, *expected);
            prop_assert_eq!(b, u32::from(*expected) * 2);
        }
        prop_assert_eq!(plain.current_index(), take);
        prop_assert_eq!(converting.current_index(), take);
        prop_assert_eq!(converting.is_at_end(), take == values.len());
    }

    #[test]
    fn encode_with_round_trips(key in "[a-z]{1,8}", value in any::<i64>(), emit in any::<bool>()) {
        let mut encoder = ValueEncoder::new();
        {
            let mut keyed = encoder.keyed_container().unwrap();
            keyed.encode_with(&key, || Ok::<_, EncodingError>(value.to_string())).unwrap();
            keyed
                .encode_if_converted("extra", || Ok::<_, EncodingError>(emit.then_some(value)))
                .unwrap();
        }
        let doc = encoder.finish().unwrap();
        let keyed = ValueDecoder::new(&doc).keyed_container().unwrap();

        prop_assert_eq!(keyed.decode::<String>(&key).unwrap(), value.to_string());
        prop_assert_eq!(keyed.contains("extra"), emit);
        if emit {
            prop_assert_eq!(keyed.decode::<i64>("extra").unwrap(), value);
        }
    }

    #[test]
    fn sequence_encode_with_appends_in_order(values in proptest::collection::vec(any::<i32>(), 0..16)) {
        let mut encoder = ValueEncoder::new();
        {
            let mut seq = encoder.unkeyed_container().unwrap();
            for v in &values {
                seq.encode_with(|| Ok::<_, EncodingError>(i64::from(*v) + 1)).unwrap();
            }
            prop_assert_eq!(seq.count(), values.len());
        }
        let expected: Vec<i64> = values.iter().map(|v| i64::from(*v) + 1).collect();
        prop_assert_eq!(encoder.finish().unwrap(), Value::from(expected));
    }
}
