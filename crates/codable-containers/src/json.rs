//! JSON byte-level entry points over the value containers.

use serde_json::Value;

use crate::coding_path::CodingPath;
use crate::error::{Context, DecodingError, EncodingError};
use crate::options::EncoderOptions;
use crate::value::{ValueDecoder, ValueEncoder};

/// Parses JSON and hands the document to a decode closure.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Parses `bytes` and runs `decode` against the document root.
    ///
    /// Malformed input fails with [`DecodingError::DataCorrupted`] before
    /// `decode` runs.
    pub fn decode<R, E, F>(&self, bytes: &[u8], decode: F) -> Result<R, E>
    where
        F: FnOnce(&ValueDecoder<'_>) -> Result<R, E>,
        E: From<DecodingError>,
    {
        let value: Value = serde_json::from_slice(bytes).map_err(|err| {
            tracing::trace!(error = %err, "malformed JSON input");
            DecodingError::DataCorrupted {
                context: Context::new(CodingPath::new(), err.to_string()),
            }
        })?;
        decode(&ValueDecoder::new(&value))
    }
}

/// Runs an encode closure and serializes what it wrote as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    pub options: EncoderOptions,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self { options }
    }

    pub fn encode<E, F>(&self, encode: F) -> Result<Vec<u8>, E>
    where
        F: FnOnce(&mut ValueEncoder) -> Result<(), E>,
        E: From<EncodingError>,
    {
        let mut encoder = ValueEncoder::with_options(self.options);
        encode(&mut encoder)?;
        let value = encoder.finish()?;
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(&value)
        } else {
            serde_json::to_vec(&value)
        };
        bytes.map_err(|err| E::from(EncodingError::invalid_value(CodingPath::new(), err.to_string())))
    }
}
