//! Encoder configuration.

/// What `encode_if_present` does with an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentValuePolicy {
    /// Leave the key out of the output.
    #[default]
    Omit,
    /// Write an explicit null under the key.
    WriteNull,
}

/// Options for [`crate::value::ValueEncoder`] and [`crate::json::JsonEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderOptions {
    pub absent_values: AbsentValuePolicy,
    /// Pretty-print JSON output.
    pub pretty: bool,
}
