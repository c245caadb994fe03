//! Decoding and encoding error types.

use thiserror::Error;

use crate::coding_path::CodingPath;

/// Where an error happened and a human-readable description of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub coding_path: CodingPath,
    pub debug_description: String,
}

impl Context {
    pub fn new(coding_path: CodingPath, debug_description: impl Into<String>) -> Self {
        Self {
            coding_path,
            debug_description: debug_description.into(),
        }
    }
}

/// Failure while reading a value out of a decoding container.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodingError {
    #[error("no value associated with key `{key}` at {}: {}", .context.coding_path, .context.debug_description)]
    KeyNotFound { key: String, context: Context },
    #[error("expected {expected} but found null at {}: {}", .context.coding_path, .context.debug_description)]
    ValueNotFound {
        expected: &'static str,
        context: Context,
    },
    #[error("expected {expected} at {}: {}", .context.coding_path, .context.debug_description)]
    TypeMismatch {
        expected: &'static str,
        context: Context,
    },
    #[error("data corrupted at {}: {}", .context.coding_path, .context.debug_description)]
    DataCorrupted { context: Context },
}

impl DecodingError {
    pub fn context(&self) -> &Context {
        match self {
            DecodingError::KeyNotFound { context, .. }
            | DecodingError::ValueNotFound { context, .. }
            | DecodingError::TypeMismatch { context, .. }
            | DecodingError::DataCorrupted { context } => context,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.context().coding_path
    }
}

/// Failure while writing a value into an encoding container.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid value at {}: {}", .context.coding_path, .context.debug_description)]
    InvalidValue { context: Context },
}

impl EncodingError {
    pub fn invalid_value(coding_path: CodingPath, description: impl Into<String>) -> Self {
        EncodingError::InvalidValue {
            context: Context::new(coding_path, description),
        }
    }

    pub fn context(&self) -> &Context {
        match self {
            EncodingError::InvalidValue { context } => context,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.context().coding_path
    }
}
