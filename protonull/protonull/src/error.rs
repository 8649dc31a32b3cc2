//! Error types for the nullable wrappers.

use std::fmt;

/// Payload representation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadFormat {
    /// Canonical protobuf JSON mapping.
    Json,
    /// Protobuf binary wire format.
    Wire,
}

impl PayloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Wire => "wire",
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by [`WireNullable`](crate::WireNullable),
/// [`JsonNullable`](crate::JsonNullable) and [`DynamicHandle`](crate::DynamicHandle).
#[derive(Debug, thiserror::Error)]
pub enum NullableError {
    /// Payload bytes do not conform to the message schema.
    #[error("failed to decode {format} payload: {source}")]
    Decode {
        format: PayloadFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The storage layer handed over something other than `NULL` or bytes.
    #[error("unsupported scan, storing storage value of type {value_type} into {target}")]
    UnsupportedStorageType {
        value_type: &'static str,
        target: &'static str,
    },

    /// The codec rejected an in-memory message during encoding.
    #[error("failed to encode message as {format}: {source}")]
    Codec {
        format: PayloadFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A serialized `FileDescriptorSet` could not be parsed.
    #[error("failed to parse descriptor set: {source}")]
    SchemaParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested message is not part of the descriptor set.
    #[error("message descriptor not found: '{name}'")]
    MessageNotFound { name: String },
}

impl NullableError {
    pub(crate) fn decode<E>(format: PayloadFormat, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            format,
            source: Box::new(source),
        }
    }

    pub(crate) fn codec<E>(format: PayloadFormat, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Codec {
            format,
            source: Box::new(source),
        }
    }
}

pub type Result<T, E = NullableError> = std::result::Result<T, E>;
