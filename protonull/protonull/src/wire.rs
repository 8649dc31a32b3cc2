//! Nullable message stored in protobuf wire format.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    codec::{self, JsonOptions},
    error::{NullableError, PayloadFormat, Result},
    message::MessageHandle,
    policy::TextDecodePolicy,
    storage::{ScanStorage, StorageValue, StorageValuer},
};

/// A protobuf message that may be absent, persisted in wire format.
///
/// `valid` alone decides whether the container stands for SQL `NULL` /
/// JSON `null`; a valid container may hold an all-default message. The JSON
/// boundary uses the canonical JSON mapping, the text and storage
/// boundaries carry wire-format bytes.
///
/// Moving to the invalid state never clears `object`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireNullable<T> {
    pub object: T,
    pub valid: bool,
}

impl<T: MessageHandle> WireNullable<T> {
    pub const fn new(object: T, valid: bool) -> Self {
        Self { object, valid }
    }

    /// Wrap `object`, valid unless the handle is missing.
    ///
    /// A present but all-default message counts as set.
    pub fn from_message(object: T) -> Self {
        let valid = !object.is_missing();
        Self::new(object, valid)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn object(&self) -> &T {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut T {
        &mut self.object
    }

    /// The object if the container is valid.
    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.object)
    }

    pub fn into_inner(self) -> T {
        self.object
    }

    /// Canonical JSON of the message, or `null` when invalid.
    pub fn encode_json(&self) -> Result<Vec<u8>> {
        self.encode_json_with_options(&JsonOptions::default())
    }

    pub fn encode_json_with_options(&self, options: &JsonOptions) -> Result<Vec<u8>> {
        codec::encode_json(&self.object, self.valid, options)
    }

    /// Decode canonical JSON; `null` marks the container invalid.
    pub fn decode_json(&mut self, data: &[u8]) -> Result<()> {
        self.decode_json_with_options(data, &JsonOptions::default())
    }

    pub fn decode_json_with_options(&mut self, data: &[u8], options: &JsonOptions) -> Result<()> {
        codec::decode_json(&mut self.object, &mut self.valid, data, options)
    }

    /// Wire-format bytes of the message; empty when invalid.
    ///
    /// An all-default message also encodes to nothing, which the text
    /// decoder reads back as absence.
    pub fn encode_text(&self) -> Vec<u8> {
        if !self.valid {
            return Vec::new();
        }
        self.object.encode_wire()
    }

    /// Decode wire-format bytes with [`TextDecodePolicy::Legacy`].
    ///
    /// The container is invalid afterwards in every case; see
    /// [`decode_text_with_policy`](Self::decode_text_with_policy).
    pub fn decode_text(&mut self, data: &[u8]) -> Result<()> {
        self.decode_text_with_policy(data, TextDecodePolicy::default())
    }

    /// Decode wire-format bytes.
    ///
    /// Empty input means absence: the container becomes invalid and the
    /// codec is not run, though a missing object is still materialized.
    /// Otherwise the payload replaces the object and `policy` decides the
    /// resulting validity. On error `valid` is unchanged.
    pub fn decode_text_with_policy(&mut self, data: &[u8], policy: TextDecodePolicy) -> Result<()> {
        self.object.materialize();

        if data.is_empty() {
            self.valid = false;
            return Ok(());
        }

        self.object
            .decode_wire(data)
            .map_err(|e| NullableError::decode(PayloadFormat::Wire, e))?;
        self.valid = policy.valid_after_decode();
        Ok(())
    }
}

impl<T: MessageHandle> ScanStorage for WireNullable<T> {
    /// Accepts `NULL` or wire-format bytes. Unlike the text decoder, a
    /// successful decode marks the container valid, and empty bytes are an
    /// all-default message.
    fn scan(&mut self, value: StorageValue) -> Result<()> {
        let bytes = match value {
            StorageValue::Null => {
                self.valid = false;
                return Ok(());
            }
            StorageValue::Bytes(bytes) => bytes,
            other => {
                return Err(NullableError::UnsupportedStorageType {
                    value_type: other.type_name(),
                    target: "WireNullable",
                });
            }
        };

        self.object.materialize();
        self.object
            .decode_wire(&bytes)
            .map_err(|e| NullableError::decode(PayloadFormat::Wire, e))?;
        self.valid = true;
        Ok(())
    }
}

impl<T: MessageHandle> StorageValuer for WireNullable<T> {
    fn value(&self) -> Result<StorageValue> {
        if !self.valid {
            return Ok(StorageValue::Null);
        }
        Ok(StorageValue::Bytes(self.object.encode_wire()))
    }
}

impl<T: MessageHandle> From<T> for WireNullable<T> {
    fn from(object: T) -> Self {
        Self::from_message(object)
    }
}

impl<T: MessageHandle> Serialize for WireNullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        codec::serialize_nullable(&self.object, self.valid, serializer)
    }
}

impl<'de, T: MessageHandle + Default> Deserialize<'de> for WireNullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (object, valid) = codec::deserialize_nullable(deserializer)?;
        Ok(Self::new(object, valid))
    }
}
