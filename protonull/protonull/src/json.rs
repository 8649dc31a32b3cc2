//! Nullable message stored as canonical protobuf JSON.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    codec::{self, JsonOptions},
    error::{NullableError, Result},
    message::MessageHandle,
    storage::{ScanStorage, StorageValue, StorageValuer},
};

/// A protobuf message that may be absent, persisted as canonical JSON.
///
/// Same container semantics as [`WireNullable`](crate::WireNullable), but
/// every boundary speaks JSON: the text methods are aliases of the JSON
/// ones, and storage columns hold JSON bytes. A successful decode always
/// marks the container valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonNullable<T> {
    pub object: T,
    pub valid: bool,
}

impl<T: MessageHandle> JsonNullable<T> {
    pub const fn new(object: T, valid: bool) -> Self {
        Self { object, valid }
    }

    /// Wrap `object`, valid unless the handle is missing.
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

    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.object)
    }

    pub fn into_inner(self) -> T {
        self.object
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        self.encode_json_with_options(&JsonOptions::default())
    }

    pub fn encode_json_with_options(&self, options: &JsonOptions) -> Result<Vec<u8>> {
        codec::encode_json(&self.object, self.valid, options)
    }

    pub fn decode_json(&mut self, data: &[u8]) -> Result<()> {
        self.decode_json_with_options(data, &JsonOptions::default())
    }

    pub fn decode_json_with_options(&mut self, data: &[u8], options: &JsonOptions) -> Result<()> {
        codec::decode_json(&mut self.object, &mut self.valid, data, options)
    }

    /// Alias of [`encode_json`](Self::encode_json).
    pub fn encode_text(&self) -> Result<Vec<u8>> {
        self.encode_json()
    }

    /// Alias of [`decode_json`](Self::decode_json).
    pub fn decode_text(&mut self, data: &[u8]) -> Result<()> {
        self.decode_json(data)
    }
}

impl<T: MessageHandle> ScanStorage for JsonNullable<T> {
    fn scan(&mut self, value: StorageValue) -> Result<()> {
        match value {
            StorageValue::Null => {
                self.valid = false;
                Ok(())
            }
            StorageValue::Bytes(bytes) => self.decode_json(&bytes),
            other => Err(NullableError::UnsupportedStorageType {
                value_type: other.type_name(),
                target: "JsonNullable",
            }),
        }
    }
}

impl<T: MessageHandle> StorageValuer for JsonNullable<T> {
    fn value(&self) -> Result<StorageValue> {
        if !self.valid {
            return Ok(StorageValue::Null);
        }
        self.encode_json().map(StorageValue::Bytes)
    }
}

impl<T: MessageHandle> From<T> for JsonNullable<T> {
    fn from(object: T) -> Self {
        Self::from_message(object)
    }
}

impl<T: MessageHandle> Serialize for JsonNullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        codec::serialize_nullable(&self.object, self.valid, serializer)
    }
}

impl<'de, T: MessageHandle + Default> Deserialize<'de> for JsonNullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (object, valid) = codec::deserialize_nullable(deserializer)?;
        Ok(Self::new(object, valid))
    }
}
