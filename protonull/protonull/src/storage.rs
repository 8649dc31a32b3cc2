//! Storage-layer value contract.
//!
//! A database driver hands a column to [`ScanStorage::scan`] as a
//! [`StorageValue`] and receives one back from [`StorageValuer::value`].
//! Nullable wrappers only understand `NULL` and byte sequences.

use crate::error::Result;

/// A dynamically typed column value as exchanged with a database driver.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageValue {
    /// SQL `NULL`.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl StorageValue {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for StorageValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for StorageValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Option<Vec<u8>>> for StorageValue {
    fn from(bytes: Option<Vec<u8>>) -> Self {
        bytes.map_or(Self::Null, Self::Bytes)
    }
}

/// Populate a value from a storage column.
pub trait ScanStorage {
    fn scan(&mut self, value: StorageValue) -> Result<()>;
}

/// Produce the storage column for a value.
pub trait StorageValuer {
    fn value(&self) -> Result<StorageValue>;
}
