//! Null-aware glue around the structured-JSON codec.
//!
//! JSON goes through [`DynamicMessage`]'s serde support, which implements the
//! canonical protobuf JSON mapping. The wire codec lives on
//! [`MessageHandle`] itself.

use std::fmt;

use prost_reflect::{DeserializeOptions, DynamicMessage, MessageDescriptor, SerializeOptions};
use serde::{
    Deserializer, Serializer,
    de::{self, Visitor},
};

use crate::{
    error::{NullableError, PayloadFormat, Result},
    message::MessageHandle,
};

/// Bytes recognized as JSON `null` by the JSON boundary.
///
/// Matched exactly; surrounding whitespace makes the input an ordinary
/// payload.
pub const NULL_SENTINEL: &[u8] = b"null";

/// Options for the structured-JSON codec.
///
/// The default follows the canonical mapping: lowerCamelCase field names,
/// default-valued fields omitted, enums by name, 64-bit integers as strings,
/// and unknown fields rejected when decoding.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    pub serialize: SerializeOptions,
    pub deserialize: DeserializeOptions,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            serialize: SerializeOptions::new(),
            deserialize: DeserializeOptions::new(),
        }
    }
}

/// Encode `object`, or the null sentinel if `valid` is false.
pub(crate) fn encode_json<T: MessageHandle>(
    object: &T,
    valid: bool,
    options: &JsonOptions,
) -> Result<Vec<u8>> {
    if !valid {
        return Ok(NULL_SENTINEL.to_vec());
    }

    let message = object.to_dynamic();
    let mut serializer = serde_json::Serializer::new(Vec::new());
    message
        .serialize_with_options(&mut serializer, &options.serialize)
        .map_err(|e| NullableError::codec(PayloadFormat::Json, e))?;
    Ok(serializer.into_inner())
}

/// Decode `data` into `object`, flipping `valid` accordingly.
///
/// The null sentinel only clears `valid`; the held object is not touched.
/// On error `valid` is left as it was.
pub(crate) fn decode_json<T: MessageHandle>(
    object: &mut T,
    valid: &mut bool,
    data: &[u8],
    options: &JsonOptions,
) -> Result<()> {
    if data == NULL_SENTINEL {
        *valid = false;
        return Ok(());
    }

    object.materialize();

    let mut deserializer = serde_json::Deserializer::from_slice(data);
    let message = DynamicMessage::deserialize_with_options(
        object.descriptor(),
        &mut deserializer,
        &options.deserialize,
    )
    .and_then(|message| deserializer.end().map(|()| message))
    .map_err(|e| NullableError::decode(PayloadFormat::Json, e))?;

    object
        .set_dynamic(&message)
        .map_err(|e| NullableError::decode(PayloadFormat::Json, e))?;
    *valid = true;
    Ok(())
}

/// serde hook shared by both wrappers' `Serialize` impls.
pub(crate) fn serialize_nullable<T, S>(
    object: &T,
    valid: bool,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: MessageHandle,
    S: Serializer,
{
    if !valid {
        return serializer.serialize_none();
    }
    object
        .to_dynamic()
        .serialize_with_options(serializer, &SerializeOptions::new())
}

/// serde hook shared by both wrappers' `Deserialize` impls.
///
/// Starts from a zero-initialized handle and returns it with the validity
/// flag established by the input.
pub(crate) fn deserialize_nullable<'de, T, D>(deserializer: D) -> Result<(T, bool), D::Error>
where
    T: MessageHandle + Default,
    D: Deserializer<'de>,
{
    let mut object = T::default();
    let visitor = NullableVisitor {
        descriptor: object.descriptor(),
    };
    match deserializer.deserialize_option(visitor)? {
        None => Ok((object, false)),
        Some(message) => {
            object
                .set_dynamic(&message)
                .map_err(<D::Error as de::Error>::custom)?;
            Ok((object, true))
        }
    }
}

struct NullableVisitor {
    descriptor: MessageDescriptor,
}

impl<'de> Visitor<'de> for NullableVisitor {
    type Value = Option<DynamicMessage>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "null or a '{}' message", self.descriptor.full_name())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        DynamicMessage::deserialize(self.descriptor, deserializer).map(Some)
    }
}
