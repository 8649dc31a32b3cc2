//! Runtime-schema message handle backed by [`DynamicMessage`].

use prost::Message;
use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor, ReflectMessage};

use crate::{
    error::{NullableError, Result},
    message::MessageHandle,
};

/// A [`MessageHandle`] for message types only known at runtime.
///
/// The descriptor travels with the handle, so even the missing form can
/// produce a default instance of its type.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicHandle {
    descriptor: MessageDescriptor,
    message: Option<DynamicMessage>,
}

impl DynamicHandle {
    /// Missing handle for the given message type.
    pub fn missing(descriptor: MessageDescriptor) -> Self {
        Self {
            descriptor,
            message: None,
        }
    }

    /// Handle holding `message`.
    pub fn new(message: DynamicMessage) -> Self {
        Self {
            descriptor: message.descriptor(),
            message: Some(message),
        }
    }

    /// Missing handle for `message_name` looked up in a serialized
    /// `google.protobuf.FileDescriptorSet`.
    ///
    /// `message_name` is the fully-qualified protobuf message name
    /// (e.g. `"my.package.MyMessage"`).
    pub fn from_descriptor_set(descriptor_set: &[u8], message_name: &str) -> Result<Self> {
        let pool = DescriptorPool::decode(descriptor_set).map_err(|e| {
            NullableError::SchemaParse {
                source: Box::new(e),
            }
        })?;
        let descriptor = pool
            .get_message_by_name(message_name)
            .ok_or_else(|| NullableError::MessageNotFound {
                name: message_name.to_string(),
            })?;
        Ok(Self::missing(descriptor))
    }

    pub fn message(&self) -> Option<&DynamicMessage> {
        self.message.as_ref()
    }

    pub fn message_mut(&mut self) -> Option<&mut DynamicMessage> {
        self.message.as_mut()
    }

    pub fn into_message(self) -> Option<DynamicMessage> {
        self.message
    }
}

impl From<DynamicMessage> for DynamicHandle {
    fn from(message: DynamicMessage) -> Self {
        Self::new(message)
    }
}

impl MessageHandle for DynamicHandle {
    fn is_missing(&self) -> bool {
        self.message.is_none()
    }

    fn new_instance(&self) -> Self {
        Self::new(DynamicMessage::new(self.descriptor.clone()))
    }

    fn descriptor(&self) -> MessageDescriptor {
        self.descriptor.clone()
    }

    fn encode_wire(&self) -> Vec<u8> {
        self.message
            .as_ref()
            .map(|message| message.encode_to_vec())
            .unwrap_or_default()
    }

    fn decode_wire(&mut self, buf: &[u8]) -> Result<(), prost::DecodeError> {
        self.message = Some(DynamicMessage::decode(self.descriptor.clone(), buf)?);
        Ok(())
    }

    fn to_dynamic(&self) -> DynamicMessage {
        self.message
            .clone()
            .unwrap_or_else(|| DynamicMessage::new(self.descriptor.clone()))
    }

    fn set_dynamic(&mut self, message: &DynamicMessage) -> Result<(), prost::DecodeError> {
        if message.descriptor() == self.descriptor {
            self.message = Some(message.clone());
            return Ok(());
        }
        // Different descriptor instance: go through the wire format so the
        // stored message always carries this handle's descriptor.
        self.decode_wire(&message.encode_to_vec())
    }
}
