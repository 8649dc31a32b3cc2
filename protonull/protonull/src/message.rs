//! The message capability every nullable wrapper is generic over.

use prost_reflect::{DynamicMessage, MessageDescriptor, ReflectMessage};

/// A handle to a protobuf message that may be in a missing state.
///
/// "Missing" means no instance has been materialized at all, which is not
/// the same as an instance whose fields all hold their defaults. A missing
/// handle must still know its concrete message type, so that
/// [`new_instance`](Self::new_instance) and [`descriptor`](Self::descriptor)
/// work on it.
pub trait MessageHandle: Sized {
    /// Returns `true` if no message instance has been materialized.
    fn is_missing(&self) -> bool;

    /// Produce a fresh, independent, default-valued instance of the same
    /// concrete message type.
    fn new_instance(&self) -> Self;

    /// Reflection descriptor of the concrete message type.
    fn descriptor(&self) -> MessageDescriptor;

    /// Encode to protobuf wire format. A missing handle encodes like a
    /// default instance.
    fn encode_wire(&self) -> Vec<u8>;

    /// Replace the content with the message decoded from `buf`.
    ///
    /// On error the previous content is left in place.
    fn decode_wire(&mut self, buf: &[u8]) -> Result<(), prost::DecodeError>;

    /// View the message as a [`DynamicMessage`]. A missing handle yields a
    /// default instance.
    fn to_dynamic(&self) -> DynamicMessage;

    /// Replace the content with `message`, which must describe the same
    /// message type.
    fn set_dynamic(&mut self, message: &DynamicMessage) -> Result<(), prost::DecodeError>;

    /// Replace a missing handle with a default instance; no-op otherwise.
    fn materialize(&mut self) {
        if self.is_missing() {
            *self = self.new_instance();
        }
    }
}

/// `None` is the missing form; the message type itself provides the default.
impl<M> MessageHandle for Option<M>
where
    M: ReflectMessage + Default,
{
    fn is_missing(&self) -> bool {
        self.is_none()
    }

    fn new_instance(&self) -> Self {
        Some(M::default())
    }

    fn descriptor(&self) -> MessageDescriptor {
        match self {
            Some(message) => message.descriptor(),
            None => M::default().descriptor(),
        }
    }

    fn encode_wire(&self) -> Vec<u8> {
        self.as_ref()
            .map(|message| message.encode_to_vec())
            .unwrap_or_default()
    }

    fn decode_wire(&mut self, buf: &[u8]) -> Result<(), prost::DecodeError> {
        *self = Some(M::decode(buf)?);
        Ok(())
    }

    fn to_dynamic(&self) -> DynamicMessage {
        match self {
            Some(message) => message.transcode_to_dynamic(),
            None => DynamicMessage::new(self.descriptor()),
        }
    }

    fn set_dynamic(&mut self, message: &DynamicMessage) -> Result<(), prost::DecodeError> {
        *self = Some(message.transcode_to::<M>()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use prost_types::Duration;

    use super::*;

    type Empty = ();

    #[test]
    fn none_is_missing_and_factory_materializes_default() {
        let handle: Option<Duration> = None;
        assert!(handle.is_missing());

        let fresh = handle.new_instance();
        assert!(!fresh.is_missing());
        assert_eq!(fresh, Some(Duration::default()));
    }

    #[test]
    fn descriptor_is_known_without_an_instance() {
        let handle: Option<Empty> = None;
        assert_eq!(handle.descriptor().full_name(), "google.protobuf.Empty");
    }

    #[test]
    fn materialize_keeps_existing_content() {
        let mut handle = Some(Duration {
            seconds: 7,
            nanos: 0,
        });
        handle.materialize();
        assert_eq!(handle.map(|d| d.seconds), Some(7));

        let mut missing: Option<Duration> = None;
        missing.materialize();
        assert_eq!(missing, Some(Duration::default()));
    }

    #[test]
    fn failed_wire_decode_keeps_previous_content() {
        let mut handle = Some(Duration {
            seconds: 3,
            nanos: 0,
        });
        assert!(handle.decode_wire(&[0xff, 0xff]).is_err());
        assert_eq!(handle.map(|d| d.seconds), Some(3));
    }

    #[test]
    fn dynamic_round_trip_preserves_fields() {
        let handle = Some(Duration {
            seconds: 12,
            nanos: 5,
        });
        let dynamic = handle.to_dynamic();

        let mut target: Option<Duration> = None;
        target.set_dynamic(&dynamic).unwrap();
        assert_eq!(target, handle);
    }
}
