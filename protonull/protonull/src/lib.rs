//! Nullable wrappers for protobuf messages.
//!
//! A protobuf message can be absent in three different ways depending on the
//! boundary it crosses: a SQL `NULL` column, a JSON `null`, or an empty
//! payload. This crate provides two containers that keep "never set" apart
//! from "set to an all-default message" across all of them:
//!
//! * [`WireNullable`] stores the message in protobuf wire format and uses the
//!   canonical JSON mapping only for its JSON boundary.
//! * [`JsonNullable`] uses the canonical JSON mapping everywhere; its text
//!   boundary is an alias of the JSON one.
//!
//! Both are generic over a [`MessageHandle`], which is implemented for
//! `Option<M>` of any generated message with reflection support and for the
//! runtime-schema [`DynamicHandle`].

mod codec;
mod dynamic;
mod error;
mod json;
mod message;
mod policy;
mod storage;
mod wire;

pub use codec::{JsonOptions, NULL_SENTINEL};
pub use dynamic::DynamicHandle;
pub use error::{NullableError, PayloadFormat, Result};
pub use json::JsonNullable;
pub use message::MessageHandle;
pub use policy::TextDecodePolicy;
pub use storage::{ScanStorage, StorageValue, StorageValuer};
pub use wire::WireNullable;

pub use prost_reflect;
