use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use protonull::{
    DynamicHandle, ScanStorage, StorageValue, StorageValuer, TextDecodePolicy, WireNullable,
};

use crate::{
    format::{PayloadKind, TextPolicyArg},
    io::{load_handle, read_input, write_output},
};

#[derive(Args)]
pub struct ConvertArgs {
    /// Serialized FileDescriptorSet containing the message type
    #[arg(short, long)]
    descriptor_set: PathBuf,

    /// Fully-qualified message name (e.g. my.package.MyMessage)
    #[arg(short, long)]
    message: String,

    /// Representation of the input
    #[arg(long, value_enum)]
    from: PayloadKind,

    /// Representation of the output
    #[arg(long, value_enum, default_value_t = PayloadKind::Json)]
    to: PayloadKind,

    /// Validity of the payload after a text decode
    #[arg(long, value_enum, default_value_t = TextPolicyArg::MarkValid)]
    text_policy: TextPolicyArg,

    /// Input file (stdin if not specified)
    input: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let handle = load_handle(&self.descriptor_set, &self.message)?;
        let input = read_input(self.input.as_deref())?;
        let mut output = convert(
            handle,
            &input,
            self.from,
            self.to,
            self.text_policy.into(),
        )?;
        if self.to == PayloadKind::Json && self.output.is_none() {
            output.push(b'\n');
        }
        write_output(self.output.as_deref(), &output)
    }
}

fn convert(
    handle: DynamicHandle,
    input: &[u8],
    from: PayloadKind,
    to: PayloadKind,
    text_policy: TextDecodePolicy,
) -> Result<Vec<u8>> {
    let mut nullable = WireNullable::new(handle, false);
    match from {
        PayloadKind::Json => nullable.decode_json(input.trim_ascii())?,
        PayloadKind::Text => nullable.decode_text_with_policy(input, text_policy)?,
        PayloadKind::Wire => nullable.scan(StorageValue::Bytes(input.to_vec()))?,
    }

    let output = match to {
        PayloadKind::Json => nullable.encode_json()?,
        PayloadKind::Text => nullable.encode_text(),
        PayloadKind::Wire => match nullable.value()? {
            StorageValue::Bytes(bytes) => bytes,
            _ => bail!("payload is null and has no wire-format column value"),
        },
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use prost_types::Duration;
    use protonull::{MessageHandle, prost_reflect::ReflectMessage};

    use super::*;

    fn duration_handle() -> DynamicHandle {
        DynamicHandle::missing(Duration::default().descriptor())
    }

    fn wire(seconds: i64) -> Vec<u8> {
        Some(Duration { seconds, nanos: 0 }).encode_wire()
    }

    #[test]
    fn json_to_wire() {
        let out = convert(
            duration_handle(),
            b"\"30s\"\n",
            PayloadKind::Json,
            PayloadKind::Wire,
            TextDecodePolicy::MarkValid,
        )
        .unwrap();
        assert_eq!(out, wire(30));
    }

    #[test]
    fn wire_to_json() {
        let out = convert(
            duration_handle(),
            &wire(2),
            PayloadKind::Wire,
            PayloadKind::Json,
            TextDecodePolicy::MarkValid,
        )
        .unwrap();
        assert_eq!(out, b"\"2s\"");
    }

    #[test]
    fn null_json_cannot_become_a_wire_column() {
        let result = convert(
            duration_handle(),
            b"null\n",
            PayloadKind::Json,
            PayloadKind::Wire,
            TextDecodePolicy::MarkValid,
        );
        assert!(result.is_err());
    }

    #[test]
    fn legacy_text_policy_turns_payload_into_null() {
        let out = convert(
            duration_handle(),
            &wire(4),
            PayloadKind::Text,
            PayloadKind::Json,
            TextDecodePolicy::Legacy,
        )
        .unwrap();
        assert_eq!(out, b"null");
    }

    #[test]
    fn empty_text_is_null() {
        let out = convert(
            duration_handle(),
            b"",
            PayloadKind::Text,
            PayloadKind::Json,
            TextDecodePolicy::MarkValid,
        )
        .unwrap();
        assert_eq!(out, b"null");
    }
}
