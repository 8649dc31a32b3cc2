use std::{fmt::Write, path::PathBuf};

use anyhow::Result;
use clap::Args;
use protonull::{
    DynamicHandle, JsonNullable, MessageHandle, WireNullable,
    prost_reflect::{FieldDescriptor, Kind},
};

use crate::io::{load_handle, write_output};

#[derive(Args)]
pub struct DescribeArgs {
    /// Serialized FileDescriptorSet containing the message type
    #[arg(short, long)]
    descriptor_set: PathBuf,

    /// Fully-qualified message name (e.g. my.package.MyMessage)
    #[arg(short, long)]
    message: String,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl DescribeArgs {
    pub fn run(self) -> Result<()> {
        let handle = load_handle(&self.descriptor_set, &self.message)?;
        let text = describe(handle)?;
        write_output(self.output.as_deref(), text.as_bytes())
    }
}

fn describe(handle: DynamicHandle) -> Result<String> {
    let descriptor = handle.descriptor();
    let mut text = String::new();
    writeln!(text, "message {}", descriptor.full_name())?;
    for field in descriptor.fields() {
        writeln!(
            text,
            "  {} {} ({}): {}",
            field.number(),
            field.name(),
            field.json_name(),
            field_type_name(&field)
        )?;
    }

    let absent = JsonNullable::new(handle.clone(), false);
    let default = WireNullable::from_message(handle.new_instance());
    writeln!(
        text,
        "null json: {}",
        String::from_utf8_lossy(&absent.encode_text()?)
    )?;
    writeln!(
        text,
        "default json: {}",
        String::from_utf8_lossy(&default.encode_json()?)
    )?;
    writeln!(text, "default wire bytes: {}", default.encode_text().len())?;
    Ok(text)
}

fn field_type_name(field: &FieldDescriptor) -> String {
    let name = kind_name(&field.kind());
    if field.is_map()
        && let Kind::Message(entry) = field.kind()
    {
        return format!(
            "map<{}, {}>",
            kind_name(&entry.map_entry_key_field().kind()),
            kind_name(&entry.map_entry_value_field().kind())
        );
    }
    if field.is_list() {
        return format!("repeated {name}");
    }
    name
}

fn kind_name(kind: &Kind) -> String {
    let name = match kind {
        Kind::Double => "double",
        Kind::Float => "float",
        Kind::Int32 => "int32",
        Kind::Int64 => "int64",
        Kind::Uint32 => "uint32",
        Kind::Uint64 => "uint64",
        Kind::Sint32 => "sint32",
        Kind::Sint64 => "sint64",
        Kind::Fixed32 => "fixed32",
        Kind::Fixed64 => "fixed64",
        Kind::Sfixed32 => "sfixed32",
        Kind::Sfixed64 => "sfixed64",
        Kind::Bool => "bool",
        Kind::String => "string",
        Kind::Bytes => "bytes",
        Kind::Enum(desc) => return desc.full_name().to_string(),
        Kind::Message(desc) => return desc.full_name().to_string(),
    };
    name.to_string()
}
