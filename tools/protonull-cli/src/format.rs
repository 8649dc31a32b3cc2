use clap::ValueEnum;
use protonull::TextDecodePolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum PayloadKind {
    /// Canonical protobuf JSON; `null` means absent
    Json,
    /// Wire format through the text boundary; empty means absent
    Text,
    /// Wire format as stored in a database column; always present
    Wire,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum TextPolicyArg {
    Legacy,
    MarkValid,
}

impl From<TextPolicyArg> for TextDecodePolicy {
    fn from(arg: TextPolicyArg) -> Self {
        match arg {
            TextPolicyArg::Legacy => TextDecodePolicy::Legacy,
            TextPolicyArg::MarkValid => TextDecodePolicy::MarkValid,
        }
    }
}
