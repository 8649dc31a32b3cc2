/// Policy for the validity flag after a [`WireNullable`](crate::WireNullable)
/// text decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecodePolicy {
    /// Compatibility behavior (default):
    ///
    /// The container always ends up invalid, even after successfully
    /// decoding a non-empty payload. Storage scans do not share this
    /// behavior.
    #[default]
    Legacy,
    /// A successful non-empty decode marks the container valid, matching
    /// the JSON and storage boundaries. Empty input still means absence.
    MarkValid,
}

impl TextDecodePolicy {
    pub(crate) fn valid_after_decode(self) -> bool {
        match self {
            Self::Legacy => false,
            Self::MarkValid => true,
        }
    }
}
