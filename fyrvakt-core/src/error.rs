use thiserror::Error;

/// Structural defects that keep a raw packet out of the analyzer pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("packet field `{0}` is missing")]
    MissingField(&'static str),

    #[error("packet field `{field}` must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}
