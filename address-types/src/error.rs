use crate::address::RecordKind;

/// Errors raised while turning raw address records into canonical ones.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The record carries neither a `pk` nor an `original` reference, so no
    /// canonical identity can be derived from it.
    #[error("Invalid {kind} record: neither pk nor original is set")]
    InvalidRecord { kind: RecordKind },

    /// The payload does not have the shape of any address record.
    #[error("Malformed address record: {reason}")]
    MalformedRecord { reason: String },
}
