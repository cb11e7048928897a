//! Error types for membership graph construction

use thiserror::Error;

/// Result type alias for membership operations
pub type Result<T> = std::result::Result<T, MembershipError>;

/// Errors raised while building a membership graph or decoding a snapshot
///
/// Cycles and dangling parent references are valid directory states and are
/// never reported here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Two entries in one snapshot share a distinguished name
    #[error("duplicate directory identity '{identity}'")]
    DuplicateIdentity { identity: String },

    /// A serialized snapshot could not be decoded
    #[error("invalid directory snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

impl From<serde_json::Error> for MembershipError {
    fn from(err: serde_json::Error) -> Self {
        MembershipError::InvalidSnapshot {
            reason: err.to_string(),
        }
    }
}
