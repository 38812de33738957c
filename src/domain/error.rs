//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::tree::NodeId;

/// Domain errors represent violations of the referral tree model.
/// These are independent of how the tree was fetched or displayed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("referral record without a name at {location}")]
    MissingName { location: String },

    #[error("invalid container size: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
