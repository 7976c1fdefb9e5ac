//! Domain error types.
//!
//! These errors represent values that violate a domain invariant. They are
//! raised while a dataset is being turned into domain types and never by a
//! query.

use super::{InvalidId, NodeId, TimeError};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Malformed identifier
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// Malformed clock value
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// Trip stop sequence violates an invariant
    #[error("invalid trip: {0}")]
    InvalidTrip(&'static str),

    /// Negative or non-finite edge weight
    #[error("invalid edge: {0}")]
    InvalidEdge(&'static str),

    /// A record references a node that is not in the graph
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClockTime;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidTrip("needs at least two stops");
        assert_eq!(err.to_string(), "invalid trip: needs at least two stops");

        let err = DomainError::InvalidEdge("time must not be negative");
        assert_eq!(err.to_string(), "invalid edge: time must not be negative");

        let err = DomainError::UnknownNode(NodeId::parse("NOWHERE").unwrap());
        assert_eq!(err.to_string(), "unknown node NOWHERE");

        let err: DomainError = ClockTime::parse_hhmm("7am").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid time: expected HH:MM format");
    }
}
