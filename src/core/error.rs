//! Error types for the octree

use std::collections::TryReserveError;

use thiserror::Error;

/// Main error type for the octree
#[derive(Debug, Error)]
pub enum Error {
    #[error("node store allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    #[error("invalid location code {0:#x}")]
    InvalidCode(u64),

    /// A store invariant is broken. The octree must be discarded.
    #[error("inconsistent octree state: {0}")]
    InconsistentState(String),

    #[error("maximum depth {depth} exceeded while separating objects")]
    DepthExceeded { depth: u32 },

    #[error("objects {existing} and {incoming} share the same position")]
    DuplicatePosition { existing: usize, incoming: usize },

    #[error("object {object} has no position among {len} inputs")]
    MissingPosition { object: usize, len: usize },

    #[error("octree already holds a built batch; clear it before building again")]
    AlreadyBuilt,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors after which the octree can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InconsistentState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_inconsistent_state_is_fatal() {
        assert!(Error::InconsistentState("missing parent".into()).is_fatal());
        assert!(!Error::InvalidCode(0).is_fatal());
        assert!(!Error::DepthExceeded { depth: 21 }.is_fatal());
        assert!(!Error::DuplicatePosition { existing: 0, incoming: 1 }.is_fatal());
        assert!(!Error::AlreadyBuilt.is_fatal());
        assert!(!Error::MissingPosition { object: 3, len: 1 }.is_fatal());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::InvalidCode(0).to_string(), "invalid location code 0x0");
        assert_eq!(
            Error::DuplicatePosition { existing: 2, incoming: 5 }.to_string(),
            "objects 2 and 5 share the same position"
        );
    }
}
