//! Ports and adapters infrastructure
//!
//! Each domain defines its own port traits that depend only on this
//! crate; adapters (the in-memory store, external collaborators) live in
//! infrastructure crates and implement them. `PortError` is the unified
//! error type every adapter must surface.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The entity already exists
    #[error("Already exists: {entity_type} with id {id}")]
    AlreadyExists { entity_type: String, id: String },

    /// A stale write was rejected by the version check
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates an AlreadyExists error
    pub fn already_exists(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::AlreadyExists {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if this error indicates a rejected stale write
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker to ensure they are thread-safe and
/// usable in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Customer", "CUS-123");
        assert!(error.is_not_found());
        assert!(!error.is_conflict());
        assert!(error.to_string().contains("Customer"));
        assert!(error.to_string().contains("CUS-123"));
    }

    #[test]
    fn test_port_error_conflict() {
        let error = PortError::conflict("version mismatch");
        assert!(error.is_conflict());
        assert!(error.to_string().contains("version mismatch"));
    }
}
