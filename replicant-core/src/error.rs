//! Error types for the replication core.

use replicant_storage::StorageError;
use replicant_types::EntityId;
use thiserror::Error;

/// Result type for replication operations.
pub type ReplicateResult<T> = Result<T, ReplicateError>;

/// Errors surfaced to the caller of a replication.
///
/// None of these leave partial state behind: the source entity is never
/// written, and an unsaved replica is simply dropped.
#[derive(Debug, Error)]
pub enum ReplicateError {
    /// No source entity exists for the requested id.
    #[error("{kind} {id} not found")]
    NotFound { kind: String, id: EntityId },

    /// An override value or request field is structurally invalid.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The storage backend rejected the save of the replica.
    #[error("failed to save replica: {0}")]
    Persistence(#[source] StorageError),

    /// The storage backend failed while loading the source.
    #[error("failed to load source: {0}")]
    Storage(#[source] StorageError),

    /// Replicator configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ReplicateError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ReplicateError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true for caller-input problems that a corrected request could fix.
    pub fn is_validation(&self) -> bool {
        matches!(self, ReplicateError::Validation { .. })
    }

    /// Returns true if the source entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReplicateError::NotFound { .. })
    }
}
