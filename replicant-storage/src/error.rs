//! Error types for the storage layer.

use replicant_types::EntityId;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A save was attempted for an entity that already has an id.
    #[error("entity {0} already exists; only new entities can be saved")]
    AlreadyPersisted(EntityId),

    /// A registered validator rejected the entity.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The backend's internal state is unusable (e.g. a poisoned lock).
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}
