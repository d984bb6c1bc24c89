//! Storage collaborators for Replicant.
//!
//! The replication core never talks to a database directly. It loads and
//! saves through [`EntityStorage`] and asks [`TypeConfigLookup`] whether a
//! bundle takes part in an editorial workflow.
//!
//! # Contract
//!
//! - `load` is read-only and returns `Ok(None)` for unknown ids.
//! - `save` persists a *new* entity, all translations at once, and returns
//!   the id it assigned. A rejected save leaves no trace.
//!
//! [`MemoryStore`] is the in-process reference implementation.

mod error;
mod memory_store;

pub use error::{StorageError, StorageResult};
pub use memory_store::MemoryStore;

use replicant_model::{ContentEntity, EntityTypeConfig};
use replicant_types::EntityId;

/// Loads and saves content entities.
pub trait EntityStorage: Send + Sync {
    /// Loads an entity of `kind` by id. Unknown ids yield `Ok(None)`.
    fn load(&self, kind: &str, id: EntityId) -> StorageResult<Option<ContentEntity>>;

    /// Persists a new entity as one atomic write and returns its assigned id.
    ///
    /// Entities that already carry an id are rejected with
    /// [`StorageError::AlreadyPersisted`].
    fn save(&self, entity: &ContentEntity) -> StorageResult<EntityId>;
}

/// Resolves per-bundle type configuration.
pub trait TypeConfigLookup: Send + Sync {
    /// Configuration for `bundle`. Unknown bundles have no workflow.
    fn type_config(&self, bundle: &str) -> EntityTypeConfig;

    fn is_workflow_enabled(&self, bundle: &str) -> bool {
        self.type_config(bundle).is_workflow_enabled()
    }
}
