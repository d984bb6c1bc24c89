//! Structural cloning and persistence of replicas.
//!
//! A replica is a deep copy of every translation of the source with:
//! - no id, uuid, revision pointer or timestamps (storage assigns fresh ones),
//! - no publication log, and every translation unpublished,
//! - no workflow state at all when the bundle has no workflow.

use crate::error::{ReplicateError, ReplicateResult};
use crate::snapshot::SourceEntity;
use replicant_model::{ContentEntity, EntityTypeConfig, Translation};
use replicant_storage::EntityStorage;
use replicant_types::{EntityId, Locale};
use tracing::{debug, info, warn};

/// Record of the overrides the reconciler actually applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedOverrides {
    /// Translation the overrides were applied to.
    pub target_locale: Option<Locale>,
    pub title: bool,
    pub comment_policy: bool,
    /// Workflow state set by this replication, if any.
    pub workflow_state: Option<String>,
    /// A workflow state was requested but the bundle has no workflow.
    pub dropped_workflow_state: bool,
}

/// An unsaved replica.
#[derive(Debug, Clone, PartialEq)]
pub struct Replica {
    source_id: EntityId,
    entity: ContentEntity,
    type_config: EntityTypeConfig,
    applied: AppliedOverrides,
}

impl Replica {
    pub fn source_id(&self) -> EntityId {
        self.source_id
    }

    pub fn entity(&self) -> &ContentEntity {
        &self.entity
    }

    pub fn type_config(&self) -> &EntityTypeConfig {
        &self.type_config
    }

    pub fn applied(&self) -> &AppliedOverrides {
        &self.applied
    }

    pub fn translation(&self, locale: &Locale) -> Option<&Translation> {
        self.entity.translation(locale)
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut ContentEntity, &EntityTypeConfig, &mut AppliedOverrides) {
        (&mut self.entity, &self.type_config, &mut self.applied)
    }
}

/// A replica after its single successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedReplica {
    id: EntityId,
    source_id: EntityId,
    entity: ContentEntity,
    applied: AppliedOverrides,
}

impl PersistedReplica {
    /// Storage-assigned id of the new entity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn source_id(&self) -> EntityId {
        self.source_id
    }

    pub fn entity(&self) -> &ContentEntity {
        &self.entity
    }

    pub fn applied(&self) -> &AppliedOverrides {
        &self.applied
    }

    /// Locale the overrides targeted, or the default locale.
    pub fn target_locale(&self) -> &Locale {
        self.applied
            .target_locale
            .as_ref()
            .unwrap_or(&self.entity.default_locale)
    }

    /// Title of the targeted translation.
    pub fn title(&self) -> &str {
        self.entity
            .translation(self.target_locale())
            .or_else(|| self.entity.default_translation())
            .map(|t| t.title.as_str())
            .unwrap_or_default()
    }
}

/// Builds replicas from source snapshots and persists them.
pub struct ReplicationEngine<'a> {
    storage: &'a dyn EntityStorage,
}

impl<'a> ReplicationEngine<'a> {
    pub fn new(storage: &'a dyn EntityStorage) -> Self {
        Self { storage }
    }

    /// Produces an unsaved, identity-free, unpublished copy of `source`.
    pub fn replicate(&self, source: &SourceEntity) -> Replica {
        let mut entity = source.entity().clone();
        entity.id = None;
        entity.uuid = None;
        entity.revision_id = None;
        entity.created_at = None;
        entity.modified_at = None;

        let workflow = source.type_config().is_workflow_enabled();
        for translation in entity.translations.values_mut() {
            translation.published = false;
            translation.published_at = None;
            if !workflow {
                translation.workflow_state = None;
            }
        }

        debug!(
            source_id = %source.id(),
            translations = entity.translations.len(),
            workflow,
            "Built replica"
        );

        Replica {
            source_id: source.id(),
            entity,
            type_config: source.type_config().clone(),
            applied: AppliedOverrides::default(),
        }
    }

    /// Saves the replica with one storage call. Nothing is retried.
    pub fn persist(&self, replica: Replica) -> ReplicateResult<PersistedReplica> {
        let Replica {
            source_id,
            mut entity,
            type_config,
            applied,
        } = replica;

        // Overrides never publish and never set workflow on non-workflow bundles.
        let workflow = type_config.is_workflow_enabled();
        for translation in entity.translations.values_mut() {
            translation.published = false;
            translation.published_at = None;
            if !workflow {
                translation.workflow_state = None;
            }
        }

        let id = self
            .storage
            .save(&entity)
            .map_err(ReplicateError::Persistence)?;

        // The save already happened, so a failed read-back only costs the
        // storage-assigned uuid and revision.
        let stored = match self.storage.load(&entity.kind, id) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                warn!(%source_id, new_id = %id, "Saved replica not found on read-back");
                entity.id = Some(id);
                entity
            }
            Err(error) => {
                warn!(%source_id, new_id = %id, %error, "Saved replica read-back failed");
                entity.id = Some(id);
                entity
            }
        };

        info!(%source_id, new_id = %id, "Replica persisted");
        Ok(PersistedReplica {
            id,
            source_id,
            entity: stored,
            applied,
        })
    }
}
