//! Read-only view of the entity being replicated.

use crate::error::{ReplicateError, ReplicateResult};
use replicant_model::{ContentEntity, EntityTypeConfig, Translation};
use replicant_storage::{EntityStorage, StorageError, TypeConfigLookup};
use replicant_types::{EntityId, Locale};
use tracing::debug;

/// A loaded source entity together with its bundle configuration.
///
/// The title used in confirmation messages is captured at load time, before
/// any replica exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntity {
    id: EntityId,
    entity: ContentEntity,
    type_config: EntityTypeConfig,
    title: String,
}

impl SourceEntity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn entity(&self) -> &ContentEntity {
        &self.entity
    }

    pub fn type_config(&self) -> &EntityTypeConfig {
        &self.type_config
    }

    /// Title of the requested locale's translation (or the default one).
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn default_locale(&self) -> &Locale {
        &self.entity.default_locale
    }

    pub fn translation(&self, locale: &Locale) -> Option<&Translation> {
        self.entity.translation(locale)
    }
}

/// Loads [`SourceEntity`] snapshots through the storage collaborators.
pub struct SnapshotReader<'a> {
    storage: &'a dyn EntityStorage,
    types: &'a dyn TypeConfigLookup,
    kind: &'a str,
}

impl<'a> SnapshotReader<'a> {
    pub fn new(
        storage: &'a dyn EntityStorage,
        types: &'a dyn TypeConfigLookup,
        kind: &'a str,
    ) -> Self {
        Self {
            storage,
            types,
            kind,
        }
    }

    /// Loads the source entity. `locale` selects which translation's title is
    /// captured; unknown or absent locales fall back to the default locale.
    pub fn load(&self, id: EntityId, locale: Option<&Locale>) -> ReplicateResult<SourceEntity> {
        let mut entity = self
            .storage
            .load(self.kind, id)
            .map_err(ReplicateError::Storage)?
            .ok_or_else(|| ReplicateError::NotFound {
                kind: self.kind.to_string(),
                id,
            })?;

        entity
            .check_translations()
            .map_err(|e| ReplicateError::Storage(StorageError::InvalidData(e.to_string())))?;
        entity.id = Some(id);

        let title = locale
            .and_then(|l| entity.translation(l))
            .or_else(|| entity.default_translation())
            .map(|t| t.title.clone())
            .unwrap_or_default();
        let type_config = self.types.type_config(&entity.bundle);

        debug!(
            %id,
            bundle = %entity.bundle,
            translations = entity.translations.len(),
            workflow = type_config.is_workflow_enabled(),
            "Loaded source snapshot"
        );

        Ok(SourceEntity {
            id,
            entity,
            type_config,
            title,
        })
    }
}
