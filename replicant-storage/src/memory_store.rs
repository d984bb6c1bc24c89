//! In-process entity store.
//!
//! Holds entities in a map behind an `RwLock`. A save builds the complete
//! stored record first and inserts it under a single write lock, so readers
//! see either the whole entity or nothing.

use crate::{EntityStorage, StorageError, StorageResult, TypeConfigLookup};
use replicant_model::{ContentEntity, EntityTypeConfig, EntityValidator};
use replicant_types::{EntityId, EntityUuid, RevisionId};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::{debug, warn};

/// In-memory [`EntityStorage`] and [`TypeConfigLookup`].
pub struct MemoryStore {
    entities: RwLock<BTreeMap<EntityId, ContentEntity>>,
    types: RwLock<HashMap<String, EntityTypeConfig>>,
    validators: Vec<Box<dyn EntityValidator>>,
    next_id: AtomicU64,
    next_revision: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
            types: RwLock::new(HashMap::new()),
            validators: Vec::new(),
            next_id: AtomicU64::new(1),
            next_revision: AtomicU64::new(1),
        }
    }

    /// Registers a bundle configuration (builder form).
    #[must_use]
    pub fn with_type(mut self, config: EntityTypeConfig) -> Self {
        if let Ok(types) = self.types.get_mut() {
            types.insert(config.bundle.clone(), config);
        }
        self
    }

    /// Adds a validator that runs before every save.
    #[must_use]
    pub fn with_validator(mut self, validator: Box<dyn EntityValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Registers or replaces a bundle configuration.
    pub fn register_type(&self, config: EntityTypeConfig) -> StorageResult<()> {
        let mut types = self.types.write().map_err(poisoned)?;
        types.insert(config.bundle.clone(), config);
        Ok(())
    }

    /// Stores an existing entity as-is, keeping its id, identity and
    /// publication state. Used to seed content that was created elsewhere.
    ///
    /// Entities without an id get the next serial id.
    pub fn insert(&self, mut entity: ContentEntity) -> StorageResult<EntityId> {
        entity
            .check_translations()
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;

        let id = match entity.id {
            Some(id) => {
                self.next_id.fetch_max(id.get() + 1, Ordering::SeqCst);
                id
            }
            None => EntityId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        entity.id = Some(id);
        if entity.uuid.is_none() {
            entity.uuid = Some(EntityUuid::new());
        }
        match entity.revision_id {
            Some(rev) => {
                self.next_revision.fetch_max(rev.get() + 1, Ordering::SeqCst);
            }
            None => entity.revision_id = Some(self.allocate_revision()),
        }

        let mut entities = self.entities.write().map_err(poisoned)?;
        entities.insert(id, entity);
        Ok(id)
    }

    /// Returns a copy of the stored entity, regardless of kind.
    pub fn get(&self, id: EntityId) -> StorageResult<Option<ContentEntity>> {
        let entities = self.entities.read().map_err(poisoned)?;
        Ok(entities.get(&id).cloned())
    }

    /// Ids of all stored entities, ascending.
    pub fn ids(&self) -> StorageResult<Vec<EntityId>> {
        let entities = self.entities.read().map_err(poisoned)?;
        Ok(entities.keys().copied().collect())
    }

    pub fn len(&self) -> usize {
        self.entities.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializes the stored entity to JSON, for audits and snapshots.
    pub fn export_json(&self, id: EntityId) -> StorageResult<Option<String>> {
        match self.get(id)? {
            Some(entity) => Ok(Some(serde_json::to_string(&entity)?)),
            None => Ok(None),
        }
    }

    fn allocate_revision(&self) -> RevisionId {
        RevisionId::new(self.next_revision.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStorage for MemoryStore {
    fn load(&self, kind: &str, id: EntityId) -> StorageResult<Option<ContentEntity>> {
        let entities = self.entities.read().map_err(poisoned)?;
        Ok(entities.get(&id).filter(|e| e.kind == kind).cloned())
    }

    fn save(&self, entity: &ContentEntity) -> StorageResult<EntityId> {
        if let Some(id) = entity.id {
            return Err(StorageError::AlreadyPersisted(id));
        }
        entity
            .check_translations()
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;
        for validator in &self.validators {
            if let Err(reason) = validator.validate(entity) {
                warn!(bundle = %entity.bundle, %reason, "Save rejected by validator");
                return Err(StorageError::Validation(reason));
            }
        }

        let mut record = entity.clone();
        let now = chrono::Utc::now().timestamp_millis();
        record.uuid = Some(EntityUuid::new());
        record.revision_id = Some(self.allocate_revision());
        record.created_at = Some(now);
        record.modified_at = Some(now);

        let mut entities = self.entities.write().map_err(poisoned)?;
        let id = EntityId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        record.id = Some(id);
        entities.insert(id, record);
        debug!(%id, kind = %entity.kind, translations = entity.translations.len(), "Entity saved");
        Ok(id)
    }
}

impl TypeConfigLookup for MemoryStore {
    fn type_config(&self, bundle: &str) -> EntityTypeConfig {
        self.types
            .read()
            .ok()
            .and_then(|types| types.get(bundle).cloned())
            .unwrap_or_else(|| EntityTypeConfig::plain(bundle))
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Unavailable(err.to_string())
}
