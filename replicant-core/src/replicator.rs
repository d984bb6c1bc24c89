//! End-to-end replication: load, clone, reconcile, persist, describe.

use crate::config::ReplicatorConfig;
use crate::error::ReplicateResult;
use crate::notify::{ReplicationResult, ResultNotifier};
use crate::prefill::OverridePrefill;
use crate::reconcile::OverrideReconciler;
use crate::replicate::ReplicationEngine;
use crate::request::ReplicationRequest;
use crate::snapshot::{SnapshotReader, SourceEntity};
use replicant_storage::{EntityStorage, TypeConfigLookup};
use replicant_types::{EntityId, Locale};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs replications end to end: load, replicate, reconcile, save, describe.
///
/// Holds no per-request state; one instance can serve any number of
/// sequential or concurrent requests.
pub struct Replicator {
    storage: Arc<dyn EntityStorage>,
    types: Arc<dyn TypeConfigLookup>,
    config: ReplicatorConfig,
}

impl Replicator {
    pub fn new(
        storage: Arc<dyn EntityStorage>,
        types: Arc<dyn TypeConfigLookup>,
        config: ReplicatorConfig,
    ) -> Self {
        Self {
            storage,
            types,
            config,
        }
    }

    pub fn config(&self) -> &ReplicatorConfig {
        &self.config
    }

    /// Loads a read-only snapshot of `source_id`.
    pub fn snapshot(&self, source_id: EntityId, locale: Option<&Locale>) -> ReplicateResult<SourceEntity> {
        SnapshotReader::new(self.storage.as_ref(), self.types.as_ref(), &self.config.entity_kind)
            .load(source_id, locale)
    }

    /// Form defaults for replicating `source_id` in `locale`.
    pub fn prefill(&self, source_id: EntityId, locale: Option<&Locale>) -> ReplicateResult<OverridePrefill> {
        let source = self.snapshot(source_id, locale)?;
        OverridePrefill::from_source(&source, locale)
    }

    /// Replicates the requested entity and returns the confirmation payload.
    pub fn replicate(&self, request: &ReplicationRequest) -> ReplicateResult<ReplicationResult> {
        let source_id = request.source_id;
        info!(%source_id, locale = ?request.overrides.target_locale, "Replicating entity");

        self.run(request).inspect_err(|e| {
            warn!(%source_id, error = %e, "Replication failed");
        })
    }

    fn run(&self, request: &ReplicationRequest) -> ReplicateResult<ReplicationResult> {
        let overrides = &request.overrides;
        let source = self.snapshot(request.source_id, overrides.target_locale.as_ref())?;

        let engine = ReplicationEngine::new(self.storage.as_ref());
        let replica = engine.replicate(&source);
        let replica = OverrideReconciler::new(&self.config).apply(replica, overrides)?;
        let persisted = engine.persist(replica)?;

        let result = ResultNotifier::new(&self.config).describe(source.title(), source.id(), &persisted);
        info!(
            source_id = %result.source_id,
            new_id = %result.new_id,
            locator = %result.redirect_locator,
            latest_revision = result.point_to_latest_revision,
            "{}",
            result.message()
        );
        Ok(result)
    }
}
