//! Caller-facing confirmation of a finished replication.

use crate::config::ReplicatorConfig;
use crate::replicate::PersistedReplica;
use replicant_types::EntityId;
use serde::Serialize;
use std::fmt;

/// What the caller needs to confirm the replication and redirect the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplicationResult {
    pub source_id: EntityId,
    pub source_title: String,
    pub new_id: EntityId,
    pub new_title: String,
    /// Path to the new entity, e.g. `/node/43` or `/node/43/latest`.
    pub redirect_locator: String,
    /// The canonical view may still resolve to an older published revision;
    /// callers should show the latest revision instead.
    pub point_to_latest_revision: bool,
}

impl ReplicationResult {
    /// Human-readable confirmation, e.g.
    /// `'Spring' [42] has been copied as 'Spring Template' [43].`
    pub fn message(&self) -> String {
        format!(
            "'{}' [{}] has been copied as '{}' [{}].",
            self.source_title, self.source_id, self.new_title, self.new_id
        )
    }
}

impl fmt::Display for ReplicationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Derives [`ReplicationResult`]s. Performs no I/O.
pub struct ResultNotifier<'a> {
    config: &'a ReplicatorConfig,
}

impl<'a> ResultNotifier<'a> {
    pub fn new(config: &'a ReplicatorConfig) -> Self {
        Self { config }
    }

    pub fn describe(
        &self,
        source_title: &str,
        source_id: EntityId,
        replica: &PersistedReplica,
    ) -> ReplicationResult {
        let point_to_latest_revision = replica
            .applied()
            .workflow_state
            .as_deref()
            .is_some_and(|state| self.config.is_draft_state(state));

        let mut redirect_locator = format!("/{}/{}", replica.entity().kind, replica.id());
        if point_to_latest_revision {
            redirect_locator.push('/');
            redirect_locator.push_str(&self.config.latest_revision_segment);
        }

        ReplicationResult {
            source_id,
            source_title: source_title.to_string(),
            new_id: replica.id(),
            new_title: replica.title().to_string(),
            redirect_locator,
            point_to_latest_revision,
        }
    }
}
