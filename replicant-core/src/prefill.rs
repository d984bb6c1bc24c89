//! Form defaults and the two replication presets.
//!
//! A presentation layer offers either "Create Template" or "Save as Copy".
//! Both start from the same prefill and end as an ordinary
//! [`ReplicationRequest`], so the reconciliation rules are identical.

use crate::config::ReplicatorConfig;
use crate::error::{ReplicateError, ReplicateResult};
use crate::request::{ReplicationOverrides, ReplicationRequest};
use crate::snapshot::SourceEntity;
use replicant_model::CommentPolicy;
use replicant_types::{EntityId, Locale};
use serde::Serialize;

/// Values to pre-populate a replication form with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverridePrefill {
    pub source_id: EntityId,
    /// The editor's working locale; overrides will target it.
    pub locale: Locale,
    pub title: String,
    /// Comments are currently open on that translation.
    pub comments_enabled: bool,
    /// The bundle takes part in an editorial workflow.
    pub workflow_enabled: bool,
    /// Initial state of the "new draft" toggle; checked whenever a workflow
    /// exists to draft in.
    pub new_draft: bool,
}

/// Which flavour of replication the editor chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicationPreset {
    /// A reusable template: comment toggle plus the configured template state.
    Template { comments_enabled: bool },
    /// A working copy, optionally started as a new draft.
    Copy { new_draft: bool },
}

impl OverridePrefill {
    /// Reads the defaults from `source`. `locale` defaults to the source's
    /// default locale and must name an existing translation.
    pub fn from_source(source: &SourceEntity, locale: Option<&Locale>) -> ReplicateResult<Self> {
        let locale = locale.unwrap_or_else(|| source.default_locale()).clone();
        let translation = source.translation(&locale).ok_or_else(|| {
            ReplicateError::validation(
                "target_locale",
                format!("{} {} has no {locale} translation", source.entity().kind, source.id()),
            )
        })?;

        let workflow_enabled = source.type_config().is_workflow_enabled();
        Ok(Self {
            source_id: source.id(),
            title: translation.title.clone(),
            comments_enabled: translation.comment_policy == CommentPolicy::Open,
            workflow_enabled,
            new_draft: workflow_enabled,
            locale,
        })
    }

    /// Builds the request for the chosen preset and submitted title.
    pub fn into_request(
        self,
        title: impl Into<String>,
        preset: ReplicationPreset,
        config: &ReplicatorConfig,
    ) -> ReplicationRequest {
        let mut overrides = ReplicationOverrides::new()
            .for_locale(self.locale)
            .with_title(title);

        match preset {
            ReplicationPreset::Template { comments_enabled } => {
                overrides.comment_policy = Some(CommentPolicy::from_toggle(comments_enabled));
                if self.workflow_enabled {
                    overrides.workflow_state = Some(config.template_state.clone());
                }
            }
            ReplicationPreset::Copy { new_draft } => {
                if new_draft && self.workflow_enabled {
                    overrides.workflow_state = config.draft_states.first().cloned();
                }
            }
        }

        ReplicationRequest::new(self.source_id, overrides)
    }
}
