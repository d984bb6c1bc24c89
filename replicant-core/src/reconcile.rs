//! Applies caller overrides to a replica.
//!
//! Overrides always land on exactly one translation: the one named by
//! `target_locale`, or the default-locale translation. Other translations
//! keep their replicated values.

use crate::config::ReplicatorConfig;
use crate::error::{ReplicateError, ReplicateResult};
use crate::replicate::Replica;
use crate::request::ReplicationOverrides;
use tracing::debug;

pub struct OverrideReconciler<'a> {
    config: &'a ReplicatorConfig,
}

impl<'a> OverrideReconciler<'a> {
    pub fn new(config: &'a ReplicatorConfig) -> Self {
        Self { config }
    }

    /// Validates `overrides` and applies them to the targeted translation.
    ///
    /// On error the replica is consumed and nothing has been persisted.
    pub fn apply(
        &self,
        mut replica: Replica,
        overrides: &ReplicationOverrides,
    ) -> ReplicateResult<Replica> {
        let (entity, type_config, applied) = replica.parts_mut();

        let target = overrides
            .target_locale
            .clone()
            .unwrap_or_else(|| entity.default_locale.clone());

        let title = overrides
            .title
            .as_deref()
            .map(|t| self.check_title(t))
            .transpose()?;

        // Workflow overrides are checked against the replica's own bundle.
        let workflow_state = match (&overrides.workflow_state, &type_config.workflow) {
            (None, _) => None,
            (Some(state), Some(workflow)) => {
                if !workflow.allows(state) {
                    return Err(ReplicateError::validation(
                        "workflow_state",
                        format!("{state:?} is not allowed for bundle {}", type_config.bundle),
                    ));
                }
                Some(state.clone())
            }
            (Some(state), None) => {
                debug!(
                    bundle = %type_config.bundle,
                    state = %state,
                    "Bundle has no workflow, dropping workflow override"
                );
                applied.dropped_workflow_state = true;
                None
            }
        };

        let translation = entity.translation_mut(&target).ok_or_else(|| {
            ReplicateError::validation("target_locale", format!("replica has no {target} translation"))
        })?;

        if let Some(title) = title {
            translation.title = title;
            applied.title = true;
        }
        if let Some(policy) = overrides.comment_policy {
            translation.comment_policy = policy;
            applied.comment_policy = true;
        }
        if let Some(state) = workflow_state {
            translation.workflow_state = Some(state.clone());
            applied.workflow_state = Some(state);
        }
        applied.target_locale = Some(target);

        debug!(
            locale = ?applied.target_locale,
            title = applied.title,
            comment_policy = applied.comment_policy,
            workflow_state = ?applied.workflow_state,
            "Overrides applied"
        );
        Ok(replica)
    }

    fn check_title(&self, title: &str) -> ReplicateResult<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ReplicateError::validation("title", "title cannot be empty"));
        }
        let len = title.chars().count();
        if len > self.config.max_title_length {
            return Err(ReplicateError::validation(
                "title",
                format!(
                    "title is {len} characters, maximum is {}",
                    self.config.max_title_length
                ),
            ));
        }
        Ok(title.to_string())
    }
}
