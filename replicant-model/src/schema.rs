use serde::{Deserialize, Serialize};

/// Type-level policy for one content bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeConfig {
    pub bundle: String,
    /// Present when the bundle takes part in an editorial workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowSettings>,
}

impl EntityTypeConfig {
    /// A bundle without workflow support.
    pub fn plain(bundle: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
            workflow: None,
        }
    }

    /// A bundle with workflow support restricted to `states`.
    /// An empty list accepts any non-empty state.
    pub fn with_workflow<I, S>(bundle: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bundle: bundle.into(),
            workflow: Some(WorkflowSettings {
                allowed_states: states.into_iter().map(Into::into).collect(),
            }),
        }
    }

    pub fn is_workflow_enabled(&self) -> bool {
        self.workflow.is_some()
    }
}

/// Moderation states a workflow-enabled bundle accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    #[serde(default)]
    pub allowed_states: Vec<String>,
}

impl WorkflowSettings {
    /// Whether `state` may be assigned to an entity of this bundle.
    pub fn allows(&self, state: &str) -> bool {
        if state.trim().is_empty() {
            return false;
        }
        self.allowed_states.is_empty() || self.allowed_states.iter().any(|s| s == state)
    }
}
