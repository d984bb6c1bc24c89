//! Replicator configuration, read from a `replicant.toml` file.
//!
//! ```toml
//! entity_kind = "node"
//! template_state = "template"
//! draft_states = ["draft"]
//! latest_revision_segment = "latest"
//! max_title_length = 255
//! ```
//!
//! Every key is optional.

use crate::error::{ReplicateError, ReplicateResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Settings shared by every replication a [`Replicator`](crate::Replicator) runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplicatorConfig {
    /// Entity kind loaded and used in redirect locators.
    #[serde(default = "default_entity_kind")]
    pub entity_kind: String,
    /// Workflow state the "template" preset assigns.
    #[serde(default = "default_template_state")]
    pub template_state: String,
    /// Workflow states whose canonical view may lag behind the latest revision.
    #[serde(default = "default_draft_states")]
    pub draft_states: Vec<String>,
    /// Path segment appended to the locator for latest-revision views.
    #[serde(default = "default_latest_revision_segment")]
    pub latest_revision_segment: String,
    /// Longest accepted title override, in characters.
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
}

fn default_entity_kind() -> String {
    "node".to_string()
}

fn default_template_state() -> String {
    "template".to_string()
}

fn default_draft_states() -> Vec<String> {
    vec!["draft".to_string()]
}

fn default_latest_revision_segment() -> String {
    "latest".to_string()
}

fn default_max_title_length() -> usize {
    255
}

impl Default for ReplicatorConfig {
    fn default() -> Self {
        Self {
            entity_kind: default_entity_kind(),
            template_state: default_template_state(),
            draft_states: default_draft_states(),
            latest_revision_segment: default_latest_revision_segment(),
            max_title_length: default_max_title_length(),
        }
    }
}

impl ReplicatorConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> ReplicateResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ReplicateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    /// Falls back to defaults with a warning if the file is unreadable or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No replicator config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded replicator config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("{}: {}. Falling back to defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read replicator config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Checks values that deserialize fine but cannot work.
    pub fn validate(&self) -> ReplicateResult<()> {
        if !is_path_segment(&self.entity_kind) {
            return Err(ReplicateError::Config(format!(
                "entity_kind {:?} is not a valid path segment",
                self.entity_kind
            )));
        }
        if !is_path_segment(&self.latest_revision_segment) {
            return Err(ReplicateError::Config(format!(
                "latest_revision_segment {:?} is not a valid path segment",
                self.latest_revision_segment
            )));
        }
        if self.template_state.trim().is_empty() {
            return Err(ReplicateError::Config("template_state is empty".into()));
        }
        if self.draft_states.iter().any(|s| s.trim().is_empty()) {
            return Err(ReplicateError::Config("draft_states contains an empty state".into()));
        }
        if self.max_title_length == 0 {
            return Err(ReplicateError::Config("max_title_length must be positive".into()));
        }
        Ok(())
    }

    /// Whether `state` is one of the configured draft-like states.
    pub fn is_draft_state(&self, state: &str) -> bool {
        self.draft_states.iter().any(|s| s == state)
    }
}

fn is_path_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
