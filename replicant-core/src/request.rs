//! Caller input: which entity to replicate and what to override.

use crate::error::{ReplicateError, ReplicateResult};
use replicant_model::CommentPolicy;
use replicant_types::{EntityId, Locale};
use serde::{Deserialize, Serialize};

/// Field overrides applied to exactly one translation of the replica.
///
/// `target_locale` picks the translation; when absent, the default-locale
/// translation is targeted. Every other field is applied only if present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_locale: Option<Locale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_policy: Option<CommentPolicy>,
    /// Ignored when the replica's bundle has no workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_state: Option<String>,
}

impl ReplicationOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_locale(mut self, locale: Locale) -> Self {
        self.target_locale = Some(locale);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_comment_policy(mut self, policy: CommentPolicy) -> Self {
        self.comment_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_workflow_state(mut self, state: impl Into<String>) -> Self {
        self.workflow_state = Some(state.into());
        self
    }

    /// True when no field would be changed (a plain structural copy).
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.comment_policy.is_none() && self.workflow_state.is_none()
    }
}

/// A validated replication request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplicationRequest {
    pub source_id: EntityId,
    #[serde(flatten)]
    pub overrides: ReplicationOverrides,
}

impl ReplicationRequest {
    pub fn new(source_id: EntityId, overrides: ReplicationOverrides) -> Self {
        Self {
            source_id,
            overrides,
        }
    }

    /// Parses a flat JSON record as submitted by a presentation layer:
    ///
    /// ```json
    /// {"source_id": 42, "target_locale": "fr", "title": "Spring Template",
    ///  "comment_policy": "disabled", "workflow_state": "template"}
    /// ```
    ///
    /// Only these keys are accepted. `source_id` may be a number or a numeric
    /// string; `comment_policy` may be a name (`"open"`) or a stored code (`2`).
    pub fn from_json(json: &str) -> ReplicateResult<Self> {
        let record: RequestRecord = serde_json::from_str(json)
            .map_err(|e| ReplicateError::validation("request", e.to_string()))?;
        record.try_into()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestRecord {
    source_id: IdValue,
    #[serde(default)]
    target_locale: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    comment_policy: Option<PolicyValue>,
    #[serde(default)]
    workflow_state: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PolicyValue {
    Code(u8),
    Name(String),
}

impl TryFrom<RequestRecord> for ReplicationRequest {
    type Error = ReplicateError;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        let source_id = match record.source_id {
            IdValue::Number(n) => EntityId::new(n),
            IdValue::Text(s) => EntityId::parse(&s)
                .map_err(|e| ReplicateError::validation("source_id", e.to_string()))?,
        };

        let target_locale = record
            .target_locale
            .as_deref()
            .map(Locale::parse)
            .transpose()
            .map_err(|e| ReplicateError::validation("target_locale", e.to_string()))?;

        let comment_policy = match record.comment_policy {
            None => None,
            Some(PolicyValue::Code(code)) => Some(CommentPolicy::from_code(code).ok_or_else(|| {
                ReplicateError::validation("comment_policy", format!("unknown code {code}"))
            })?),
            Some(PolicyValue::Name(name)) => Some(CommentPolicy::from_name(&name).ok_or_else(|| {
                ReplicateError::validation("comment_policy", format!("unknown policy {name:?}"))
            })?),
        };

        Ok(Self {
            source_id,
            overrides: ReplicationOverrides {
                target_locale,
                title: record.title,
                comment_policy,
                workflow_state: record.workflow_state,
            },
        })
    }
}
