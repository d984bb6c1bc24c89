use replicant_types::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether discussion is allowed on a content item.
///
/// The numeric codes match the stored representation (`0`, `1`, `2`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentPolicy {
    /// Comments are hidden entirely.
    Disabled,
    /// Existing comments are shown, no new ones accepted.
    #[default]
    ReadOnly,
    /// Comments are shown and accepted.
    Open,
}

impl CommentPolicy {
    /// Stored numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            CommentPolicy::Disabled => 0,
            CommentPolicy::ReadOnly => 1,
            CommentPolicy::Open => 2,
        }
    }

    /// Decodes a stored numeric code. Unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CommentPolicy::Disabled),
            1 => Some(CommentPolicy::ReadOnly),
            2 => Some(CommentPolicy::Open),
            _ => None,
        }
    }

    /// Maps an "enable comments" checkbox: checked opens comments,
    /// unchecked leaves them read-only.
    #[must_use]
    pub const fn from_toggle(enabled: bool) -> Self {
        if enabled {
            CommentPolicy::Open
        } else {
            CommentPolicy::ReadOnly
        }
    }

    /// Parses the snake_case name used in requests and config.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "disabled" => Some(CommentPolicy::Disabled),
            "read_only" => Some(CommentPolicy::ReadOnly),
            "open" => Some(CommentPolicy::Open),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CommentPolicy::Disabled => "disabled",
            CommentPolicy::ReadOnly => "read_only",
            CommentPolicy::Open => "open",
        }
    }
}

impl fmt::Display for CommentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One locale's projection of a content entity.
///
/// `title`, `comment_policy`, `published` and `workflow_state` are the fields
/// replication reasons about; everything else (body, tags, media references)
/// rides along in `fields` and is copied verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub locale: Locale,
    pub title: String,
    pub comment_policy: CommentPolicy,
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_state: Option<String>,
    /// When this translation was last published (unix ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Translation {
    /// Creates an unpublished translation with read-only comments and no extra fields.
    pub fn new(locale: Locale, title: impl Into<String>) -> Self {
        Self {
            locale,
            title: title.into(),
            comment_policy: CommentPolicy::default(),
            published: false,
            workflow_state: None,
            published_at: None,
            fields: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_comment_policy(mut self, policy: CommentPolicy) -> Self {
        self.comment_policy = policy;
        self
    }

    #[must_use]
    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    #[must_use]
    pub fn with_workflow_state(mut self, state: impl Into<String>) -> Self {
        self.workflow_state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}
