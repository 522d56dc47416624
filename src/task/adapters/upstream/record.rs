//! Loosely-typed payload shapes delivered by upstream trackers.

use serde::Deserialize;

/// Envelope for an upstream task listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamTasksResponse {
    /// Task records, possibly absent entirely.
    #[serde(default)]
    pub tasks: Option<Vec<UpstreamTask>>,
}

/// One raw upstream task record.
///
/// Every field except the identifier is optional or variant-shaped;
/// [`super::normalize`] resolves the ambiguity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamTask {
    /// Upstream identifier, reused verbatim as the task id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Parent task identifier.
    #[serde(default)]
    pub parent: Option<String>,
    /// Workflow status object.
    #[serde(default)]
    pub status: Option<UpstreamStatus>,
    /// Priority object.
    #[serde(default)]
    pub priority: Option<UpstreamPriority>,
    /// Due date in epoch milliseconds, as string or number.
    #[serde(default)]
    pub due_date: Option<RawMillis>,
    /// Time estimate in milliseconds, as string or number.
    #[serde(default)]
    pub time_estimate: Option<RawMillis>,
    /// Dependency edges.
    #[serde(default)]
    pub dependencies: Option<Vec<UpstreamDependency>>,
    /// Free-text tags, as bare strings or name objects.
    #[serde(default)]
    pub tags: Option<Vec<UpstreamTag>>,
}

/// Raw workflow status object.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamStatus {
    /// Status display name.
    #[serde(default)]
    pub status: Option<String>,
    /// Status category, used as a fallback for the name.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Raw priority object.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPriority {
    /// Priority identifier, used as a fallback for the name.
    #[serde(default)]
    pub id: Option<String>,
    /// Priority display name.
    #[serde(default)]
    pub priority: Option<String>,
}

/// Raw dependency edge.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamDependency {
    /// Identifier of the task this record depends on.
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Tag delivered either as a bare string or as a name object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UpstreamTag {
    /// Bare tag string.
    Name(String),
    /// Tag object with an optional name.
    Object {
        /// Tag display name.
        #[serde(default)]
        name: Option<String>,
    },
}

impl UpstreamTag {
    /// Returns the tag text, or `None` for empty or nameless tags.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        let raw = match self {
            Self::Name(name) => name.as_str(),
            Self::Object { name } => name.as_deref()?,
        };
        if raw.is_empty() { None } else { Some(raw) }
    }
}

/// Millisecond quantity delivered either as a number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMillis {
    /// Numeric milliseconds.
    Number(i64),
    /// Stringified milliseconds.
    Text(String),
}

impl RawMillis {
    /// Returns the value as milliseconds, or `None` when unparseable.
    #[must_use]
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}
