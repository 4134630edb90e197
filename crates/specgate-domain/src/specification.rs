//! Specification module - the unit of knowledge gathered about a project

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current timestamp in seconds since Unix epoch
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Unique identifier for a specification based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, which supersession
/// relies on to break ties between specs created in the same second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecId(uuid::Uuid);

impl SpecId {
    /// Generate a new UUIDv7-based SpecId
    ///
    /// # Examples
    ///
    /// ```
    /// use specgate_domain::SpecId;
    ///
    /// let id = SpecId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create a SpecId from a raw u128 value
    ///
    /// Mostly useful for storage adapters and tests.
    pub fn from_value(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }

    /// Parse a SpecId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DomainError::validation("id", format!("invalid UUID string: {}", e)))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0.as_u128()
    }
}

impl Default for SpecId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An observation about a project
///
/// `category` may be a dotted path such as `tech_stack.database`: the root
/// segment drives coverage, the full path names an exclusivity group.
/// `key` identifies the observation slot for supersession; unkeyed specs are
/// never superseded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Unique identifier
    #[serde(default)]
    pub id: SpecId,

    /// Owning project
    #[serde(default)]
    pub project_id: String,

    /// Category, optionally dotted (`tech_stack.database`)
    pub category: String,

    /// Supersession slot within the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Free-text content
    pub content: String,

    /// Extraction confidence in [0.0, 1.0]
    pub confidence: f64,

    /// Creation time (seconds since Unix epoch)
    #[serde(default)]
    pub created_at: u64,
}

impl Specification {
    /// Create a new unkeyed specification with a fresh id
    pub fn new(
        project_id: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
        confidence: f64,
        created_at: u64,
    ) -> Self {
        Self {
            id: SpecId::new(),
            project_id: project_id.into(),
            category: category.into(),
            key: None,
            content: content.into(),
            confidence,
            created_at,
        }
    }

    /// Set the supersession key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Override the identifier
    pub fn with_id(mut self, id: SpecId) -> Self {
        self.id = id;
        self
    }

    /// Root segment of the category (`tech_stack` for `tech_stack.database`)
    pub fn category_root(&self) -> &str {
        match self.category.split_once('.') {
            Some((root, _)) => root,
            None => &self.category,
        }
    }

    /// Whether the category carries a sub-path
    pub fn is_grouped(&self) -> bool {
        self.category.contains('.')
    }

    /// Reject malformed specifications before any analysis runs
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(DomainError::validation(
                "confidence",
                format!(
                    "spec {} has confidence {} outside [0.0, 1.0]",
                    self.id, self.confidence
                ),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation(
                "category",
                format!("spec {} has an empty category", self.id),
            ));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                format!("spec {} has empty content", self.id),
            ));
        }
        Ok(())
    }

    /// Validate a whole batch, failing on the first malformed spec
    pub fn validate_all<'a, I>(specs: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = &'a Specification>,
    {
        specs.into_iter().try_for_each(Specification::validate)
    }
}
