use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile of the user that owns the API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
}

impl UserProfile {
    /// `First Last (email)`.
    pub fn display_line(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            format!("{name} ({})", self.email)
        }
    }
}

/// Identifier of a search result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchId(pub String);

impl SearchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a search as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
    /// Any status this client does not know, or none at all.
    #[default]
    #[serde(other)]
    Unknown,
}

impl SearchStatus {
    /// Wire value, also used for the `status` query filter.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStatus::Pending => "PENDING",
            SearchStatus::Running => "RUNNING",
            SearchStatus::Succeeded => "SUCCEEDED",
            SearchStatus::Failed => "FAILED",
            SearchStatus::Canceled => "CANCELED",
            SearchStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prior search run on the service.
///
/// Fields the dashboard does not display are kept in `extra` so nothing the
/// service sends is dropped on the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: SearchStatus,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A protein inferred by a search, with the peptide sequences assigned to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProteinRecord {
    /// Composite `database|protein_id|protein_name`.
    pub name: String,
    #[serde(default)]
    pub peptide_sequences: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A peptide of one protein with its peptide-spectrum-match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeptideRecord {
    pub sequence: String,
    pub psm_count: u64,
}
