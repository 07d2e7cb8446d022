use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A persisted, completed letter. Append-only — letters are never edited
/// after generation; a rerun produces a new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLor {
    pub id: Uuid,
    pub student_name: String,
    pub student_email: Option<String>,
    pub faculty_id: Uuid,
    pub lor_content: String,
    /// Snapshot of the profile the letter was generated from.
    pub student_profile: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGeneratedLor {
    pub student_name: String,
    pub student_email: Option<String>,
    pub faculty_id: Uuid,
    pub lor_content: String,
    pub student_profile: Value,
}
