use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A faculty member available to write recommendation letters.
/// Seeded at startup in the memory backend; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: Uuid,
    pub name: String,
    pub designation: String,
    pub department: String,
    pub email: String,
    #[serde(default)]
    pub courses_taught: Vec<String>,
    pub years_of_experience: Option<String>,
    pub profile_image: Option<String>,
}

/// Faculty fields without an id — the storage layer assigns one on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFaculty {
    pub name: String,
    pub designation: String,
    pub department: String,
    pub email: String,
    #[serde(default)]
    pub courses_taught: Vec<String>,
    pub years_of_experience: Option<String>,
    pub profile_image: Option<String>,
}
