use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use crate::workflow::RequestStatus;

/// A student's request for a letter, tracked through the review workflow.
/// The status field is the only mutation path besides the draft/final text
/// it gates (see `workflow::apply`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LorRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub faculty_id: Uuid,
    pub faculty_name: String,
    pub program: String,
    pub university: String,
    pub purpose: String,
    pub deadline: String,
    pub details: String,
    pub status: RequestStatus,
    pub ai_draft: Option<String>,
    /// Set if and only if status is `approved`.
    pub final_lor: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLorRequest {
    pub student_id: Uuid,
    pub student_name: String,
    pub faculty_id: Uuid,
    pub faculty_name: String,
    pub program: String,
    pub university: String,
    pub purpose: String,
    pub deadline: String,
    pub details: String,
}

/// Partial update applied to a request row. Fields left `None` are untouched.
/// Transition validity is enforced by the workflow layer before this is built.
#[derive(Debug, Clone, Default)]
pub struct RequestUpdate {
    pub status: Option<RequestStatus>,
    pub ai_draft: Option<String>,
    pub final_lor: Option<String>,
}

/// Append-only record pointing a user at a request event.
/// Only the read flag ever changes after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub request_id: Uuid,
    pub message: String,
}

/// Which side of a request a listing is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestParty {
    Student,
    Faculty,
}
