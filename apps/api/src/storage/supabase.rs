//! Storage backend over the managed backend's REST (PostgREST) surface.
//!
//! Only documented read/write/query operations are used: `select` with `eq.`
//! filters, `insert` with `Prefer: return=representation`, and filtered
//! `PATCH`. Atomicity and durability are the backend's guarantee, not ours,
//! and no retry layer sits on top — a failed call surfaces once.
//!
//! Rows travel in snake_case and are converted to/from the camelCase domain
//! model here, at the edge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::models::faculty::{Faculty, NewFaculty};
use crate::models::letter::{GeneratedLor, NewGeneratedLor};
use crate::models::workflow::{
    LorRequest, NewLorRequest, NewNotification, Notification, RequestParty, RequestUpdate,
};
use crate::workflow::RequestStatus;

use super::{Storage, StorageError};

pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorage {
    pub fn new(url: String, service_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: format!("{}/rest/v1", url.trim_end_matches('/')),
            service_key,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", &self.service_key))
    }

    async fn select<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>, StorageError> {
        let response = self.request(reqwest::Method::GET, query).send().await?;
        decode_rows(response).await
    }

    /// Inserts one row and returns the stored representation.
    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, StorageError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let mut rows: Vec<T> = decode_rows(response).await?;
        rows.pop().ok_or(StorageError::NoRowUpdated)
    }

    /// Applies a filtered PATCH and returns the updated rows.
    async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        query: &str,
        body: &B,
    ) -> Result<Vec<T>, StorageError> {
        let response = self
            .request(reqwest::Method::PATCH, query)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        decode_rows(response).await
    }
}

async fn decode_rows<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Vec<T>, StorageError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(StorageError::Backend {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

// ────────────────────────────────────────────────────────────────────────────
// Row shapes (snake_case wire format)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FacultyRow {
    id: Uuid,
    name: String,
    designation: String,
    department: String,
    email: String,
    courses_taught: Option<Vec<String>>,
    years_of_experience: Option<String>,
    profile_image: Option<String>,
}

impl From<FacultyRow> for Faculty {
    fn from(row: FacultyRow) -> Self {
        Faculty {
            id: row.id,
            name: row.name,
            designation: row.designation,
            department: row.department,
            email: row.email,
            courses_taught: row.courses_taught.unwrap_or_default(),
            years_of_experience: row.years_of_experience,
            profile_image: row.profile_image,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedLorRow {
    id: Uuid,
    student_name: String,
    student_email: Option<String>,
    faculty_id: Uuid,
    lor_content: String,
    student_profile: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<GeneratedLorRow> for GeneratedLor {
    fn from(row: GeneratedLorRow) -> Self {
        GeneratedLor {
            id: row.id,
            student_name: row.student_name,
            student_email: row.student_email,
            faculty_id: row.faculty_id,
            lor_content: row.lor_content,
            student_profile: row.student_profile,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LorRequestRow {
    id: Uuid,
    student_id: Uuid,
    student_name: String,
    faculty_id: Uuid,
    faculty_name: String,
    program: String,
    university: String,
    purpose: String,
    deadline: String,
    details: String,
    status: RequestStatus,
    ai_draft: Option<String>,
    final_lor: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LorRequestRow> for LorRequest {
    fn from(row: LorRequestRow) -> Self {
        LorRequest {
            id: row.id,
            student_id: row.student_id,
            student_name: row.student_name,
            faculty_id: row.faculty_id,
            faculty_name: row.faculty_name,
            program: row.program,
            university: row.university,
            purpose: row.purpose,
            deadline: row.deadline,
            details: row.details,
            status: row.status,
            ai_draft: row.ai_draft,
            final_lor: row.final_lor,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    request_id: Uuid,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            user_id: row.user_id,
            request_id: row.request_id,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Storage impl
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Storage for SupabaseStorage {
    async fn get_faculty(&self, id: Uuid) -> Result<Option<Faculty>, StorageError> {
        let rows: Vec<FacultyRow> = self
            .select(&format!("faculty?select=*&id=eq.{id}&limit=1"))
            .await?;
        Ok(rows.into_iter().next().map(Faculty::from))
    }

    async fn list_faculty(&self) -> Result<Vec<Faculty>, StorageError> {
        let rows: Vec<FacultyRow> = self.select("faculty?select=*&order=name.asc").await?;
        Ok(rows.into_iter().map(Faculty::from).collect())
    }

    async fn create_faculty(&self, new: NewFaculty) -> Result<Faculty, StorageError> {
        let row: FacultyRow = self
            .insert(
                "faculty",
                &json!({
                    "name": new.name,
                    "designation": new.designation,
                    "department": new.department,
                    "email": new.email,
                    "courses_taught": new.courses_taught,
                    "years_of_experience": new.years_of_experience,
                    "profile_image": new.profile_image,
                }),
            )
            .await?;
        Ok(row.into())
    }

    async fn create_letter(&self, new: NewGeneratedLor) -> Result<GeneratedLor, StorageError> {
        let row: GeneratedLorRow = self
            .insert(
                "generated_lors",
                &json!({
                    "student_name": new.student_name,
                    "student_email": new.student_email,
                    "faculty_id": new.faculty_id,
                    "lor_content": new.lor_content,
                    "student_profile": new.student_profile,
                }),
            )
            .await?;
        Ok(row.into())
    }

    async fn get_letter(&self, id: Uuid) -> Result<Option<GeneratedLor>, StorageError> {
        let rows: Vec<GeneratedLorRow> = self
            .select(&format!("generated_lors?select=*&id=eq.{id}&limit=1"))
            .await?;
        Ok(rows.into_iter().next().map(GeneratedLor::from))
    }

    async fn create_request(&self, new: NewLorRequest) -> Result<LorRequest, StorageError> {
        let row: LorRequestRow = self
            .insert(
                "lor_requests",
                &json!({
                    "student_id": new.student_id,
                    "student_name": new.student_name,
                    "faculty_id": new.faculty_id,
                    "faculty_name": new.faculty_name,
                    "program": new.program,
                    "university": new.university,
                    "purpose": new.purpose,
                    "deadline": new.deadline,
                    "details": new.details,
                    "status": RequestStatus::Pending,
                }),
            )
            .await?;
        Ok(row.into())
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<LorRequest>, StorageError> {
        let rows: Vec<LorRequestRow> = self
            .select(&format!("lor_requests?select=*&id=eq.{id}&limit=1"))
            .await?;
        Ok(rows.into_iter().next().map(LorRequest::from))
    }

    async fn list_requests(
        &self,
        user_id: Uuid,
        party: RequestParty,
    ) -> Result<Vec<LorRequest>, StorageError> {
        let column = match party {
            RequestParty::Student => "student_id",
            RequestParty::Faculty => "faculty_id",
        };
        let rows: Vec<LorRequestRow> = self
            .select(&format!(
                "lor_requests?select=*&{column}=eq.{user_id}&order=created_at.desc"
            ))
            .await?;
        Ok(rows.into_iter().map(LorRequest::from).collect())
    }

    async fn update_request(
        &self,
        id: Uuid,
        update: RequestUpdate,
    ) -> Result<LorRequest, StorageError> {
        let mut body = serde_json::Map::new();
        if let Some(status) = update.status {
            body.insert("status".into(), json!(status));
        }
        if let Some(draft) = update.ai_draft {
            body.insert("ai_draft".into(), json!(draft));
        }
        if let Some(final_lor) = update.final_lor {
            body.insert("final_lor".into(), json!(final_lor));
        }
        body.insert("updated_at".into(), json!(Utc::now()));

        let mut rows: Vec<LorRequestRow> = self
            .patch(&format!("lor_requests?id=eq.{id}"), &body)
            .await?;
        rows.pop().map(LorRequest::from).ok_or(StorageError::NoRowUpdated)
    }

    async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, StorageError> {
        let row: NotificationRow = self
            .insert(
                "notifications",
                &json!({
                    "user_id": new.user_id,
                    "request_id": new.request_id,
                    "message": new.message,
                    "is_read": false,
                }),
            )
            .await?;
        Ok(row.into())
    }

    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>, StorageError> {
        let rows: Vec<NotificationRow> = self
            .select(&format!(
                "notifications?select=*&user_id=eq.{user_id}&order=created_at.desc"
            ))
            .await?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<(), StorageError> {
        let _: Vec<NotificationRow> = self
            .patch(
                &format!("notifications?id=eq.{id}"),
                &json!({ "is_read": true }),
            )
            .await?;
        Ok(())
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<(), StorageError> {
        let _: Vec<NotificationRow> = self
            .patch(
                &format!("notifications?user_id=eq.{user_id}"),
                &json!({ "is_read": true }),
            )
            .await?;
        Ok(())
    }
}
