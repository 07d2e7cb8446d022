//! Storage abstraction for faculty, letters, requests, and notifications.
//!
//! Handlers depend on `Arc<dyn Storage>` — constructed once in `main` and
//! injected through `AppState`. Two backends exist: a process-local map store
//! (default, seeded with sample faculty) and the managed Supabase REST surface.

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::faculty::{Faculty, NewFaculty};
use crate::models::letter::{GeneratedLor, NewGeneratedLor};
use crate::models::workflow::{
    LorRequest, NewLorRequest, NewNotification, Notification, RequestParty, RequestUpdate,
};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("row decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no row matched the update")]
    NoRowUpdated,
}

/// All persistence operations the service needs.
///
/// Gets return `Ok(None)` for unknown ids — mapping to 404 is the handler's
/// job. Writes are assumed atomic per call; there is no transaction surface.
#[async_trait]
pub trait Storage: Send + Sync {
    // Faculty
    async fn get_faculty(&self, id: Uuid) -> Result<Option<Faculty>, StorageError>;
    async fn list_faculty(&self) -> Result<Vec<Faculty>, StorageError>;
    async fn create_faculty(&self, faculty: NewFaculty) -> Result<Faculty, StorageError>;

    // Generated letters (append-only)
    async fn create_letter(&self, letter: NewGeneratedLor) -> Result<GeneratedLor, StorageError>;
    async fn get_letter(&self, id: Uuid) -> Result<Option<GeneratedLor>, StorageError>;

    // Workflow requests
    async fn create_request(&self, request: NewLorRequest) -> Result<LorRequest, StorageError>;
    async fn get_request(&self, id: Uuid) -> Result<Option<LorRequest>, StorageError>;
    /// Requests where the given user is the student or the faculty,
    /// newest first.
    async fn list_requests(
        &self,
        user_id: Uuid,
        party: RequestParty,
    ) -> Result<Vec<LorRequest>, StorageError>;
    /// Applies a partial update and returns the updated row.
    /// Bumps `updated_at`. Fails with `NoRowUpdated` on an unknown id.
    async fn update_request(
        &self,
        id: Uuid,
        update: RequestUpdate,
    ) -> Result<LorRequest, StorageError>;

    // Notifications
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StorageError>;
    /// A user's notifications, newest first.
    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>, StorageError>;
    async fn mark_notification_read(&self, id: Uuid) -> Result<(), StorageError>;
    /// Marks every notification belonging to `user_id` as read.
    /// Other users' rows are untouched.
    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<(), StorageError>;
}
