//! Axum route handlers for the request/approval workflow.
//!
//! Every status change goes through `workflow::apply` first, then a single
//! storage update, then the counterpart notification. Status and text are
//! written in one update call so `final_lor` can never exist without
//! `approved` (and vice versa).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::generation::context::build_request_prompt;
use crate::generation::prompts::LOR_SYSTEM_PROMPT;
use crate::models::workflow::{
    LorRequest, NewLorRequest, NewNotification, Notification, RequestParty, RequestUpdate,
};
use crate::state::AppState;
use crate::workflow::{apply, RequestAction, RequestStatus};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub student_id: Uuid,
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,
    pub faculty_id: Uuid,
    #[validate(length(min = 1, message = "Faculty name is required"))]
    pub faculty_name: String,
    #[validate(length(min = 1, message = "Program is required"))]
    pub program: String,
    #[validate(length(min = 1, message = "University is required"))]
    pub university: String,
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub purpose: String,
    #[validate(length(min = 1, message = "Deadline is required"))]
    pub deadline: String,
    #[validate(length(min = 1, message = "Details are required"))]
    pub details: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListQuery {
    pub user_id: Uuid,
    pub role: RequestParty,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDraftBody {
    pub draft: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/requests
///
/// Creates a request in `pending` and notifies the faculty member.
pub async fn handle_create_request(
    State(state): State<AppState>,
    Json(body): Json<CreateRequestBody>,
) -> Result<Json<LorRequest>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = state
        .storage
        .create_request(NewLorRequest {
            student_id: body.student_id,
            student_name: body.student_name,
            faculty_id: body.faculty_id,
            faculty_name: body.faculty_name,
            program: body.program,
            university: body.university,
            purpose: body.purpose,
            deadline: body.deadline,
            details: body.details,
        })
        .await?;

    state
        .storage
        .create_notification(NewNotification {
            user_id: request.faculty_id,
            request_id: request.id,
            message: format!("New LOR request from {}", request.student_name),
        })
        .await?;

    info!(
        "Created request {} (student '{}' → faculty '{}')",
        request.id, request.student_name, request.faculty_name
    );

    Ok(Json(request))
}

/// GET /api/requests?userId=&role=student|faculty
pub async fn handle_list_requests(
    State(state): State<AppState>,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<Vec<LorRequest>>, AppError> {
    let requests = state.storage.list_requests(query.user_id, query.role).await?;
    Ok(Json(requests))
}

/// GET /api/requests/:id
pub async fn handle_get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LorRequest>, AppError> {
    let request = fetch_request(&state, id).await?;
    Ok(Json(request))
}

/// POST /api/requests/:id/accept — `pending → in_review`.
pub async fn handle_accept_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LorRequest>, AppError> {
    transition(&state, id, RequestAction::Accept).await
}

/// POST /api/requests/:id/approve — `in_review → approved`.
/// The current draft becomes the final letter in the same write.
pub async fn handle_approve_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LorRequest>, AppError> {
    transition(&state, id, RequestAction::Approve).await
}

/// POST /api/requests/:id/decline — `in_review → declined`.
pub async fn handle_decline_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LorRequest>, AppError> {
    transition(&state, id, RequestAction::Decline).await
}

/// Shared transition path: validate against the status machine, write status
/// (plus final text on approve), notify the student.
async fn transition(
    state: &AppState,
    id: Uuid,
    action: RequestAction,
) -> Result<Json<LorRequest>, AppError> {
    let request = fetch_request(state, id).await?;

    let next = apply(request.status, action, request.ai_draft.as_deref())?;

    let mut update = RequestUpdate {
        status: Some(next),
        ..Default::default()
    };
    if next == RequestStatus::Approved {
        // Invariant: final_lor is set iff status is approved. apply() already
        // guaranteed the draft is non-empty.
        update.final_lor = request.ai_draft.clone();
    }

    let updated = state.storage.update_request(id, update).await?;

    let message = match next {
        RequestStatus::InReview => {
            format!("{} is reviewing your LOR request", updated.faculty_name)
        }
        RequestStatus::Approved => {
            format!("Your LOR request was approved by {}", updated.faculty_name)
        }
        RequestStatus::Declined => {
            format!("Your LOR request was declined by {}", updated.faculty_name)
        }
        RequestStatus::Pending => unreachable!("no transition leads back to pending"),
    };
    state
        .storage
        .create_notification(NewNotification {
            user_id: updated.student_id,
            request_id: updated.id,
            message,
        })
        .await?;

    info!("Request {} moved to {}", updated.id, updated.status);

    Ok(Json(updated))
}

// ────────────────────────────────────────────────────────────────────────────
// Drafts
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/requests/:id/draft
///
/// Generates an AI draft for an in-review request. Not a status transition —
/// the draft can be regenerated until the faculty approves or declines.
pub async fn handle_generate_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LorRequest>, AppError> {
    let request = fetch_request(&state, id).await?;
    require_in_review(&request, "generate a draft for")?;

    let prompt = build_request_prompt(&request);
    let draft = state.llm.complete(LOR_SYSTEM_PROMPT, &prompt).await?;

    let updated = state
        .storage
        .update_request(
            id,
            RequestUpdate {
                ai_draft: Some(draft),
                ..Default::default()
            },
        )
        .await?;

    info!("Generated draft for request {}", updated.id);

    Ok(Json(updated))
}

/// PUT /api/requests/:id/draft
///
/// Faculty edits to the draft, in review only.
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDraftBody>,
) -> Result<Json<LorRequest>, AppError> {
    if body.draft.trim().is_empty() {
        return Err(AppError::Validation("draft cannot be empty".to_string()));
    }

    let request = fetch_request(&state, id).await?;
    require_in_review(&request, "edit the draft of")?;

    let updated = state
        .storage
        .update_request(
            id,
            RequestUpdate {
                ai_draft: Some(body.draft),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(updated))
}

// ────────────────────────────────────────────────────────────────────────────
// Notifications
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/notifications?userId=
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = state.storage.list_notifications(query.user_id).await?;
    Ok(Json(notifications))
}

/// POST /api/notifications/:id/read
pub async fn handle_mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.storage.mark_notification_read(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/notifications/read-all?userId=
pub async fn handle_mark_all_notifications_read(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    state
        .storage
        .mark_all_notifications_read(query.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn fetch_request(state: &AppState, id: Uuid) -> Result<LorRequest, AppError> {
    state
        .storage
        .get_request(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {id} not found")))
}

fn require_in_review(request: &LorRequest, verb: &str) -> Result<(), AppError> {
    if request.status != RequestStatus::InReview {
        return Err(AppError::Validation(format!(
            "Cannot {verb} a request in status '{}'",
            request.status
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::memory::MemStorage;
    use crate::storage::Storage;

    fn new_request_body() -> NewLorRequest {
        NewLorRequest {
            student_id: Uuid::new_v4(),
            student_name: "Aarav Mehta".to_string(),
            faculty_id: Uuid::new_v4(),
            faculty_name: "Dr. Priya Sharma".to_string(),
            program: "MS in Computer Science".to_string(),
            university: "Stanford University".to_string(),
            purpose: "Graduate admission".to_string(),
            deadline: "2026-01-15".to_string(),
            details: "Led the course project on federated learning".to_string(),
        }
    }

    /// Drives the same storage writes the handlers perform, without the HTTP
    /// layer, so the end-to-end invariant can be asserted against MemStorage.
    #[tokio::test]
    async fn test_approval_flow_sets_final_lor_exactly_at_approved() {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());

        let request = storage.create_request(new_request_body()).await.unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.final_lor.is_none());

        // accept
        let next = apply(request.status, RequestAction::Accept, None).unwrap();
        let request = storage
            .update_request(
                request.id,
                RequestUpdate {
                    status: Some(next),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(request.status, RequestStatus::InReview);
        assert!(request.final_lor.is_none());

        // approve without a draft must fail before any write
        assert!(apply(request.status, RequestAction::Approve, request.ai_draft.as_deref()).is_err());

        // draft, then approve
        let request = storage
            .update_request(
                request.id,
                RequestUpdate {
                    ai_draft: Some("Dear Committee, I recommend Aarav.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let next = apply(request.status, RequestAction::Approve, request.ai_draft.as_deref())
            .unwrap();
        let request = storage
            .update_request(
                request.id,
                RequestUpdate {
                    status: Some(next),
                    final_lor: request.ai_draft.clone(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(
            request.final_lor.as_deref(),
            Some("Dear Committee, I recommend Aarav.")
        );

        // terminal: nothing applies anymore
        for action in [
            RequestAction::Accept,
            RequestAction::Approve,
            RequestAction::Decline,
        ] {
            assert!(apply(request.status, action, request.ai_draft.as_deref()).is_err());
        }
    }

    #[test]
    fn test_create_body_validation() {
        let body: CreateRequestBody = serde_json::from_value(serde_json::json!({
            "studentId": Uuid::new_v4(),
            "studentName": "Aarav Mehta",
            "facultyId": Uuid::new_v4(),
            "facultyName": "Dr. Priya Sharma",
            "program": "MS in Computer Science",
            "university": "Stanford University",
            "purpose": "Graduate admission",
            "deadline": "2026-01-15",
            "details": "Led the course project"
        }))
        .unwrap();
        assert!(body.validate().is_ok());

        let empty_program: CreateRequestBody = serde_json::from_value(serde_json::json!({
            "studentId": Uuid::new_v4(),
            "studentName": "Aarav Mehta",
            "facultyId": Uuid::new_v4(),
            "facultyName": "Dr. Priya Sharma",
            "program": "",
            "university": "Stanford University",
            "purpose": "Graduate admission",
            "deadline": "2026-01-15",
            "details": "Led the course project"
        }))
        .unwrap();
        assert!(empty_program.validate().is_err());
    }

    #[test]
    fn test_require_in_review_rejects_other_statuses() {
        let mut request = LorRequest {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            student_name: "Aarav Mehta".to_string(),
            faculty_id: Uuid::new_v4(),
            faculty_name: "Dr. Priya Sharma".to_string(),
            program: "MS in Computer Science".to_string(),
            university: "Stanford University".to_string(),
            purpose: "Graduate admission".to_string(),
            deadline: "2026-01-15".to_string(),
            details: "Led the course project".to_string(),
            status: RequestStatus::Pending,
            ai_draft: None,
            final_lor: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert!(require_in_review(&request, "edit").is_err());
        request.status = RequestStatus::InReview;
        assert!(require_in_review(&request, "edit").is_ok());
    }
}
