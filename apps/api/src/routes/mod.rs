pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::generation::upload::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::workflow::handlers as workflow;

pub fn build_router(state: AppState) -> Router {
    // Some multipart overhead on top of the file cap itself; the exact size
    // check happens in the handler.
    let upload_limit = DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024);

    Router::new()
        .route("/health", get(health::health_handler))
        // Faculty directory
        .route("/api/faculty", get(generation::handle_list_faculty))
        .route("/api/faculty/:id", get(generation::handle_get_faculty))
        // Single-shot generation
        .route(
            "/api/parse-resume",
            post(generation::handle_parse_resume).layer(upload_limit),
        )
        .route("/api/generate-lor", post(generation::handle_generate_lor))
        .route("/api/lors/:id", get(generation::handle_get_lor))
        .route("/api/download-lor", post(generation::handle_download_lor))
        // Request/approval workflow
        .route(
            "/api/requests",
            post(workflow::handle_create_request).get(workflow::handle_list_requests),
        )
        .route("/api/requests/:id", get(workflow::handle_get_request))
        .route("/api/requests/:id/accept", post(workflow::handle_accept_request))
        .route(
            "/api/requests/:id/draft",
            post(workflow::handle_generate_draft).put(workflow::handle_update_draft),
        )
        .route("/api/requests/:id/approve", post(workflow::handle_approve_request))
        .route("/api/requests/:id/decline", post(workflow::handle_decline_request))
        // Notifications (clients poll; no push)
        .route("/api/notifications", get(workflow::handle_list_notifications))
        .route(
            "/api/notifications/:id/read",
            post(workflow::handle_mark_notification_read),
        )
        .route(
            "/api/notifications/read-all",
            post(workflow::handle_mark_all_notifications_read),
        )
        .with_state(state)
}
