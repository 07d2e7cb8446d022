//! Axum route handlers for the faculty directory and single-shot generation.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::generation::context::build_user_prompt;
use crate::generation::prompts::LOR_SYSTEM_PROMPT;
use crate::generation::upload::{extract_resume_stub, validate_upload};
use crate::models::faculty::Faculty;
use crate::models::letter::{GeneratedLor, NewGeneratedLor};
use crate::models::student::{ResumeData, StudentProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLorRequest {
    #[validate(nested)]
    pub student_profile: StudentProfile,
    pub faculty_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLorResponse {
    pub lor_id: Uuid,
    pub lor_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLorRequest {
    pub lor_content: String,
    pub faculty: Faculty,
    pub student_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub format: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/faculty
pub async fn handle_list_faculty(
    State(state): State<AppState>,
) -> Result<Json<Vec<Faculty>>, AppError> {
    let faculty = state.storage.list_faculty().await?;
    Ok(Json(faculty))
}

/// GET /api/faculty/:id
pub async fn handle_get_faculty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Faculty>, AppError> {
    let faculty = state
        .storage
        .get_faculty(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Faculty {id} not found")))?;
    Ok(Json(faculty))
}

/// POST /api/parse-resume
///
/// Multipart upload (field `resume`). Declared type and size are checked
/// before the bytes are touched; extraction itself is a stub that returns
/// the raw text head.
pub async fn handle_parse_resume(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeData>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes: bytes::Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        validate_upload(content_type.as_deref(), bytes.len())?;

        info!("Parsed resume upload ({} bytes)", bytes.len());
        return Ok(Json(extract_resume_stub(&bytes)));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// POST /api/generate-lor
///
/// Full generation path: validate → load faculty → assemble context →
/// LLM call → append letter. All-or-nothing; a failed call is not retried
/// and nothing is persisted on failure.
pub async fn handle_generate_lor(
    State(state): State<AppState>,
    Json(request): Json<GenerateLorRequest>,
) -> Result<Json<GenerateLorResponse>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let faculty = state
        .storage
        .get_faculty(request.faculty_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Faculty {} not found", request.faculty_id)))?;

    let prompt = build_user_prompt(&request.student_profile, &faculty);
    let lor_content = state.llm.complete(LOR_SYSTEM_PROMPT, &prompt).await?;

    let profile_snapshot = serde_json::to_value(&request.student_profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    let letter = state
        .storage
        .create_letter(NewGeneratedLor {
            student_name: request.student_profile.name.clone(),
            student_email: request.student_profile.email.clone(),
            faculty_id: faculty.id,
            lor_content,
            student_profile: profile_snapshot,
        })
        .await?;

    info!(
        "Generated letter {} for student '{}' (faculty {})",
        letter.id, letter.student_name, faculty.id
    );

    Ok(Json(GenerateLorResponse {
        lor_id: letter.id,
        lor_content: letter.lor_content,
    }))
}

/// GET /api/lors/:id
pub async fn handle_get_lor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedLor>, AppError> {
    let letter = state
        .storage
        .get_letter(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Letter {id} not found")))?;
    Ok(Json(letter))
}

/// POST /api/download-lor?format=pdf|docx
///
/// PDF/DOCX rendering is out of scope — both formats come back as a
/// plain-text attachment carrying the letterhead and signature block.
pub async fn handle_download_lor(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
    Json(request): Json<DownloadLorRequest>,
) -> Result<Response, AppError> {
    if query.format != "pdf" && query.format != "docx" {
        return Err(AppError::Validation(format!(
            "Invalid format '{}'; expected 'pdf' or 'docx'",
            query.format
        )));
    }
    if request.lor_content.trim().is_empty() {
        return Err(AppError::Validation("lorContent cannot be empty".to_string()));
    }

    let full_letter = render_letter(
        &state.config.institution_name,
        &request.lor_content,
        &request.faculty,
    );
    let filename = format!("LOR_{}.txt", request.student_name.replace(char::is_whitespace, "_"));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        full_letter,
    )
        .into_response())
}

/// Wraps the letter body with the institution letterhead above and the
/// faculty signature block below.
fn render_letter(institution: &str, content: &str, faculty: &Faculty) -> String {
    format!(
        "{institution}\n\
         (Autonomous college affiliated to the University of Mumbai)\n\n\
         LETTER OF RECOMMENDATION\n\n\
         {content}\n\n\
         {}\n{}\n{}\n{institution}\n{}",
        faculty.name, faculty.designation, faculty.department, faculty.email
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_letter_has_letterhead_and_signature() {
        let faculty = Faculty {
            id: Uuid::new_v4(),
            name: "Dr. Priya Sharma".to_string(),
            designation: "Assistant Professor".to_string(),
            department: "Computer Engineering Department".to_string(),
            email: "priya.sharma@somaiya.edu".to_string(),
            courses_taught: vec![],
            years_of_experience: None,
            profile_image: None,
        };
        let letter = render_letter(
            "K J Somaiya College of Engineering",
            "It is my pleasure to recommend Aarav.",
            &faculty,
        );
        assert!(letter.starts_with("K J Somaiya College of Engineering"));
        assert!(letter.contains("LETTER OF RECOMMENDATION"));
        assert!(letter.contains("It is my pleasure to recommend Aarav."));
        assert!(letter.ends_with("priya.sharma@somaiya.edu"));
        // Signature block sits after the body
        let body_at = letter.find("pleasure").unwrap();
        let signature_at = letter.find("Assistant Professor").unwrap();
        assert!(signature_at > body_at);
    }

    #[test]
    fn test_generate_request_rejects_short_questionnaire() {
        let json = serde_json::json!({
            "studentProfile": {
                "name": "Aarav Mehta",
                "questionnaire": {
                    "relationshipDetails": "too short",
                    "courseName": "Machine Learning",
                    "keySkills": ["Problem solving"],
                    "challengeDescription": "Rebuilt the project pipeline under deadline pressure",
                    "workingStyle": ["Independent"],
                    "lorPurpose": "MS applications"
                }
            },
            "facultyId": Uuid::new_v4()
        });
        let request: GenerateLorRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_generate_request_accepts_valid_body() {
        let json = serde_json::json!({
            "studentProfile": {
                "name": "Aarav Mehta",
                "email": "aarav.mehta@somaiya.edu",
                "questionnaire": {
                    "relationshipDetails": "She taught me for two semesters and supervised my project",
                    "courseName": "Machine Learning",
                    "keySkills": ["Problem solving"],
                    "challengeDescription": "Rebuilt the project pipeline under deadline pressure",
                    "workingStyle": ["Independent"],
                    "lorPurpose": "MS applications"
                }
            },
            "facultyId": Uuid::new_v4()
        });
        let request: GenerateLorRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_ok());
    }
}
