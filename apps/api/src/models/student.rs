//! Student-supplied input for single-shot generation: the questionnaire, the
//! (stub-parsed) resume facts, and the profile aggregate that carries both.
//!
//! These are validated at the boundary — a malformed profile fails before any
//! storage or LLM call, never deep inside prompt templating.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Free-text and enumerated answers describing the student's relationship
/// with the chosen faculty member.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
    #[validate(length(
        min = 10,
        message = "Please provide details about your relationship with the professor"
    ))]
    pub relationship_details: String,

    #[validate(length(min = 1, message = "Course name is required"))]
    pub course_name: String,

    pub semester: Option<String>,
    pub interaction_duration: Option<String>,

    #[serde(default)]
    pub in_council: bool,
    pub council_name: Option<String>,
    pub council_post: Option<String>,

    #[validate(length(min = 1, message = "Please select at least one skill"))]
    pub key_skills: Vec<String>,

    #[validate(length(min = 20, message = "Please describe a meaningful challenge"))]
    pub challenge_description: String,

    pub additional_achievements: Option<String>,

    #[validate(length(min = 1, message = "Please describe your working style"))]
    pub working_style: Vec<String>,

    #[validate(length(min = 1, message = "Purpose is required"))]
    pub lor_purpose: String,

    pub target_country: Option<String>,
    pub university_type: Option<String>,
    pub personal_story: Option<String>,
    pub other_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub name: String,
    pub grade: Option<String>,
    pub semester: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub name: String,
    pub description: String,
    pub role: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InternshipRecord {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub impact: Option<String>,
}

/// Structured academic facts nominally parsed from an uploaded resume.
/// Real extraction is out of scope — the upload endpoint fills `raw_text` only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
    pub cgpa: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub internships: Vec<InternshipRecord>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub awards: Vec<String>,
    #[serde(default)]
    pub extracurricular: Vec<String>,
    pub raw_text: Option<String>,
}

/// Everything known about the student for one generation request.
/// Transient — lives only for the duration of the request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[validate(length(min = 1, message = "Student name is required"))]
    pub name: String,

    #[validate(email(message = "Valid email is required"))]
    pub email: Option<String>,

    #[validate(nested)]
    pub questionnaire: QuestionnaireResponse,

    pub resume_data: Option<ResumeData>,
}
