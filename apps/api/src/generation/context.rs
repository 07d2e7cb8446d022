//! Context assembly — deterministically serializes the structured input into
//! the natural-language user prompt sent to the LLM.
//!
//! Ordering is fixed and optional blocks are emitted only when the user
//! actually supplied them, so identical input always yields an identical
//! prompt. Every non-empty questionnaire field must appear in the output
//! (tested below) — the letter is only as personal as the context.

use crate::models::faculty::Faculty;
use crate::models::student::{ResumeData, StudentProfile};
use crate::models::workflow::LorRequest;

use super::prompts::GENERATION_INSTRUCTION;

/// Assembles the complete user prompt for a single-shot generation call.
pub fn build_user_prompt(profile: &StudentProfile, faculty: &Faculty) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        build_faculty_context(faculty, &profile.questionnaire.course_name),
        build_student_context(profile),
        GENERATION_INSTRUCTION
    )
}

/// The professor's side of the context: identity, credentials, and the
/// course they taught this student.
pub fn build_faculty_context(faculty: &Faculty, course_name: &str) -> String {
    let years = faculty
        .years_of_experience
        .as_deref()
        .unwrap_or("Multiple years");
    let other_courses = if faculty.courses_taught.is_empty() {
        "Various courses in the department".to_string()
    } else {
        faculty.courses_taught.join(", ")
    };

    format!(
        "PROFESSOR DETAILS:\n\
         Name: {}\n\
         Designation: {}\n\
         Department: {}\n\
         Email: {}\n\
         Course Taught to Student: {}\n\
         Years of Experience: {}\n\
         Other Courses: {}",
        faculty.name,
        faculty.designation,
        faculty.department,
        faculty.email,
        course_name,
        years,
        other_courses
    )
}

/// The student's side of the context: questionnaire answers first, then any
/// resume facts. Empty optional fields leave no trace in the output.
pub fn build_student_context(profile: &StudentProfile) -> String {
    let q = &profile.questionnaire;
    let mut out = String::new();

    out.push_str("STUDENT DETAILS:\n");
    out.push_str(&format!("Name: {}\n", profile.name));
    if let Some(email) = non_empty(profile.email.as_deref()) {
        out.push_str(&format!("Email: {email}\n"));
    }

    out.push_str("\nRELATIONSHIP WITH PROFESSOR:\n");
    out.push_str(&q.relationship_details);
    out.push_str(&format!("\nCourse: {}\n", q.course_name));
    if let Some(semester) = non_empty(q.semester.as_deref()) {
        out.push_str(&format!("Semester: {semester}\n"));
    }
    if let Some(duration) = non_empty(q.interaction_duration.as_deref()) {
        out.push_str(&format!("Duration: {duration}\n"));
    }

    out.push_str(&format!(
        "\nKEY SKILLS TO HIGHLIGHT:\n{}\n",
        q.key_skills.join(", ")
    ));
    out.push_str(&format!("\nWORKING STYLE:\n{}\n", q.working_style.join(", ")));
    out.push_str(&format!(
        "\nCHALLENGE OVERCOME:\n{}\n",
        q.challenge_description
    ));

    if let Some(achievements) = non_empty(q.additional_achievements.as_deref()) {
        out.push_str(&format!("\nADDITIONAL ACHIEVEMENTS:\n{achievements}\n"));
    }
    if q.in_council {
        if let (Some(name), Some(post)) = (
            non_empty(q.council_name.as_deref()),
            non_empty(q.council_post.as_deref()),
        ) {
            out.push_str(&format!("\nLEADERSHIP ROLE:\nPosition: {post} at {name}\n"));
        }
    }

    out.push_str(&format!("\nPURPOSE OF LOR:\n{}\n", q.lor_purpose));
    if let Some(country) = non_empty(q.target_country.as_deref()) {
        out.push_str(&format!("Target Country: {country}\n"));
    }
    if let Some(university_type) = non_empty(q.university_type.as_deref()) {
        out.push_str(&format!("University Type: {university_type}\n"));
    }

    if let Some(story) = non_empty(q.personal_story.as_deref()) {
        out.push_str(&format!("\nPERSONAL STORY:\n{story}\n"));
    }
    if let Some(other) = non_empty(q.other_details.as_deref()) {
        out.push_str(&format!("\nOTHER DETAILS:\n{other}\n"));
    }

    if let Some(resume) = &profile.resume_data {
        append_resume_context(&mut out, resume);
    }

    out.trim_end().to_string()
}

fn append_resume_context(out: &mut String, resume: &ResumeData) {
    if let Some(cgpa) = non_empty(resume.cgpa.as_deref()) {
        out.push_str(&format!("\nACADEMIC PERFORMANCE:\nCGPA: {cgpa}\n"));
    }

    if !resume.courses.is_empty() {
        out.push_str("\nRELEVANT COURSES:\n");
        for course in &resume.courses {
            out.push_str(&format!("- {}", course.name));
            if let Some(grade) = non_empty(course.grade.as_deref()) {
                out.push_str(&format!(" (Grade: {grade})"));
            }
            out.push('\n');
        }
    }

    if !resume.projects.is_empty() {
        out.push_str("\nPROJECTS:\n");
        for project in &resume.projects {
            out.push_str(&format!("- {}: {}", project.name, project.description));
            if let Some(role) = non_empty(project.role.as_deref()) {
                out.push_str(&format!(" (Role: {role})"));
            }
            out.push('\n');
        }
    }

    if !resume.internships.is_empty() {
        out.push_str("\nINTERNSHIPS:\n");
        for internship in &resume.internships {
            out.push_str(&format!(
                "- {} at {} ({})",
                internship.role, internship.company, internship.duration
            ));
            if let Some(impact) = non_empty(internship.impact.as_deref()) {
                out.push_str(&format!(": {impact}"));
            }
            out.push('\n');
        }
    }

    if !resume.technical_skills.is_empty() {
        out.push_str(&format!(
            "\nTECHNICAL SKILLS:\n{}\n",
            resume.technical_skills.join(", ")
        ));
    }
    if !resume.achievements.is_empty() {
        out.push_str("\nACHIEVEMENTS:\n");
        for achievement in &resume.achievements {
            out.push_str(&format!("- {achievement}\n"));
        }
    }
    if !resume.awards.is_empty() {
        out.push_str("\nAWARDS:\n");
        for award in &resume.awards {
            out.push_str(&format!("- {award}\n"));
        }
    }
    if !resume.extracurricular.is_empty() {
        out.push_str("\nEXTRACURRICULAR ACTIVITIES:\n");
        for activity in &resume.extracurricular {
            out.push_str(&format!("- {activity}\n"));
        }
    }
}

/// Assembles the user prompt for a workflow draft, built from the request's
/// own fields rather than a questionnaire.
pub fn build_request_prompt(request: &LorRequest) -> String {
    format!(
        "PROFESSOR DETAILS:\n\
         Name: {}\n\n\
         STUDENT DETAILS:\n\
         Name: {}\n\n\
         APPLICATION:\n\
         Program: {}\n\
         University: {}\n\
         Purpose: {}\n\
         Deadline: {}\n\n\
         STUDENT-PROVIDED DETAILS:\n\
         {}\n\n\
         {}",
        request.faculty_name,
        request.student_name,
        request.program,
        request.university,
        request.purpose,
        request.deadline,
        request.details,
        GENERATION_INSTRUCTION
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::{CourseRecord, QuestionnaireResponse};
    use uuid::Uuid;

    fn priya_sharma() -> Faculty {
        Faculty {
            id: Uuid::new_v4(),
            name: "Dr. Priya Sharma".to_string(),
            designation: "Assistant Professor".to_string(),
            department: "Computer Engineering Department".to_string(),
            email: "priya.sharma@somaiya.edu".to_string(),
            courses_taught: vec![
                "Machine Learning".to_string(),
                "Computer Networks".to_string(),
            ],
            years_of_experience: Some("6 years".to_string()),
            profile_image: None,
        }
    }

    fn questionnaire() -> QuestionnaireResponse {
        QuestionnaireResponse {
            relationship_details: "She taught me for two semesters and supervised my ML project"
                .to_string(),
            course_name: "Machine Learning".to_string(),
            semester: Some("VI".to_string()),
            interaction_duration: None,
            in_council: true,
            council_name: Some("Computer Society".to_string()),
            council_post: Some("Technical Head".to_string()),
            key_skills: vec!["Problem solving".to_string(), "Research aptitude".to_string()],
            challenge_description: "Rebuilt our failing course project pipeline a week before the deadline"
                .to_string(),
            additional_achievements: Some("Won the department hackathon".to_string()),
            working_style: vec!["Independent".to_string(), "Detail-oriented".to_string()],
            lor_purpose: "MS applications".to_string(),
            target_country: Some("USA".to_string()),
            university_type: None,
            personal_story: None,
            other_details: Some("  ".to_string()), // whitespace-only: must be omitted
        }
    }

    fn profile() -> StudentProfile {
        StudentProfile {
            name: "Aarav Mehta".to_string(),
            email: Some("aarav.mehta@somaiya.edu".to_string()),
            questionnaire: questionnaire(),
            resume_data: None,
        }
    }

    #[test]
    fn test_faculty_context_names_department_and_course() {
        let context = build_faculty_context(&priya_sharma(), "Machine Learning");
        assert!(context.contains("Dr. Priya Sharma"));
        assert!(context.contains("Computer Engineering Department"));
        assert!(context.contains("Course Taught to Student: Machine Learning"));
        assert!(context.contains("6 years"));
    }

    #[test]
    fn test_faculty_context_falls_back_when_fields_missing() {
        let mut faculty = priya_sharma();
        faculty.years_of_experience = None;
        faculty.courses_taught.clear();
        let context = build_faculty_context(&faculty, "Machine Learning");
        assert!(context.contains("Years of Experience: Multiple years"));
        assert!(context.contains("Other Courses: Various courses in the department"));
    }

    #[test]
    fn test_student_context_contains_every_supplied_field() {
        let context = build_student_context(&profile());
        for expected in [
            "Aarav Mehta",
            "aarav.mehta@somaiya.edu",
            "supervised my ML project",
            "Course: Machine Learning",
            "Semester: VI",
            "Problem solving, Research aptitude",
            "Independent, Detail-oriented",
            "failing course project pipeline",
            "Won the department hackathon",
            "Technical Head at Computer Society",
            "MS applications",
            "Target Country: USA",
        ] {
            assert!(context.contains(expected), "missing: {expected}");
        }
    }

    #[test]
    fn test_student_context_omits_empty_optionals() {
        let context = build_student_context(&profile());
        assert!(!context.contains("Duration:"));
        assert!(!context.contains("University Type:"));
        assert!(!context.contains("PERSONAL STORY"));
        assert!(!context.contains("OTHER DETAILS"));
    }

    #[test]
    fn test_council_block_requires_both_name_and_post() {
        let mut p = profile();
        p.questionnaire.council_post = None;
        let context = build_student_context(&p);
        assert!(!context.contains("LEADERSHIP ROLE"));
    }

    #[test]
    fn test_resume_blocks_appear_when_present() {
        let mut p = profile();
        p.resume_data = Some(ResumeData {
            cgpa: Some("9.1".to_string()),
            courses: vec![CourseRecord {
                name: "Deep Learning".to_string(),
                grade: Some("A".to_string()),
                semester: None,
            }],
            technical_skills: vec!["Python".to_string(), "PyTorch".to_string()],
            ..Default::default()
        });
        let context = build_student_context(&p);
        assert!(context.contains("CGPA: 9.1"));
        assert!(context.contains("- Deep Learning (Grade: A)"));
        assert!(context.contains("Python, PyTorch"));
        assert!(!context.contains("PROJECTS:"));
        assert!(!context.contains("INTERNSHIPS:"));
    }

    #[test]
    fn test_generation_scenario_prompt_is_literal() {
        // Given Dr. Priya Sharma and a Machine Learning questionnaire, the
        // full prompt must literally contain both substrings.
        let prompt = build_user_prompt(&profile(), &priya_sharma());
        assert!(prompt.contains("Machine Learning"));
        assert!(prompt.contains("Dr. Priya Sharma"));
        assert!(prompt.ends_with(GENERATION_INSTRUCTION));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_user_prompt(&profile(), &priya_sharma());
        let mut faculty = priya_sharma();
        faculty.id = Uuid::new_v4(); // id does not participate in the prompt
        let b = build_user_prompt(&profile(), &faculty);
        assert_eq!(a, b);
    }

    #[test]
    fn test_request_prompt_carries_application_fields() {
        let request = LorRequest {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            student_name: "Aarav Mehta".to_string(),
            faculty_id: Uuid::new_v4(),
            faculty_name: "Dr. Priya Sharma".to_string(),
            program: "MS in Computer Science".to_string(),
            university: "Stanford University".to_string(),
            purpose: "Graduate admission".to_string(),
            deadline: "2026-01-15".to_string(),
            details: "Led the course project on federated learning".to_string(),
            status: crate::workflow::RequestStatus::InReview,
            ai_draft: None,
            final_lor: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let prompt = build_request_prompt(&request);
        assert!(prompt.contains("Stanford University"));
        assert!(prompt.contains("MS in Computer Science"));
        assert!(prompt.contains("federated learning"));
        assert!(prompt.contains("Dr. Priya Sharma"));
    }
}
