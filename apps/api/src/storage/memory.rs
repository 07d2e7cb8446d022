//! Process-local storage backed by `RwLock<HashMap>` maps.
//!
//! The default backend. Holds nothing across restarts — suitable for local
//! development and tests. Faculty are seeded at construction and immutable
//! afterwards (no update surface exists).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::faculty::{Faculty, NewFaculty};
use crate::models::letter::{GeneratedLor, NewGeneratedLor};
use crate::models::workflow::{
    LorRequest, NewLorRequest, NewNotification, Notification, RequestParty, RequestUpdate,
};
use crate::workflow::RequestStatus;

use super::{Storage, StorageError};

#[derive(Default)]
pub struct MemStorage {
    faculty: RwLock<HashMap<Uuid, Faculty>>,
    letters: RwLock<HashMap<Uuid, GeneratedLor>>,
    requests: RwLock<HashMap<Uuid, LorRequest>>,
    notifications: RwLock<HashMap<Uuid, Notification>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a store pre-populated with the sample faculty directory.
    pub fn with_seed_faculty() -> Self {
        let mut faculty = HashMap::new();
        for new in seed_faculty() {
            let id = Uuid::new_v4();
            faculty.insert(
                id,
                Faculty {
                    id,
                    name: new.name,
                    designation: new.designation,
                    department: new.department,
                    email: new.email,
                    courses_taught: new.courses_taught,
                    years_of_experience: new.years_of_experience,
                    profile_image: new.profile_image,
                },
            );
        }
        Self {
            faculty: RwLock::new(faculty),
            ..Self::default()
        }
    }
}

fn seed_faculty() -> Vec<NewFaculty> {
    let entry = |name: &str, designation: &str, email: &str, courses: &[&str], years: &str| {
        NewFaculty {
            name: name.to_string(),
            designation: designation.to_string(),
            department: "Computer Engineering Department".to_string(),
            email: email.to_string(),
            courses_taught: courses.iter().map(|c| c.to_string()).collect(),
            years_of_experience: Some(years.to_string()),
            profile_image: None,
        }
    };

    vec![
        entry(
            "Dr. S M",
            "Assistant Professor",
            "s.m@somaiya.edu",
            &["Data Structures", "Algorithms", "Artificial Intelligence"],
            "8 years",
        ),
        entry(
            "Prof. Rajesh Kumar",
            "Associate Professor",
            "rajesh.kumar@somaiya.edu",
            &["Database Management", "Software Engineering", "Web Technologies"],
            "12 years",
        ),
        entry(
            "Dr. Priya Sharma",
            "Assistant Professor",
            "priya.sharma@somaiya.edu",
            &["Machine Learning", "Computer Networks", "Operating Systems"],
            "6 years",
        ),
        entry(
            "Prof. Amit Patel",
            "Professor",
            "amit.patel@somaiya.edu",
            &["Computer Architecture", "Compiler Design", "Theory of Computation"],
            "15 years",
        ),
    ]
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_faculty(&self, id: Uuid) -> Result<Option<Faculty>, StorageError> {
        Ok(self.faculty.read().await.get(&id).cloned())
    }

    async fn list_faculty(&self) -> Result<Vec<Faculty>, StorageError> {
        let mut all: Vec<Faculty> = self.faculty.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn create_faculty(&self, new: NewFaculty) -> Result<Faculty, StorageError> {
        let faculty = Faculty {
            id: Uuid::new_v4(),
            name: new.name,
            designation: new.designation,
            department: new.department,
            email: new.email,
            courses_taught: new.courses_taught,
            years_of_experience: new.years_of_experience,
            profile_image: new.profile_image,
        };
        self.faculty
            .write()
            .await
            .insert(faculty.id, faculty.clone());
        Ok(faculty)
    }

    async fn create_letter(&self, new: NewGeneratedLor) -> Result<GeneratedLor, StorageError> {
        let letter = GeneratedLor {
            id: Uuid::new_v4(),
            student_name: new.student_name,
            student_email: new.student_email,
            faculty_id: new.faculty_id,
            lor_content: new.lor_content,
            student_profile: new.student_profile,
            created_at: Utc::now(),
        };
        self.letters.write().await.insert(letter.id, letter.clone());
        Ok(letter)
    }

    async fn get_letter(&self, id: Uuid) -> Result<Option<GeneratedLor>, StorageError> {
        Ok(self.letters.read().await.get(&id).cloned())
    }

    async fn create_request(&self, new: NewLorRequest) -> Result<LorRequest, StorageError> {
        let now = Utc::now();
        let request = LorRequest {
            id: Uuid::new_v4(),
            student_id: new.student_id,
            student_name: new.student_name,
            faculty_id: new.faculty_id,
            faculty_name: new.faculty_name,
            program: new.program,
            university: new.university,
            purpose: new.purpose,
            deadline: new.deadline,
            details: new.details,
            status: RequestStatus::Pending,
            ai_draft: None,
            final_lor: None,
            created_at: now,
            updated_at: now,
        };
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request)
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<LorRequest>, StorageError> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn list_requests(
        &self,
        user_id: Uuid,
        party: RequestParty,
    ) -> Result<Vec<LorRequest>, StorageError> {
        let requests = self.requests.read().await;
        let mut matched: Vec<LorRequest> = requests
            .values()
            .filter(|r| match party {
                RequestParty::Student => r.student_id == user_id,
                RequestParty::Faculty => r.faculty_id == user_id,
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn update_request(
        &self,
        id: Uuid,
        update: RequestUpdate,
    ) -> Result<LorRequest, StorageError> {
        let mut requests = self.requests.write().await;
        let request = requests.get_mut(&id).ok_or(StorageError::NoRowUpdated)?;
        if let Some(status) = update.status {
            request.status = status;
        }
        if let Some(draft) = update.ai_draft {
            request.ai_draft = Some(draft);
        }
        if let Some(final_lor) = update.final_lor {
            request.final_lor = Some(final_lor);
        }
        request.updated_at = Utc::now();
        Ok(request.clone())
    }

    async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, StorageError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            request_id: new.request_id,
            message: new.message,
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>, StorageError> {
        let notifications = self.notifications.read().await;
        let mut matched: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<(), StorageError> {
        let mut notifications = self.notifications.write().await;
        if let Some(n) = notifications.get_mut(&id) {
            n.is_read = true;
        }
        Ok(())
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<(), StorageError> {
        let mut notifications = self.notifications.write().await;
        for n in notifications.values_mut().filter(|n| n.user_id == user_id) {
            n.is_read = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request(student_id: Uuid, faculty_id: Uuid) -> NewLorRequest {
        NewLorRequest {
            student_id,
            student_name: "Aarav Mehta".to_string(),
            faculty_id,
            faculty_name: "Dr. Priya Sharma".to_string(),
            program: "MS in Computer Science".to_string(),
            university: "Stanford University".to_string(),
            purpose: "Graduate admission".to_string(),
            deadline: "2026-01-15".to_string(),
            details: "Worked on a course project in distributed systems".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seed_faculty_directory_is_populated() {
        let store = MemStorage::with_seed_faculty();
        let all = store.list_faculty().await.unwrap();
        assert_eq!(all.len(), 4);
        let priya = all
            .iter()
            .find(|f| f.name == "Dr. Priya Sharma")
            .expect("seeded faculty present");
        assert_eq!(priya.department, "Computer Engineering Department");
        assert!(priya.courses_taught.contains(&"Machine Learning".to_string()));

        let by_id = store.get_faculty(priya.id).await.unwrap();
        assert!(by_id.is_some());
        assert!(store.get_faculty(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_faculty_assigns_id() {
        let store = MemStorage::new();
        let created = store
            .create_faculty(NewFaculty {
                name: "Dr. Meera Nair".to_string(),
                designation: "Professor".to_string(),
                department: "Information Technology Department".to_string(),
                email: "meera.nair@somaiya.edu".to_string(),
                courses_taught: vec!["Cloud Computing".to_string()],
                years_of_experience: Some("10 years".to_string()),
                profile_image: None,
            })
            .await
            .unwrap();
        let fetched = store.get_faculty(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Dr. Meera Nair");
    }

    #[tokio::test]
    async fn test_request_create_and_update() {
        let store = MemStorage::new();
        let created = store
            .create_request(sample_request(Uuid::new_v4(), Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(created.status, RequestStatus::Pending);
        assert!(created.ai_draft.is_none());
        assert!(created.final_lor.is_none());

        let updated = store
            .update_request(
                created.id,
                RequestUpdate {
                    status: Some(RequestStatus::InReview),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::InReview);
        assert!(updated.updated_at >= created.updated_at);

        let missing = store
            .update_request(Uuid::new_v4(), RequestUpdate::default())
            .await;
        assert!(matches!(missing, Err(StorageError::NoRowUpdated)));
    }

    #[tokio::test]
    async fn test_list_requests_scoped_by_party() {
        let store = MemStorage::new();
        let student = Uuid::new_v4();
        let faculty = Uuid::new_v4();
        store
            .create_request(sample_request(student, faculty))
            .await
            .unwrap();
        store
            .create_request(sample_request(Uuid::new_v4(), faculty))
            .await
            .unwrap();

        let mine = store
            .list_requests(student, RequestParty::Student)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);

        let theirs = store
            .list_requests(faculty, RequestParty::Faculty)
            .await
            .unwrap();
        assert_eq!(theirs.len(), 2);
    }

    #[tokio::test]
    async fn test_mark_all_read_touches_only_that_user() {
        let store = MemStorage::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let request_id = Uuid::new_v4();

        for user in [alice, alice, bob] {
            store
                .create_notification(NewNotification {
                    user_id: user,
                    request_id,
                    message: "New LOR request".to_string(),
                })
                .await
                .unwrap();
        }

        store.mark_all_notifications_read(alice).await.unwrap();

        let alices = store.list_notifications(alice).await.unwrap();
        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|n| n.is_read));

        let bobs = store.list_notifications(bob).await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert!(bobs.iter().all(|n| !n.is_read));
    }

    #[tokio::test]
    async fn test_letters_are_append_only_records() {
        let store = MemStorage::new();
        let letter = store
            .create_letter(NewGeneratedLor {
                student_name: "Aarav Mehta".to_string(),
                student_email: None,
                faculty_id: Uuid::new_v4(),
                lor_content: "It is my pleasure to recommend...".to_string(),
                student_profile: serde_json::json!({"name": "Aarav Mehta"}),
            })
            .await
            .unwrap();

        let fetched = store.get_letter(letter.id).await.unwrap().unwrap();
        assert_eq!(fetched.lor_content, letter.lor_content);
    }
}
