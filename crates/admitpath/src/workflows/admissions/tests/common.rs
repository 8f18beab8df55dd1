use std::sync::Arc;

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};

use crate::workflows::admissions::domain::{
    ApplicationRecord, ApsSubmissionRecord, ConsultationRecord, DocumentRecord,
    EligibilityCheckRecord, EligibilityProfile, MessageRecord, PlatformSnapshot, ProfileRecord,
    UserRecord,
};
use crate::workflows::admissions::repository::{
    DirectoryRepository, InMemoryDirectory, RepositoryError,
};
use crate::workflows::admissions::service::AdmissionsService;
use crate::workflows::admissions::EligibilityConfig;

/// Reference instant shared by the analytics fixtures: a Tuesday at noon.
pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap()
}

pub(super) fn days_ago(days: i64) -> String {
    (fixed_now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(super) fn hours_ago(hours: i64) -> String {
    (fixed_now() - Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(super) fn user(id: &str, role: &str, created_days_ago: i64) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        full_name: Some(format!("User {id}")),
        role: Some(role.to_string()),
        created_at: Some(days_ago(created_days_ago)),
    }
}

pub(super) fn student(id: &str, created_days_ago: i64) -> UserRecord {
    user(id, "student", created_days_ago)
}

pub(super) fn counsellor(id: &str, name: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        full_name: Some(name.to_string()),
        role: Some("counsellor".to_string()),
        created_at: Some(days_ago(200)),
    }
}

pub(super) fn completed_profile(user_id: &str, country: Option<&str>) -> ProfileRecord {
    ProfileRecord {
        user_id: user_id.to_string(),
        first_name: Some("First".to_string()),
        last_name: Some("Last".to_string()),
        email: Some(format!("{user_id}@example.com")),
        country: country.map(str::to_string),
        created_at: Some(days_ago(10)),
        ..ProfileRecord::default()
    }
}

pub(super) fn document(student_id: &str, status: &str, created_days_ago: i64) -> DocumentRecord {
    DocumentRecord {
        id: format!("doc-{student_id}-{status}-{created_days_ago}"),
        student_id: student_id.to_string(),
        doc_type: Some("sop".to_string()),
        status: Some(status.to_string()),
        created_at: Some(days_ago(created_days_ago)),
        ..DocumentRecord::default()
    }
}

pub(super) fn application(
    student_id: &str,
    status: &str,
    created_days_ago: i64,
) -> ApplicationRecord {
    ApplicationRecord {
        id: format!("app-{student_id}-{status}-{created_days_ago}"),
        student_id: student_id.to_string(),
        status: Some(status.to_string()),
        created_at: Some(days_ago(created_days_ago)),
    }
}

pub(super) fn consultation(student_id: &str, created_days_ago: i64) -> ConsultationRecord {
    ConsultationRecord {
        id: format!("con-{student_id}-{created_days_ago}"),
        student_id: student_id.to_string(),
        counsellor_id: Some("c1".to_string()),
        scheduled_at: Some(days_ago(created_days_ago)),
        status: Some("scheduled".to_string()),
        created_at: Some(days_ago(created_days_ago)),
    }
}

pub(super) fn message(
    id: &str,
    sender_id: &str,
    sender_role: &str,
    conversation_id: &str,
    sent_hours_ago: i64,
) -> MessageRecord {
    MessageRecord {
        id: id.to_string(),
        sender_id: sender_id.to_string(),
        sender_role: Some(sender_role.to_string()),
        receiver_id: None,
        conversation_id: Some(conversation_id.to_string()),
        created_at: Some(hours_ago(sent_hours_ago)),
    }
}

pub(super) fn aps(student_id: &str, status: &str, reviewed_by: Option<&str>) -> ApsSubmissionRecord {
    ApsSubmissionRecord {
        id: format!("aps-{student_id}-{status}"),
        student_id: student_id.to_string(),
        status: Some(status.to_string()),
        reviewed_by: reviewed_by.map(str::to_string),
        created_at: Some(days_ago(15)),
    }
}

pub(super) fn eligibility_check(user_id: &str) -> EligibilityCheckRecord {
    EligibilityCheckRecord {
        user_id: Some(user_id.to_string()),
        eligible: true,
        score: 75,
        created_at: Some(days_ago(5)),
    }
}

/// A small but fully populated platform snapshot.
pub(super) fn sample_snapshot() -> PlatformSnapshot {
    PlatformSnapshot {
        users: vec![
            student("s1", 2),
            student("s2", 9),
            student("s3", 400),
            counsellor("c1", "Dana Weiss"),
            user("a1", "admin", 300),
        ],
        profiles: vec![
            completed_profile("s1", Some("DE")),
            completed_profile("s2", Some("IN")),
            ProfileRecord {
                user_id: "s3".to_string(),
                ..ProfileRecord::default()
            },
        ],
        documents: vec![
            document("s1", "approved", 3),
            document("s1", "submitted", 4),
            document("s2", "draft", 6),
        ],
        applications: vec![
            application("s1", "submitted", 3),
            application("s2", "enrolled", 5),
        ],
        consultations: vec![consultation("s1", 2), consultation("s2", 40)],
        messages: vec![
            message("m1", "s1", "student", "conv-1", 30),
            message("m2", "c1", "counsellor", "conv-1", 28),
        ],
        aps_submissions: vec![
            aps("s1", "verified", Some("c1")),
            aps("s2", "submitted", None),
        ],
        eligibility_checks: Some(vec![eligibility_check("s1")]),
    }
}

pub(super) fn build_service(
    snapshot: PlatformSnapshot,
) -> (
    AdmissionsService<InMemoryDirectory>,
    Arc<InMemoryDirectory>,
) {
    let repository = Arc::new(InMemoryDirectory::new(snapshot));
    let service = AdmissionsService::new(repository.clone(), EligibilityConfig::default());
    (service, repository)
}

/// Profile hitting the top tier of every rubric dimension.
pub(super) fn strong_profile() -> EligibilityProfile {
    EligibilityProfile {
        highest_qualification: "Bachelor of Technology".to_string(),
        field_of_study: "Computer Science".to_string(),
        cgpa_percentage: 75.0,
        english_test_type: "IELTS".to_string(),
        english_score: 7.2,
        work_experience_years: "5+ years".to_string(),
        preferred_program: "MSc Computer Science".to_string(),
        german_level: Some("B2".to_string()),
    }
}

/// Profile missing every tier, including a test type the rubric ignores.
pub(super) fn weak_profile() -> EligibilityProfile {
    EligibilityProfile {
        highest_qualification: "Bachelor of Arts".to_string(),
        field_of_study: "History".to_string(),
        cgpa_percentage: 55.0,
        english_test_type: "Other".to_string(),
        english_score: 50.0,
        work_experience_years: "<1 year".to_string(),
        preferred_program: "MSc Data Engineering".to_string(),
        german_level: None,
    }
}

/// Repository whose required collections are all offline.
pub(super) struct UnavailableDirectory;

impl DirectoryRepository for UnavailableDirectory {
    fn users(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn profiles(&self) -> Result<Vec<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn documents(&self) -> Result<Vec<DocumentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn applications(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn consultations(&self) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn messages(&self) -> Result<Vec<MessageRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn aps_submissions(&self) -> Result<Vec<ApsSubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn eligibility_checks(&self) -> Result<Vec<EligibilityCheckRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_eligibility_check(
        &self,
        _record: EligibilityCheckRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
