use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account row from the identity directory. Extra columns in the source are
/// ignored; every attribute the analytics never relies on stays optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserRecord {
    pub fn is_student(&self) -> bool {
        matches!(self.role.as_deref(), Some("student"))
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role.as_deref(), Some("counsellor") | Some("admin"))
    }
}

/// Student profile row. `assigned_counsellor_id` is a weak back-reference,
/// never ownership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub assigned_counsellor_id: Option<String>,
    #[serde(default)]
    pub completion_percentage: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ProfileRecord {
    /// A profile counts as completed once name and contact email are present.
    pub fn is_completed(&self) -> bool {
        non_empty(&self.first_name) && non_empty(&self.last_name) && non_empty(&self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub student_id: String,
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub revision_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub counsellor_id: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_role: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MessageRecord {
    pub fn is_from_student(&self) -> bool {
        matches!(self.sender_role.as_deref(), Some("student"))
    }

    pub fn is_from_staff(&self) -> bool {
        matches!(
            self.sender_role.as_deref(),
            Some("counsellor") | Some("admin")
        )
    }

    /// Two messages belong to the same thread only when both carry a
    /// conversation id and the ids agree.
    pub fn shares_conversation(&self, other: &MessageRecord) -> bool {
        match (&self.conversation_id, &other.conversation_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApsSubmissionRecord {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Stored outcome of an eligibility check. The backing collection is
/// best-effort; aggregation tolerates its absence wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCheckRecord {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub eligible: bool,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Structured application profile submitted to the eligibility checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityProfile {
    pub highest_qualification: String,
    pub field_of_study: String,
    pub cgpa_percentage: f64,
    pub english_test_type: String,
    pub english_score: f64,
    pub work_experience_years: String,
    pub preferred_program: String,
    #[serde(default)]
    pub german_level: Option<String>,
}

/// One aggregation call's worth of raw collections, already materialized by
/// the data-access layer. The aggregators never mutate or persist these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformSnapshot {
    pub users: Vec<UserRecord>,
    pub profiles: Vec<ProfileRecord>,
    pub documents: Vec<DocumentRecord>,
    pub applications: Vec<ApplicationRecord>,
    pub consultations: Vec<ConsultationRecord>,
    pub messages: Vec<MessageRecord>,
    pub aps_submissions: Vec<ApsSubmissionRecord>,
    #[serde(default)]
    pub eligibility_checks: Option<Vec<EligibilityCheckRecord>>,
}

/// Bucket label applied to unrecognized or missing status/type strings.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Canonical application pipeline statuses. Legacy CRUD vocabulary maps onto
/// this set; anything else lands in [`UNKNOWN_BUCKET`].
pub fn canonical_application_status(raw: Option<&str>) -> &'static str {
    match raw {
        Some("submitted") | Some("applied") | Some("documents_sent") => "submitted",
        Some("in_review") | Some("under_review") => "in_review",
        Some("approved") | Some("accepted") => "approved",
        Some("enrolled") => "enrolled",
        Some("rejected") => "rejected",
        Some("withdrawn") => "withdrawn",
        _ => UNKNOWN_BUCKET,
    }
}

/// Canonical document review statuses. `in_review` is accepted as an alias
/// for `under_review`.
pub fn canonical_document_status(raw: Option<&str>) -> &'static str {
    match raw {
        Some("draft") => "draft",
        Some("submitted") => "submitted",
        Some("under_review") | Some("in_review") => "under_review",
        Some("approved") => "approved",
        Some("rejected") => "rejected",
        Some("needs_revision") => "needs_revision",
        _ => UNKNOWN_BUCKET,
    }
}

/// Document statuses that count as awaiting counsellor review.
pub fn is_pending_document_status(raw: Option<&str>) -> bool {
    matches!(
        canonical_document_status(raw),
        "submitted" | "under_review"
    )
}

/// Parse a datastore timestamp. Accepts RFC 3339 (`Z` or explicit offset),
/// offset-less ISO date-times (read as UTC), and bare dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    None
}

/// Timestamp parse lifted over the optional columns records carry.
pub(crate) fn parse_optional_timestamp(value: &Option<String>) -> Option<DateTime<Utc>> {
    value.as_deref().and_then(parse_timestamp)
}

pub(crate) fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_timestamp_accepts_zulu_offset_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01T10:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01T10:30:00"), Some(expected));

        let midnight = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-01"), Some(midnight));

        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not-a-date"), None);
    }

    #[test]
    fn parse_timestamp_normalizes_offsets_to_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-01T10:00:00+02:00"), Some(expected));
    }

    #[test]
    fn application_statuses_fold_legacy_names() {
        assert_eq!(canonical_application_status(Some("applied")), "submitted");
        assert_eq!(
            canonical_application_status(Some("documents_sent")),
            "submitted"
        );
        assert_eq!(
            canonical_application_status(Some("under_review")),
            "in_review"
        );
        assert_eq!(canonical_application_status(Some("accepted")), "approved");
        assert_eq!(canonical_application_status(Some("enrolled")), "enrolled");
        assert_eq!(canonical_application_status(Some("on_hold")), UNKNOWN_BUCKET);
        assert_eq!(canonical_application_status(None), UNKNOWN_BUCKET);
    }

    #[test]
    fn document_statuses_accept_in_review_alias() {
        assert_eq!(
            canonical_document_status(Some("in_review")),
            "under_review"
        );
        assert!(is_pending_document_status(Some("submitted")));
        assert!(is_pending_document_status(Some("in_review")));
        assert!(!is_pending_document_status(Some("approved")));
        assert!(!is_pending_document_status(None));
    }

    #[test]
    fn profile_completion_requires_name_and_email() {
        let mut profile = ProfileRecord {
            user_id: "u1".to_string(),
            first_name: Some("Asha".to_string()),
            last_name: Some("Rao".to_string()),
            email: Some("asha@example.com".to_string()),
            ..ProfileRecord::default()
        };
        assert!(profile.is_completed());

        profile.email = Some(String::new());
        assert!(!profile.is_completed());

        profile.email = None;
        assert!(!profile.is_completed());
    }

    #[test]
    fn conversation_matching_requires_both_ids() {
        let a = MessageRecord {
            id: "m1".to_string(),
            sender_id: "s1".to_string(),
            conversation_id: Some("c1".to_string()),
            ..MessageRecord::default()
        };
        let b = MessageRecord {
            id: "m2".to_string(),
            sender_id: "s2".to_string(),
            conversation_id: Some("c1".to_string()),
            ..MessageRecord::default()
        };
        let c = MessageRecord {
            id: "m3".to_string(),
            sender_id: "s3".to_string(),
            conversation_id: None,
            ..MessageRecord::default()
        };

        assert!(a.shares_conversation(&b));
        assert!(!a.shares_conversation(&c));
        assert!(!c.shares_conversation(&c.clone()));
    }
}
