use std::cmp::Ordering;

use super::engagement::{gap_hours, RESPONSE_CUTOFF_HOURS};
use super::views::{CounsellorMetrics, CounsellorPerformanceReport, PerformanceSummary};
use super::{round1, round2};
use crate::workflows::admissions::domain::{
    is_pending_document_status, PlatformSnapshot, UserRecord,
};

/// Weight of one pending document review relative to one assigned student.
const PENDING_DOC_WEIGHT: f64 = 2.0;
/// Weight of one verified APS submission.
const APS_VERIFIED_WEIGHT: f64 = 1.5;

/// Per-counsellor workload and throughput metrics over the full snapshot,
/// ordered by descending workload score, with a cross-counsellor summary.
pub fn counsellor_performance(snapshot: &PlatformSnapshot) -> CounsellorPerformanceReport {
    let mut counsellors: Vec<CounsellorMetrics> = snapshot
        .users
        .iter()
        .filter(|user| user.is_staff())
        .map(|user| counsellor_metrics(snapshot, user))
        .collect();

    counsellors.sort_by(|a, b| {
        b.workload_score
            .partial_cmp(&a.workload_score)
            .unwrap_or(Ordering::Equal)
    });

    let total_counsellors = counsellors.len() as u64;
    let summary = PerformanceSummary {
        total_students_assigned: counsellors.iter().map(|c| c.students_assigned).sum(),
        total_aps_verified: counsellors.iter().map(|c| c.aps_verified).sum(),
        total_docs_approved: counsellors.iter().map(|c| c.docs_approved).sum(),
        avg_workload: if counsellors.is_empty() {
            0.0
        } else {
            round1(
                counsellors.iter().map(|c| c.workload_score).sum::<f64>()
                    / counsellors.len() as f64,
            )
        },
    };

    CounsellorPerformanceReport {
        counsellors,
        total_counsellors,
        summary,
    }
}

fn counsellor_metrics(snapshot: &PlatformSnapshot, counsellor: &UserRecord) -> CounsellorMetrics {
    let id = counsellor.id.as_str();

    let counsellor_name = counsellor
        .full_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| {
            counsellor
                .email
                .as_deref()
                .filter(|email| !email.is_empty())
        })
        .unwrap_or("Unknown")
        .to_string();

    let students_assigned = snapshot
        .profiles
        .iter()
        .filter(|profile| profile.assigned_counsellor_id.as_deref() == Some(id))
        .count() as u64;

    let aps_verified = snapshot
        .aps_submissions
        .iter()
        .filter(|aps| {
            aps.reviewed_by.as_deref() == Some(id) && aps.status.as_deref() == Some("verified")
        })
        .count() as u64;

    let docs_approved = snapshot
        .documents
        .iter()
        .filter(|doc| {
            doc.reviewed_by.as_deref() == Some(id) && doc.status.as_deref() == Some("approved")
        })
        .count() as u64;

    let docs_pending = snapshot
        .documents
        .iter()
        .filter(|doc| {
            doc.assigned_to.as_deref() == Some(id)
                && is_pending_document_status(doc.status.as_deref())
        })
        .count() as u64;

    let total_messages = snapshot
        .messages
        .iter()
        .filter(|message| message.sender_id == id)
        .count() as u64;

    let avg_response_time_hours = round2(response_time_for(snapshot, id));

    let workload_score = round1(
        students_assigned as f64
            + docs_pending as f64 * PENDING_DOC_WEIGHT
            + aps_verified as f64 * APS_VERIFIED_WEIGHT,
    );

    CounsellorMetrics {
        counsellor_id: counsellor.id.clone(),
        counsellor_name,
        counsellor_email: counsellor.email.clone(),
        students_assigned,
        aps_verified,
        docs_approved,
        docs_pending,
        total_messages,
        avg_response_time_hours,
        workload_score,
    }
}

/// Average hours from a student message to this counsellor's reply. Pairs
/// are adjacent messages in snapshot order that share a conversation id;
/// gaps past the cutoff are ignored.
fn response_time_for(snapshot: &PlatformSnapshot, counsellor_id: &str) -> f64 {
    let mut response_hours = Vec::new();

    for pair in snapshot.messages.windows(2) {
        let (message, reply) = (&pair[0], &pair[1]);
        if message.is_from_student()
            && reply.sender_id == counsellor_id
            && message.shares_conversation(reply)
        {
            if let Some(hours) = gap_hours(message, reply) {
                if hours < RESPONSE_CUTOFF_HOURS {
                    response_hours.push(hours);
                }
            }
        }
    }

    if response_hours.is_empty() {
        0.0
    } else {
        response_hours.iter().sum::<f64>() / response_hours.len() as f64
    }
}
