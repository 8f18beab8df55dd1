use std::collections::{BTreeMap, HashSet};

use super::views::FunnelStage;
use crate::workflows::admissions::domain::PlatformSnapshot;

/// Counts feeding both the funnel stages and the derived rates.
#[derive(Debug, Default)]
pub(crate) struct FunnelCounts {
    pub(crate) total_students: u64,
    pub(crate) profiles_completed: u64,
    pub(crate) eligibility_checked: u64,
    pub(crate) aps_verified: u64,
    pub(crate) docs_approved: u64,
    pub(crate) apps_submitted: u64,
    pub(crate) enrolled: u64,
}

impl FunnelCounts {
    pub(crate) fn stages(&self) -> Vec<FunnelStage> {
        vec![
            FunnelStage {
                stage: "Total Students",
                count: self.total_students,
            },
            FunnelStage {
                stage: "Profile Completed",
                count: self.profiles_completed,
            },
            FunnelStage {
                stage: "Eligibility Checked",
                count: self.eligibility_checked,
            },
            FunnelStage {
                stage: "APS Verified",
                count: self.aps_verified,
            },
            FunnelStage {
                stage: "Docs Approved",
                count: self.docs_approved,
            },
            FunnelStage {
                stage: "Application Submitted",
                count: self.apps_submitted,
            },
            FunnelStage {
                stage: "Enrolled",
                count: self.enrolled,
            },
        ]
    }

    pub(crate) fn conversion_rate(&self) -> f64 {
        ratio_pct(self.enrolled, self.total_students)
    }

    pub(crate) fn profile_completion_rate(&self) -> f64 {
        ratio_pct(self.profiles_completed, self.total_students)
    }
}

fn ratio_pct(count: u64, total: u64) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Build the funnel counts. Stage tallies are independent of each other and
/// of the report's date window; status-derived stages reuse the tallies the
/// report already computed so both views always agree.
pub(crate) fn funnel_counts(
    snapshot: &PlatformSnapshot,
    total_students: u64,
    aps_verified: u64,
    doc_stats: &BTreeMap<String, u64>,
    app_stats: &BTreeMap<String, u64>,
) -> FunnelCounts {
    let profiles_completed = snapshot
        .profiles
        .iter()
        .filter(|profile| profile.is_completed())
        .count() as u64;

    // Distinct students, drawn from the best-effort eligibility collection.
    let eligibility_checked = snapshot
        .eligibility_checks
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .filter_map(|check| check.user_id.as_deref().filter(|id| !id.is_empty()))
        .collect::<HashSet<_>>()
        .len() as u64;

    let status_count = |stats: &BTreeMap<String, u64>, status: &str| {
        stats.get(status).copied().unwrap_or(0)
    };

    FunnelCounts {
        total_students,
        profiles_completed,
        eligibility_checked,
        aps_verified,
        docs_approved: status_count(doc_stats, "approved"),
        apps_submitted: status_count(app_stats, "submitted")
            + status_count(app_stats, "in_review")
            + status_count(app_stats, "approved"),
        enrolled: status_count(app_stats, "enrolled"),
    }
}
