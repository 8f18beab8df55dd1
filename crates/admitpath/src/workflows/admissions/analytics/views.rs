use serde::Serialize;
use std::collections::BTreeMap;

/// One trend bucket. The serialized key for the label is `month` for every
/// bucket width; dashboard consumers key on it regardless of granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub students: u64,
    pub applications: u64,
    pub consultations: u64,
}

/// A named stage of the applicant journey with its absolute count. Stages are
/// independent tallies; later stages may exceed earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStage {
    pub stage: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

/// Fixed-bucket tally for APS submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApsStats {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
    pub draft: u64,
}

/// Period-over-period growth, one decimal place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrowthRates {
    pub students: f64,
    pub applications: f64,
    pub documents: f64,
    pub consultations: f64,
}

/// The full dashboard payload. Field names are a wire contract with the
/// admin frontend; renaming any of them is a breaking change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_users: u64,
    pub total_students: u64,
    pub total_consultations: u64,
    pub document_stats: BTreeMap<String, u64>,
    pub document_by_type: BTreeMap<String, u64>,
    pub total_documents: u64,
    pub average_revisions_per_document: f64,
    pub application_stats: BTreeMap<String, u64>,
    pub total_applications: u64,
    pub aps_stats: ApsStats,
    pub monthly_trends: Vec<TrendPoint>,
    pub conversion_funnel: Vec<FunnelStage>,
    pub conversion_rate: f64,
    pub profile_completion_rate: f64,
    pub total_messages: u64,
    pub student_messages: u64,
    pub counsellor_messages: u64,
    pub avg_response_time_hours: f64,
    pub top_countries: Vec<CountryCount>,
    pub growth_rates: GrowthRates,
}

/// Per-counsellor workload and throughput metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounsellorMetrics {
    pub counsellor_id: String,
    pub counsellor_name: String,
    pub counsellor_email: Option<String>,
    pub students_assigned: u64,
    pub aps_verified: u64,
    pub docs_approved: u64,
    pub docs_pending: u64,
    pub total_messages: u64,
    pub avg_response_time_hours: f64,
    pub workload_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_students_assigned: u64,
    pub total_aps_verified: u64,
    pub total_docs_approved: u64,
    pub avg_workload: f64,
}

/// Staffing report: counsellors ordered by descending workload score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CounsellorPerformanceReport {
    pub counsellors: Vec<CounsellorMetrics>,
    pub total_counsellors: u64,
    pub summary: PerformanceSummary,
}
