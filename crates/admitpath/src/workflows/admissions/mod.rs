//! Admissions counselling workflows: the domain records fetched from the
//! hosted datastore, the eligibility rubric, and the dashboard aggregations
//! built on top of them.

pub mod analytics;
pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{
    analytics_report, counsellor_performance, AnalyticsReport, ApsStats, CounsellorMetrics,
    CounsellorPerformanceReport, CountryCount, FunnelStage, GrowthRates, PerformanceSummary,
    TrendPoint,
};
pub use domain::{
    canonical_application_status, canonical_document_status, parse_timestamp, ApplicationRecord,
    ApsSubmissionRecord, ConsultationRecord, DocumentRecord, EligibilityCheckRecord,
    EligibilityProfile, MessageRecord, PlatformSnapshot, ProfileRecord, UserRecord, UNKNOWN_BUCKET,
};
pub use eligibility::{EligibilityConfig, EligibilityEngine, EligibilityOutcome, EnglishBand};
pub use repository::{DirectoryRepository, InMemoryDirectory, RepositoryError};
pub use router::admissions_router;
pub use service::{AdmissionsService, AdmissionsServiceError, DEFAULT_WINDOW_DAYS};
