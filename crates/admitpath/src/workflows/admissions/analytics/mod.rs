//! Admin dashboard aggregations: trends, funnel, engagement, demographics,
//! and counsellor staffing metrics. Every entry point is a pure function
//! over an already-fetched [`PlatformSnapshot`](crate::workflows::admissions::domain::PlatformSnapshot).

mod engagement;
mod funnel;
mod performance;
mod report;
mod trends;
pub mod views;

pub use performance::counsellor_performance;
pub use report::analytics_report;
pub use views::{
    AnalyticsReport, ApsStats, CounsellorMetrics, CounsellorPerformanceReport, CountryCount,
    FunnelStage, GrowthRates, PerformanceSummary, TrendPoint,
};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
