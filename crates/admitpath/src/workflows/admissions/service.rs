use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::analytics::{analytics_report, counsellor_performance};
use super::analytics::{AnalyticsReport, CounsellorPerformanceReport};
use super::domain::{EligibilityCheckRecord, EligibilityProfile, PlatformSnapshot};
use super::eligibility::{EligibilityConfig, EligibilityEngine, EligibilityOutcome};
use super::repository::{DirectoryRepository, RepositoryError};

/// Default reporting window when a request does not name one.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Service composing the directory repository with the two aggregation
/// engines. Each call captures `now` once and loads a fresh snapshot, so
/// concurrent callers never share state.
pub struct AdmissionsService<R> {
    repository: Arc<R>,
    engine: EligibilityEngine,
    default_window_days: i64,
}

impl<R> AdmissionsService<R>
where
    R: DirectoryRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EligibilityConfig) -> Self {
        Self {
            repository,
            engine: EligibilityEngine::new(config),
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_default_window(mut self, days: i64) -> Self {
        self.default_window_days = days;
        self
    }

    /// Build the admin dashboard report for the requested window.
    pub fn analytics(
        &self,
        window_days: Option<i64>,
    ) -> Result<AnalyticsReport, AdmissionsServiceError> {
        let days = window_days.unwrap_or(self.default_window_days);
        if days < 1 {
            return Err(AdmissionsServiceError::InvalidWindow { days });
        }

        let snapshot = self.load_snapshot()?;
        Ok(analytics_report(&snapshot, days, Utc::now()))
    }

    /// Build the counsellor staffing report over the full directory.
    pub fn counsellor_performance(
        &self,
    ) -> Result<CounsellorPerformanceReport, AdmissionsServiceError> {
        let snapshot = self.load_snapshot()?;
        Ok(counsellor_performance(&snapshot))
    }

    /// Score a profile and persist the outcome so the funnel's
    /// "Eligibility Checked" stage reflects it.
    pub fn check_eligibility(
        &self,
        student_id: &str,
        profile: &EligibilityProfile,
    ) -> Result<EligibilityOutcome, AdmissionsServiceError> {
        let outcome = self.engine.score(profile);

        self.repository
            .record_eligibility_check(EligibilityCheckRecord {
                user_id: Some(student_id.to_string()),
                eligible: outcome.eligible,
                score: outcome.score,
                created_at: Some(Utc::now().to_rfc3339()),
            })?;

        Ok(outcome)
    }

    /// Materialize every collection. Required collections propagate their
    /// errors; the eligibility collection degrades to absent.
    fn load_snapshot(&self) -> Result<PlatformSnapshot, AdmissionsServiceError> {
        let eligibility_checks = match self.repository.eligibility_checks() {
            Ok(checks) => Some(checks),
            Err(error) => {
                warn!(%error, "eligibility checks unavailable; funnel stage degrades to zero");
                None
            }
        };

        Ok(PlatformSnapshot {
            users: self.repository.users()?,
            profiles: self.repository.profiles()?,
            documents: self.repository.documents()?,
            applications: self.repository.applications()?,
            consultations: self.repository.consultations()?,
            messages: self.repository.messages()?,
            aps_submissions: self.repository.aps_submissions()?,
            eligibility_checks,
        })
    }
}

/// Error raised by the admissions service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionsServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("analytics window must cover at least one day, got {days}")]
    InvalidWindow { days: i64 },
}
