mod config;
mod rules;

pub use config::{EligibilityConfig, EnglishBand};

use crate::workflows::admissions::domain::EligibilityProfile;
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the admissions rubric to a submitted profile.
/// Deterministic: the same profile always yields the same outcome.
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, profile: &EligibilityProfile) -> EligibilityOutcome {
        let breakdown = rules::score_profile(profile, &self.config);
        let eligible = breakdown.score >= self.config.admission_threshold;

        let mut recommendations = breakdown.recommendations;
        let mut improvement_areas = breakdown.improvement_areas;

        if eligible {
            recommendations
                .push("You have good chances for German university admission".to_string());
            recommendations.push("Focus on preparing strong SOP and LORs".to_string());
        } else {
            recommendations.push("Consider strengthening your profile before applying".to_string());
            improvement_areas.push("Focus on improving weak areas identified above".to_string());
        }

        EligibilityOutcome {
            eligible,
            score: breakdown.score,
            recommendations,
            warnings: breakdown.warnings,
            eligible_programs: breakdown.eligible_programs,
            improvement_areas,
        }
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

/// Verdict plus categorized guidance returned to the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub eligible: bool,
    pub score: u32,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub eligible_programs: Vec<String>,
    pub improvement_areas: Vec<String>,
}
