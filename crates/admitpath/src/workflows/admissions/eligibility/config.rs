use serde::{Deserialize, Serialize};

/// Minimum and comfortable band for a recognized English proficiency test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnglishBand {
    pub minimum: f64,
    pub good: f64,
}

/// Rubric configuration for the eligibility scorer. The defaults carry the
/// published counselling thresholds; tests override individual bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub strong_cgpa_percentage: f64,
    pub fair_cgpa_percentage: f64,
    pub ielts: EnglishBand,
    pub toefl: EnglishBand,
    pub pte: EnglishBand,
    pub admission_threshold: u32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            strong_cgpa_percentage: 70.0,
            fair_cgpa_percentage: 60.0,
            ielts: EnglishBand {
                minimum: 6.5,
                good: 7.0,
            },
            toefl: EnglishBand {
                minimum: 85.0,
                good: 100.0,
            },
            pte: EnglishBand {
                minimum: 58.0,
                good: 65.0,
            },
            admission_threshold: 60,
        }
    }
}

impl EligibilityConfig {
    /// Band lookup keyed by test name; unrecognized tests score nothing.
    pub(crate) fn english_band(&self, test_type: &str) -> Option<EnglishBand> {
        match test_type {
            "IELTS" => Some(self.ielts),
            "TOEFL" => Some(self.toefl),
            "PTE" => Some(self.pte),
            _ => None,
        }
    }
}
