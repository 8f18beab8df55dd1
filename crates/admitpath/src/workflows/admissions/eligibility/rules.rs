use super::config::EligibilityConfig;
use crate::workflows::admissions::domain::EligibilityProfile;

const RECOGNIZED_GERMAN_LEVELS: [&str; 4] = ["B1", "B2", "C1", "C2"];

/// Accumulated points and guidance across the five rubric dimensions.
#[derive(Debug, Default)]
pub(crate) struct ScoreBreakdown {
    pub(crate) score: u32,
    pub(crate) recommendations: Vec<String>,
    pub(crate) warnings: Vec<String>,
    pub(crate) eligible_programs: Vec<String>,
    pub(crate) improvement_areas: Vec<String>,
}

pub(crate) fn score_profile(
    profile: &EligibilityProfile,
    config: &EligibilityConfig,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    // Academic standing
    if profile.cgpa_percentage >= config.strong_cgpa_percentage {
        breakdown.score += 25;
        breakdown
            .eligible_programs
            .push("Most Master's programs".to_string());
    } else if profile.cgpa_percentage >= config.fair_cgpa_percentage {
        breakdown.score += 15;
        breakdown
            .eligible_programs
            .push("Many Master's programs".to_string());
        breakdown
            .warnings
            .push("Some top universities require 70%+ CGPA".to_string());
    } else {
        breakdown.score += 5;
        breakdown
            .warnings
            .push("Low CGPA may limit program options".to_string());
        breakdown
            .improvement_areas
            .push("Consider programs with flexible CGPA requirements".to_string());
    }

    // Language proficiency; tests outside the recognized set contribute nothing
    if let Some(band) = config.english_band(&profile.english_test_type) {
        if profile.english_score >= band.good {
            breakdown.score += 25;
        } else if profile.english_score >= band.minimum {
            breakdown.score += 15;
            breakdown
                .recommendations
                .push("Consider retaking English test for better scores".to_string());
        } else {
            breakdown.score += 5;
            breakdown.warnings.push(format!(
                "English score below minimum for most programs ({})",
                band.minimum
            ));
            breakdown
                .improvement_areas
                .push("Improve English language proficiency".to_string());
        }
    }

    // Professional experience buckets
    match profile.work_experience_years.as_str() {
        "2-5 years" | "5+ years" => {
            breakdown.score += 20;
            breakdown
                .recommendations
                .push("Strong work experience enhances application".to_string());
        }
        "1-2 years" => {
            breakdown.score += 10;
        }
        _ => {
            breakdown.score += 5;
            breakdown
                .recommendations
                .push("Internships or projects can strengthen application".to_string());
        }
    }

    // German language readiness
    let german_recognized = profile
        .german_level
        .as_deref()
        .is_some_and(|level| RECOGNIZED_GERMAN_LEVELS.contains(&level));
    if german_recognized {
        breakdown.score += 15;
        breakdown
            .recommendations
            .push("Good German skills increase program options".to_string());
    } else {
        breakdown.score += 5;
        breakdown
            .recommendations
            .push("Learning German (at least A2/B1) is highly recommended".to_string());
        breakdown
            .improvement_areas
            .push("Start learning German language".to_string());
    }

    // Alignment between academic background and target program
    let field = profile.field_of_study.to_lowercase();
    if profile.preferred_program.to_lowercase().contains(&field) {
        breakdown.score += 15;
        breakdown
            .recommendations
            .push("Strong academic background for chosen program".to_string());
    } else {
        breakdown.score += 5;
        breakdown
            .warnings
            .push("Different academic background may require additional qualifications".to_string());
    }

    breakdown
}
