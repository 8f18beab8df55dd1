use std::path::PathBuf;

use admitpath::error::AppError;
use admitpath::workflows::admissions::{
    analytics_report, counsellor_performance, AnalyticsReport, CounsellorPerformanceReport,
    EligibilityConfig, EligibilityEngine, EligibilityOutcome, EligibilityProfile,
};
use admitpath::workflows::admissions::{
    ApplicationRecord, ApsSubmissionRecord, ConsultationRecord, DocumentRecord,
    EligibilityCheckRecord, MessageRecord, PlatformSnapshot, ProfileRecord, UserRecord,
};
use chrono::{Duration, SecondsFormat, Utc};
use clap::Args;

use crate::infra::load_snapshot;

#[derive(Args, Debug)]
pub(crate) struct PlatformReportArgs {
    /// Directory of datastore CSV exports; omit to use the demo dataset
    #[arg(long)]
    pub(crate) snapshot_dir: Option<PathBuf>,
    /// Reporting window in days
    #[arg(long, default_value_t = 30)]
    pub(crate) days: i64,
}

#[derive(Args, Debug)]
pub(crate) struct CounsellorReportArgs {
    /// Directory of datastore CSV exports; omit to use the demo dataset
    #[arg(long)]
    pub(crate) snapshot_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityCheckArgs {
    #[arg(long, default_value = "Bachelor")]
    pub(crate) highest_qualification: String,
    #[arg(long)]
    pub(crate) field_of_study: String,
    #[arg(long)]
    pub(crate) cgpa_percentage: f64,
    #[arg(long, default_value = "IELTS")]
    pub(crate) english_test_type: String,
    #[arg(long)]
    pub(crate) english_score: f64,
    /// One of "<1 year", "1-2 years", "2-5 years", "5+ years"
    #[arg(long, default_value = "<1 year")]
    pub(crate) work_experience_years: String,
    #[arg(long)]
    pub(crate) preferred_program: String,
    #[arg(long)]
    pub(crate) german_level: Option<String>,
}

pub(crate) fn run_platform_report(args: PlatformReportArgs) -> Result<(), AppError> {
    let snapshot = load_snapshot(args.snapshot_dir.as_deref())?;
    let report = analytics_report(&snapshot, args.days.max(1), Utc::now());
    render_platform_report(&report, args.days.max(1));
    Ok(())
}

pub(crate) fn run_counsellor_report(args: CounsellorReportArgs) -> Result<(), AppError> {
    let snapshot = load_snapshot(args.snapshot_dir.as_deref())?;
    let report = counsellor_performance(&snapshot);
    render_counsellor_report(&report);
    Ok(())
}

pub(crate) fn run_eligibility_check(args: EligibilityCheckArgs) -> Result<(), AppError> {
    let EligibilityCheckArgs {
        highest_qualification,
        field_of_study,
        cgpa_percentage,
        english_test_type,
        english_score,
        work_experience_years,
        preferred_program,
        german_level,
    } = args;

    let profile = EligibilityProfile {
        highest_qualification,
        field_of_study,
        cgpa_percentage,
        english_test_type,
        english_score,
        work_experience_years,
        preferred_program,
        german_level,
    };

    let engine = EligibilityEngine::new(EligibilityConfig::default());
    render_eligibility_outcome(&engine.score(&profile));
    Ok(())
}

fn render_platform_report(report: &AnalyticsReport, days: i64) {
    println!("Platform analytics (last {days} days)");
    println!(
        "- {} users | {} students | {} consultations",
        report.total_users, report.total_students, report.total_consultations
    );
    println!(
        "- {} documents ({:.2} revisions avg) | {} applications",
        report.total_documents, report.average_revisions_per_document, report.total_applications
    );
    println!(
        "- APS: {} total, {} verified, {} pending, {} draft",
        report.aps_stats.total,
        report.aps_stats.verified,
        report.aps_stats.pending,
        report.aps_stats.draft
    );

    println!("\nTrend ({} buckets)", report.monthly_trends.len());
    for bucket in &report.monthly_trends {
        println!(
            "- {}: {} students, {} applications, {} consultations",
            bucket.month, bucket.students, bucket.applications, bucket.consultations
        );
    }

    println!("\nConversion funnel");
    for stage in &report.conversion_funnel {
        println!("- {}: {}", stage.stage, stage.count);
    }
    println!(
        "- conversion rate {:.2}% | profile completion {:.2}%",
        report.conversion_rate, report.profile_completion_rate
    );

    println!("\nEngagement");
    println!(
        "- {} messages ({} student / {} counsellor) | {:.2}h avg response",
        report.total_messages,
        report.student_messages,
        report.counsellor_messages,
        report.avg_response_time_hours
    );

    if report.top_countries.is_empty() {
        println!("\nTop countries: none");
    } else {
        println!("\nTop countries");
        for entry in &report.top_countries {
            println!("- {}: {}", entry.country, entry.count);
        }
    }

    println!("\nGrowth (period over period)");
    println!(
        "- students {:+.1}% | applications {:+.1}% | documents {:+.1}% | consultations {:+.1}%",
        report.growth_rates.students,
        report.growth_rates.applications,
        report.growth_rates.documents,
        report.growth_rates.consultations
    );
}

fn render_counsellor_report(report: &CounsellorPerformanceReport) {
    println!("Counsellor workload ({} counsellors)", report.total_counsellors);
    for counsellor in &report.counsellors {
        println!(
            "- {} | {} students | {} APS verified | {} approved | {} pending | {} messages | {:.2}h avg response | workload {:.1}",
            counsellor.counsellor_name,
            counsellor.students_assigned,
            counsellor.aps_verified,
            counsellor.docs_approved,
            counsellor.docs_pending,
            counsellor.total_messages,
            counsellor.avg_response_time_hours,
            counsellor.workload_score
        );
    }

    println!(
        "\nSummary: {} students assigned | {} APS verified | {} docs approved | {:.1} avg workload",
        report.summary.total_students_assigned,
        report.summary.total_aps_verified,
        report.summary.total_docs_approved,
        report.summary.avg_workload
    );
}

fn render_eligibility_outcome(outcome: &EligibilityOutcome) {
    if outcome.eligible {
        println!("Eligible (score {}/100)", outcome.score);
    } else {
        println!("Not yet eligible (score {}/100)", outcome.score);
    }

    for (label, entries) in [
        ("Eligible programs", &outcome.eligible_programs),
        ("Recommendations", &outcome.recommendations),
        ("Warnings", &outcome.warnings),
        ("Improvement areas", &outcome.improvement_areas),
    ] {
        if entries.is_empty() {
            continue;
        }
        println!("\n{label}");
        for entry in entries {
            println!("- {entry}");
        }
    }
}

fn stamp(now: chrono::DateTime<Utc>, days: i64, hours: i64) -> Option<String> {
    Some(
        (now - Duration::days(days) - Duration::hours(hours))
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// Small but representative dataset for demos and route tests: three months
/// of registrations, a review pipeline, and two counsellors with uneven
/// workloads.
pub(crate) fn demo_snapshot() -> PlatformSnapshot {
    let now = Utc::now();

    let student_seed: [(&str, &str, i64, &str); 8] = [
        ("s1", "Amira Hassan", 2, "EG"),
        ("s2", "Ravi Patel", 6, "IN"),
        ("s3", "Lena Fischer", 12, "DE"),
        ("s4", "Tunde Adeyemi", 20, "NG"),
        ("s5", "Maria Silva", 35, "BR"),
        ("s6", "Chen Wei", 50, "CN"),
        ("s7", "Sara Haddad", 75, "IN"),
        ("s8", "Ivan Petrov", 85, "DE"),
    ];

    let mut users: Vec<UserRecord> = student_seed
        .iter()
        .map(|(id, name, days, _)| UserRecord {
            id: (*id).to_string(),
            email: Some(format!("{id}@students.admitpath.example")),
            full_name: Some((*name).to_string()),
            role: Some("student".to_string()),
            created_at: stamp(now, *days, 3),
        })
        .collect();
    users.push(UserRecord {
        id: "c1".to_string(),
        email: Some("dana@admitpath.example".to_string()),
        full_name: Some("Dana Weiss".to_string()),
        role: Some("counsellor".to_string()),
        created_at: stamp(now, 300, 0),
    });
    users.push(UserRecord {
        id: "c2".to_string(),
        email: Some("leo@admitpath.example".to_string()),
        full_name: Some("Leo Brandt".to_string()),
        role: Some("counsellor".to_string()),
        created_at: stamp(now, 280, 0),
    });
    users.push(UserRecord {
        id: "a1".to_string(),
        email: Some("ops@admitpath.example".to_string()),
        full_name: Some("Platform Ops".to_string()),
        role: Some("admin".to_string()),
        created_at: stamp(now, 400, 0),
    });

    let profiles: Vec<ProfileRecord> = student_seed
        .iter()
        .enumerate()
        .map(|(index, (id, name, days, country))| {
            let (first, last) = name.split_once(' ').unwrap_or((*name, ""));
            ProfileRecord {
                user_id: (*id).to_string(),
                // The two newest registrations have not finished onboarding.
                first_name: (index >= 2).then(|| first.to_string()),
                last_name: (index >= 2).then(|| last.to_string()),
                email: (index >= 2).then(|| format!("{id}@students.admitpath.example")),
                country: Some((*country).to_string()),
                nationality: None,
                assigned_counsellor_id: Some(if index % 3 == 0 { "c2" } else { "c1" }.to_string()),
                completion_percentage: Some(if index >= 2 { 90 } else { 40 }),
                created_at: stamp(now, *days, 2),
            }
        })
        .collect();

    let documents = vec![
        DocumentRecord {
            id: "d1".to_string(),
            student_id: "s3".to_string(),
            doc_type: Some("sop".to_string()),
            status: Some("approved".to_string()),
            reviewed_by: Some("c1".to_string()),
            assigned_to: Some("c1".to_string()),
            revision_count: Some(2),
            created_at: stamp(now, 10, 0),
        },
        DocumentRecord {
            id: "d2".to_string(),
            student_id: "s4".to_string(),
            doc_type: Some("lor".to_string()),
            status: Some("submitted".to_string()),
            reviewed_by: None,
            assigned_to: Some("c1".to_string()),
            revision_count: Some(1),
            created_at: stamp(now, 4, 0),
        },
        DocumentRecord {
            id: "d3".to_string(),
            student_id: "s5".to_string(),
            doc_type: Some("resume".to_string()),
            status: Some("under_review".to_string()),
            reviewed_by: None,
            assigned_to: Some("c2".to_string()),
            revision_count: None,
            created_at: stamp(now, 8, 0),
        },
        DocumentRecord {
            id: "d4".to_string(),
            student_id: "s6".to_string(),
            doc_type: Some("sop".to_string()),
            status: Some("needs_revision".to_string()),
            reviewed_by: Some("c2".to_string()),
            assigned_to: Some("c2".to_string()),
            revision_count: Some(3),
            created_at: stamp(now, 15, 0),
        },
        DocumentRecord {
            id: "d5".to_string(),
            student_id: "s7".to_string(),
            doc_type: Some("transcript".to_string()),
            status: Some("approved".to_string()),
            reviewed_by: Some("c1".to_string()),
            assigned_to: None,
            revision_count: None,
            created_at: stamp(now, 40, 0),
        },
    ];

    let applications = vec![
        ApplicationRecord {
            id: "ap1".to_string(),
            student_id: "s3".to_string(),
            status: Some("submitted".to_string()),
            created_at: stamp(now, 9, 0),
        },
        ApplicationRecord {
            id: "ap2".to_string(),
            student_id: "s5".to_string(),
            status: Some("in_review".to_string()),
            created_at: stamp(now, 20, 0),
        },
        ApplicationRecord {
            id: "ap3".to_string(),
            student_id: "s7".to_string(),
            status: Some("approved".to_string()),
            created_at: stamp(now, 45, 0),
        },
        ApplicationRecord {
            id: "ap4".to_string(),
            student_id: "s8".to_string(),
            status: Some("enrolled".to_string()),
            created_at: stamp(now, 70, 0),
        },
    ];

    let consultations = vec![
        ConsultationRecord {
            id: "n1".to_string(),
            student_id: "s1".to_string(),
            counsellor_id: Some("c1".to_string()),
            scheduled_at: stamp(now, 1, 0),
            status: Some("scheduled".to_string()),
            created_at: stamp(now, 3, 0),
        },
        ConsultationRecord {
            id: "n2".to_string(),
            student_id: "s4".to_string(),
            counsellor_id: Some("c1".to_string()),
            scheduled_at: stamp(now, 12, 0),
            status: Some("completed".to_string()),
            created_at: stamp(now, 14, 0),
        },
        ConsultationRecord {
            id: "n3".to_string(),
            student_id: "s6".to_string(),
            counsellor_id: Some("c2".to_string()),
            scheduled_at: stamp(now, 30, 0),
            status: Some("completed".to_string()),
            created_at: stamp(now, 33, 0),
        },
    ];

    let messages = vec![
        MessageRecord {
            id: "m1".to_string(),
            sender_id: "s3".to_string(),
            sender_role: Some("student".to_string()),
            receiver_id: Some("c1".to_string()),
            conversation_id: Some("conv-s3".to_string()),
            created_at: stamp(now, 5, 6),
        },
        MessageRecord {
            id: "m2".to_string(),
            sender_id: "c1".to_string(),
            sender_role: Some("counsellor".to_string()),
            receiver_id: Some("s3".to_string()),
            conversation_id: Some("conv-s3".to_string()),
            created_at: stamp(now, 5, 3),
        },
        MessageRecord {
            id: "m3".to_string(),
            sender_id: "s4".to_string(),
            sender_role: Some("student".to_string()),
            receiver_id: Some("c1".to_string()),
            conversation_id: Some("conv-s4".to_string()),
            created_at: stamp(now, 2, 8),
        },
        MessageRecord {
            id: "m4".to_string(),
            sender_id: "c1".to_string(),
            sender_role: Some("counsellor".to_string()),
            receiver_id: Some("s4".to_string()),
            conversation_id: Some("conv-s4".to_string()),
            created_at: stamp(now, 2, 2),
        },
        MessageRecord {
            id: "m5".to_string(),
            sender_id: "s6".to_string(),
            sender_role: Some("student".to_string()),
            receiver_id: Some("c2".to_string()),
            conversation_id: Some("conv-s6".to_string()),
            created_at: stamp(now, 1, 4),
        },
    ];

    let aps_submissions = vec![
        ApsSubmissionRecord {
            id: "p1".to_string(),
            student_id: "s7".to_string(),
            status: Some("verified".to_string()),
            reviewed_by: Some("c1".to_string()),
            created_at: stamp(now, 42, 0),
        },
        ApsSubmissionRecord {
            id: "p2".to_string(),
            student_id: "s8".to_string(),
            status: Some("verified".to_string()),
            reviewed_by: Some("c2".to_string()),
            created_at: stamp(now, 60, 0),
        },
        ApsSubmissionRecord {
            id: "p3".to_string(),
            student_id: "s5".to_string(),
            status: Some("in_review".to_string()),
            reviewed_by: None,
            created_at: stamp(now, 18, 0),
        },
        ApsSubmissionRecord {
            id: "p4".to_string(),
            student_id: "s2".to_string(),
            status: Some("draft".to_string()),
            reviewed_by: None,
            created_at: stamp(now, 5, 0),
        },
    ];

    let eligibility_checks = Some(vec![
        EligibilityCheckRecord {
            user_id: Some("s3".to_string()),
            eligible: true,
            score: 85,
            created_at: stamp(now, 11, 0),
        },
        EligibilityCheckRecord {
            user_id: Some("s5".to_string()),
            eligible: true,
            score: 70,
            created_at: stamp(now, 22, 0),
        },
        EligibilityCheckRecord {
            user_id: Some("s2".to_string()),
            eligible: false,
            score: 45,
            created_at: stamp(now, 4, 0),
        },
    ]);

    PlatformSnapshot {
        users,
        profiles,
        documents,
        applications,
        consultations,
        messages,
        aps_submissions,
        eligibility_checks,
    }
}
