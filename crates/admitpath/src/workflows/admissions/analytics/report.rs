use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::engagement::engagement_metrics;
use super::funnel::funnel_counts;
use super::trends::{growth_rates, trend_series};
use super::views::{AnalyticsReport, ApsStats, CountryCount};
use super::round2;
use crate::workflows::admissions::domain::{
    canonical_application_status, canonical_document_status, parse_optional_timestamp,
    PlatformSnapshot, UNKNOWN_BUCKET,
};

/// Windows at least this long report all-time user totals instead of
/// windowed ones.
const ALL_TIME_WINDOW_DAYS: i64 = 365;

/// How many countries the demographics section reports.
const TOP_COUNTRY_LIMIT: usize = 5;

/// Aggregate the platform snapshot into the admin dashboard report.
///
/// `now` is captured once by the caller and reused for every relative-date
/// computation in the call, so all sections agree on the window. Records
/// with missing or unparseable timestamps drop out of windowed sections
/// instead of failing the aggregation.
pub fn analytics_report(
    snapshot: &PlatformSnapshot,
    window_days: i64,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    let window_start = now - Duration::days(window_days);
    let in_range = |created_at: &Option<String>| {
        parse_optional_timestamp(created_at).is_some_and(|at| at >= window_start)
    };

    // User totals, with the all-time shortcut for year-plus windows. The
    // shortcut deliberately covers only these two totals.
    let total_users_all_time = snapshot.users.len() as u64;
    let total_students_all_time = snapshot.users.iter().filter(|u| u.is_student()).count() as u64;
    let (total_users, total_students) = if window_days < ALL_TIME_WINDOW_DAYS {
        let windowed = snapshot
            .users
            .iter()
            .filter(|user| in_range(&user.created_at));
        let mut users = 0;
        let mut students = 0;
        for user in windowed {
            users += 1;
            if user.is_student() {
                students += 1;
            }
        }
        (users, students)
    } else {
        (total_users_all_time, total_students_all_time)
    };

    let total_consultations = snapshot
        .consultations
        .iter()
        .filter(|consultation| in_range(&consultation.created_at))
        .count() as u64;

    // Document tallies over the windowed set
    let documents_in_range: Vec<_> = snapshot
        .documents
        .iter()
        .filter(|document| in_range(&document.created_at))
        .collect();

    let mut document_stats: BTreeMap<String, u64> = BTreeMap::new();
    let mut document_by_type: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_revisions: u64 = 0;
    for document in &documents_in_range {
        let status = canonical_document_status(document.status.as_deref());
        *document_stats.entry(status.to_string()).or_insert(0) += 1;

        let doc_type = document
            .doc_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_BUCKET);
        *document_by_type.entry(doc_type.to_string()).or_insert(0) += 1;

        total_revisions += u64::from(document.revision_count.unwrap_or(0));
    }

    let total_documents = documents_in_range.len() as u64;
    let average_revisions_per_document = if total_documents > 0 {
        round2(total_revisions as f64 / total_documents as f64)
    } else {
        0.0
    };

    // Application tallies over the windowed set
    let mut application_stats: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_applications: u64 = 0;
    for application in snapshot
        .applications
        .iter()
        .filter(|application| in_range(&application.created_at))
    {
        let status = canonical_application_status(application.status.as_deref());
        *application_stats.entry(status.to_string()).or_insert(0) += 1;
        total_applications += 1;
    }

    // APS submissions tally the whole collection, not the window
    let mut aps_stats = ApsStats {
        total: snapshot.aps_submissions.len() as u64,
        ..ApsStats::default()
    };
    for aps in &snapshot.aps_submissions {
        match aps.status.as_deref() {
            Some("verified") => aps_stats.verified += 1,
            Some("submitted") | Some("in_review") => aps_stats.pending += 1,
            _ => aps_stats.draft += 1,
        }
    }

    let monthly_trends = trend_series(snapshot, window_days, now);
    let growth_rates = growth_rates(&monthly_trends);

    // Funnel stages run on all-time student totals
    let funnel = funnel_counts(
        snapshot,
        total_students_all_time,
        aps_stats.verified,
        &document_stats,
        &application_stats,
    );
    let conversion_rate = round2(funnel.conversion_rate());
    let profile_completion_rate = round2(funnel.profile_completion_rate());
    let conversion_funnel = funnel.stages();

    let messages_in_range: Vec<_> = snapshot
        .messages
        .iter()
        .filter(|message| in_range(&message.created_at))
        .collect();
    let engagement = engagement_metrics(&messages_in_range);

    let top_countries = top_countries(snapshot);

    AnalyticsReport {
        total_users,
        total_students,
        total_consultations,
        document_stats,
        document_by_type,
        total_documents,
        average_revisions_per_document,
        application_stats,
        total_applications,
        aps_stats,
        monthly_trends,
        conversion_funnel,
        conversion_rate,
        profile_completion_rate,
        total_messages: engagement.total_messages,
        student_messages: engagement.student_messages,
        counsellor_messages: engagement.counsellor_messages,
        avg_response_time_hours: round2(engagement.avg_response_time_hours),
        top_countries,
        growth_rates,
    }
}

/// Profiles per country, falling back to nationality, then "Unknown". The
/// sort is stable so ties keep first-seen order.
fn top_countries(snapshot: &PlatformSnapshot) -> Vec<CountryCount> {
    let mut countries: Vec<CountryCount> = Vec::new();

    for profile in &snapshot.profiles {
        let country = profile
            .country
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| profile.nationality.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("Unknown");

        match countries.iter_mut().find(|entry| entry.country == country) {
            Some(entry) => entry.count += 1,
            None => countries.push(CountryCount {
                country: country.to_string(),
                count: 1,
            }),
        }
    }

    countries.sort_by(|a, b| b.count.cmp(&a.count));
    countries.truncate(TOP_COUNTRY_LIMIT);
    countries
}
