use crate::workflows::admissions::domain::{parse_optional_timestamp, MessageRecord};

/// Longest counsellor reply delay still counted as a response.
pub(crate) const RESPONSE_CUTOFF_HOURS: f64 = 72.0;

/// Upper bound on how many sorted messages the response scan walks.
const RESPONSE_SAMPLE_LIMIT: usize = 50;

#[derive(Debug, Default, PartialEq)]
pub(crate) struct EngagementMetrics {
    pub(crate) total_messages: u64,
    pub(crate) student_messages: u64,
    pub(crate) counsellor_messages: u64,
    pub(crate) avg_response_time_hours: f64,
}

/// Message-volume and response-time metrics over the in-range messages.
///
/// The response figure is an approximation: messages are ordered globally by
/// timestamp and every student message immediately followed by a staff
/// message counts as a response pair, whatever conversation either belongs
/// to. Only the first [`RESPONSE_SAMPLE_LIMIT`] sorted messages are scanned
/// and only gaps under [`RESPONSE_CUTOFF_HOURS`] are averaged.
pub(crate) fn engagement_metrics(messages: &[&MessageRecord]) -> EngagementMetrics {
    let total_messages = messages.len() as u64;
    let student_messages = messages.iter().filter(|m| m.is_from_student()).count() as u64;
    let counsellor_messages = messages.iter().filter(|m| m.is_from_staff()).count() as u64;

    let mut avg_response_time_hours = 0.0;
    if messages.len() > 1 {
        let mut sorted: Vec<&MessageRecord> = messages.to_vec();
        sorted.sort_by(|a, b| {
            a.created_at
                .as_deref()
                .unwrap_or("")
                .cmp(b.created_at.as_deref().unwrap_or(""))
        });

        let mut response_hours = Vec::new();
        for i in 1..sorted.len().min(RESPONSE_SAMPLE_LIMIT) {
            let prev = sorted[i - 1];
            let curr = sorted[i];
            if prev.is_from_student() && curr.is_from_staff() {
                if let Some(hours) = gap_hours(prev, curr) {
                    if hours < RESPONSE_CUTOFF_HOURS {
                        response_hours.push(hours);
                    }
                }
            }
        }

        if !response_hours.is_empty() {
            avg_response_time_hours =
                response_hours.iter().sum::<f64>() / response_hours.len() as f64;
        }
    }

    EngagementMetrics {
        total_messages,
        student_messages,
        counsellor_messages,
        avg_response_time_hours,
    }
}

/// Hours between two messages, when both timestamps parse.
pub(crate) fn gap_hours(earlier: &MessageRecord, later: &MessageRecord) -> Option<f64> {
    let earlier_at = parse_optional_timestamp(&earlier.created_at)?;
    let later_at = parse_optional_timestamp(&later.created_at)?;
    Some((later_at - earlier_at).num_milliseconds() as f64 / 3_600_000.0)
}
