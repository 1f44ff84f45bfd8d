use chrono::{DateTime, Duration, Utc};

use crate::records::Activity;

/// Days shown in the dashboard's weekly chart.
pub const WEEK_WINDOW_DAYS: u32 = 7;

/// One calendar day's worth of activity for charting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub label: String,
    pub stars_sum: i64,
    pub time_spent_sum: i64,
}

/// Groups activities into one bucket per calendar day, oldest first,
/// ending on the day of `reference`. Selection is by calendar-date
/// equality on `completed_at`, not elapsed time; an empty input yields
/// zeroed buckets with the labels still populated.
pub fn bucket_by_day(
    activities: &[Activity],
    reference: DateTime<Utc>,
    window_days: u32,
) -> Vec<DayBucket> {
    let end = reference.date_naive();

    (0..window_days)
        .map(|offset| {
            let day = end - Duration::days(i64::from(window_days - 1 - offset));

            let mut stars_sum = 0i64;
            let mut time_spent_sum = 0i64;
            for activity in activities
                .iter()
                .filter(|a| a.completed_at.date_naive() == day)
            {
                stars_sum += i64::from(activity.stars_earned);
                time_spent_sum += activity.time_spent_seconds;
            }

            DayBucket {
                label: day.format("%a").to_string(),
                stars_sum,
                time_spent_sum,
            }
        })
        .collect()
}
