use chrono::{DateTime, Duration, Utc};

use crate::records::Activity;

/// Dashboard time filter. Every bounded window is a span of whole
/// calendar days ending on the day of "now" (Today is 1 day, Week 7,
/// Month 30), so the filter and the daily chart agree on which
/// activities belong to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Today,
    Week,
    Month,
    All,
}

impl TimeWindow {
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeWindow::Today => Some(1),
            TimeWindow::Week => Some(7),
            TimeWindow::Month => Some(30),
            TimeWindow::All => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TimeWindow::Today => "today",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::All => "all",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "today" => Some(TimeWindow::Today),
            "week" => Some(TimeWindow::Week),
            "month" => Some(TimeWindow::Month),
            "all" => Some(TimeWindow::All),
            _ => None,
        }
    }
}

/// Aggregate metrics over one window of activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub total_time_seconds: i64,
    pub total_stars: i64,
    pub average_accuracy_percent: i64,
    pub count: usize,
}

/// Keeps activities whose completion day falls inside the window,
/// preserving the input order. Pure; `All` copies the input unchanged.
pub fn filter_by_window(
    activities: &[Activity],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<Activity> {
    let Some(days) = window.days() else {
        return activities.to_vec();
    };

    let end = now.date_naive();
    let start = end - Duration::days(days - 1);

    activities
        .iter()
        .filter(|a| {
            let day = a.completed_at.date_naive();
            day >= start && day <= end
        })
        .cloned()
        .collect()
}

/// Sums time and stars and averages per-activity accuracy. Activities
/// with `total_questions == 0` carry no accuracy and are left out of
/// the average's denominator; an empty input produces explicit zeros.
pub fn summarize(activities: &[Activity]) -> ActivitySummary {
    let mut total_time_seconds = 0i64;
    let mut total_stars = 0i64;
    let mut accuracy_sum = 0.0f64;
    let mut accuracy_count = 0usize;

    for activity in activities {
        total_time_seconds += activity.time_spent_seconds;
        total_stars += i64::from(activity.stars_earned);

        if activity.total_questions > 0 {
            accuracy_sum +=
                f64::from(activity.correct_answers) / f64::from(activity.total_questions) * 100.0;
            accuracy_count += 1;
        }
    }

    let average_accuracy_percent = if accuracy_count == 0 {
        0
    } else {
        (accuracy_sum / accuracy_count as f64).round() as i64
    };

    ActivitySummary {
        total_time_seconds,
        total_stars,
        average_accuracy_percent,
        count: activities.len(),
    }
}
