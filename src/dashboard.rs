use std::fmt::Write;

use colored::Colorize;
use log::warn;
use rusqlite::Result;

use crate::analytics::{
    ActivitySummary, DayBucket, SkillRankings, TimeWindow, WEEK_WINDOW_DAYS, bucket_by_day,
    filter_by_window, rank_skills, summarize,
};
use crate::clock::Clock;
use crate::records::{Child, Progress};
use crate::store::Store;

/// Everything the parent dashboard shows for one child.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub child: Child,
    pub window: TimeWindow,
    pub summary: ActivitySummary,
    pub today_minutes: i64,
    pub weekly: Vec<DayBucket>,
    pub rankings: SkillRankings,
}

/// Assembles the dashboard from the store. The child must exist; a
/// store failure while loading activities or progress degrades to an
/// empty collection (logged, never propagated) so the dashboard still
/// renders a zeroed view.
pub fn build_dashboard(
    store: &Store,
    clock: &dyn Clock,
    child_id: i64,
    window: TimeWindow,
) -> Result<DashboardReport> {
    let child = store
        .get_child(child_id)?
        .ok_or(rusqlite::Error::QueryReturnedNoRows)?;

    let activities = store.activities_for_child(child_id).unwrap_or_else(|e| {
        warn!("Could not load activities for child {}: {}", child_id, e);
        Vec::new()
    });
    let progress = store.progress_for_child(child_id).unwrap_or_else(|e| {
        warn!("Could not load progress for child {}: {}", child_id, e);
        Vec::new()
    });

    let now = clock.now();
    let weekly = bucket_by_day(&activities, now, WEEK_WINDOW_DAYS);
    let summary = summarize(&filter_by_window(&activities, window, now));
    let today_seconds: i64 = filter_by_window(&activities, TimeWindow::Today, now)
        .iter()
        .map(|a| a.time_spent_seconds)
        .sum();
    let rankings = rank_skills(&progress);

    Ok(DashboardReport {
        child,
        window,
        summary,
        today_minutes: minutes(today_seconds),
        weekly,
        rankings,
    })
}

/// Renders the report for the terminal.
pub fn render(report: &DashboardReport) -> String {
    let mut output = String::new();
    let child = &report.child;

    let _ = writeln!(
        output,
        "{}",
        format!("Progress Dashboard for {} (age {})", child.name, child.age).bold()
    );
    let _ = writeln!(
        output,
        "Level {} | {} total stars",
        child.current_level, child.total_stars
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "{}", "Weekly activity".bold());
    for bucket in &report.weekly {
        let _ = writeln!(
            output,
            "  {}: {} stars, {} min",
            bucket.label,
            bucket.stars_sum,
            minutes(bucket.time_spent_sum)
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "{}", window_title(report.window).bold());
    let _ = writeln!(output, "  Activities completed: {}", report.summary.count);
    let _ = writeln!(
        output,
        "  Learning time: {} min",
        minutes(report.summary.total_time_seconds)
    );
    let _ = writeln!(output, "  Stars earned: {}", report.summary.total_stars);
    let _ = writeln!(
        output,
        "  Average accuracy: {}%",
        report.summary.average_accuracy_percent
    );
    let _ = writeln!(output);

    if report.today_minutes > 0 {
        let _ = writeln!(
            output,
            "{}",
            format!(
                "Great job today! {} practiced for {} minute(s).",
                child.name, report.today_minutes
            )
            .green()
        );
        let _ = writeln!(output);
    }

    let _ = writeln!(output, "{}", "Strengths".green().bold());
    write_skills(&mut output, &report.rankings.strengths);
    let _ = writeln!(output);

    let _ = writeln!(output, "{}", "Areas to focus on".yellow().bold());
    write_skills(&mut output, &report.rankings.weaknesses);

    output
}

fn write_skills(output: &mut String, skills: &[Progress]) {
    if skills.is_empty() {
        let _ = writeln!(output, "  No skills practiced yet.");
        return;
    }
    for skill in skills {
        let _ = writeln!(
            output,
            "  {} ({}): {:.0}%",
            skill.skill_area,
            skill.subject.as_str(),
            skill.mastery_level
        );
    }
}

fn window_title(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::Today => "Today",
        TimeWindow::Week => "This week",
        TimeWindow::Month => "This month",
        TimeWindow::All => "All time",
    }
}

fn minutes(seconds: i64) -> i64 {
    (seconds as f64 / 60.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::clock::FixedClock;
    use crate::records::{NewActivity, Subject};

    fn fixed_clock() -> FixedClock {
        // Saturday
        FixedClock::from_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
    }

    fn create_test_store() -> Store {
        Store::with_clock(":memory:", Arc::new(fixed_clock())).expect("Failed to create test store")
    }

    fn seed_activity(store: &Store, child_id: i64, days_back: i64, stars: i32, seconds: i64) {
        let completed = fixed_clock().now() - chrono::Duration::days(days_back);
        store
            .create_activity(&NewActivity {
                child_id,
                level_id: 1,
                completed_at: Some(completed),
                stars_earned: stars,
                correct_answers: 8,
                total_questions: 10,
                time_spent_seconds: seconds,
            })
            .unwrap();
    }

    #[test]
    fn test_build_dashboard_missing_child_is_an_error() {
        let store = create_test_store();
        let clock = fixed_clock();
        assert!(build_dashboard(&store, &clock, 42, TimeWindow::Week).is_err());
    }

    #[test]
    fn test_build_dashboard_empty_store_zeroed_view() {
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        let clock = fixed_clock();

        let report = build_dashboard(&store, &clock, child_id, TimeWindow::Week).unwrap();

        assert_eq!(report.weekly.len(), 7);
        assert!(report.weekly.iter().all(|b| b.stars_sum == 0));
        assert_eq!(report.summary.count, 0);
        assert_eq!(report.summary.average_accuracy_percent, 0);
        assert_eq!(report.today_minutes, 0);
        assert!(report.rankings.strengths.is_empty());
    }

    #[test]
    fn test_build_dashboard_aggregates_for_window() {
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        seed_activity(&store, child_id, 0, 3, 300);
        seed_activity(&store, child_id, 2, 2, 240);
        seed_activity(&store, child_id, 10, 1, 600);
        let clock = fixed_clock();

        let report = build_dashboard(&store, &clock, child_id, TimeWindow::Week).unwrap();

        assert_eq!(report.summary.count, 2);
        assert_eq!(report.summary.total_stars, 5);
        assert_eq!(report.summary.total_time_seconds, 540);
        assert_eq!(report.today_minutes, 5);

        let chart_stars: i64 = report.weekly.iter().map(|b| b.stars_sum).sum();
        assert_eq!(chart_stars, 5);

        let all = build_dashboard(&store, &clock, child_id, TimeWindow::All).unwrap();
        assert_eq!(all.summary.count, 3);
        assert_eq!(all.summary.total_stars, 6);
    }

    #[test]
    fn test_build_dashboard_ranks_progress() {
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        store
            .create_progress(child_id, Subject::Math, "addition", 90.0)
            .unwrap();
        store
            .create_progress(child_id, Subject::Math, "subtraction", 40.0)
            .unwrap();
        store
            .create_progress(child_id, Subject::Reading, "phonics", 70.0)
            .unwrap();
        let clock = fixed_clock();

        let report = build_dashboard(&store, &clock, child_id, TimeWindow::All).unwrap();

        assert_eq!(report.rankings.strengths[0].skill_area, "addition");
        assert_eq!(report.rankings.weaknesses[0].skill_area, "subtraction");
    }

    #[test]
    fn test_render_empty_dashboard() {
        colored::control::set_override(false);
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        let clock = fixed_clock();

        let report = build_dashboard(&store, &clock, child_id, TimeWindow::Week).unwrap();
        let output = render(&report);

        insta::assert_snapshot!(output, @r"
Progress Dashboard for Mia (age 7)
Level 1 | 0 total stars

Weekly activity
  Sun: 0 stars, 0 min
  Mon: 0 stars, 0 min
  Tue: 0 stars, 0 min
  Wed: 0 stars, 0 min
  Thu: 0 stars, 0 min
  Fri: 0 stars, 0 min
  Sat: 0 stars, 0 min

This week
  Activities completed: 0
  Learning time: 0 min
  Stars earned: 0
  Average accuracy: 0%

Strengths
  No skills practiced yet.

Areas to focus on
  No skills practiced yet.
");
    }

    #[test]
    fn test_render_mentions_today_practice() {
        colored::control::set_override(false);
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        seed_activity(&store, child_id, 0, 3, 300);
        let clock = fixed_clock();

        let report = build_dashboard(&store, &clock, child_id, TimeWindow::Week).unwrap();
        let output = render(&report);

        assert!(output.contains("Great job today! Mia practiced for 5 minute(s)."));
        assert!(output.contains("  Sat: 3 stars, 5 min"));
        assert!(output.contains("Average accuracy: 80%"));
    }
}
