use log::{info, warn};
use rusqlite::Result;

use crate::progress_tracker::ProgressTracker;
use crate::records::{Level, NewActivity};
use crate::store::Store;

/// Star thresholds on session accuracy, matching the 3-star scale
/// shown on level cards.
pub fn stars_for_accuracy(accuracy_percent: f64) -> i32 {
    if accuracy_percent >= 90.0 {
        3
    } else if accuracy_percent >= 70.0 {
        2
    } else if accuracy_percent >= 50.0 {
        1
    } else {
        0
    }
}

/// Result of one completed practice session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub total_questions: i32,
    pub correct_answers: i32,
    pub time_spent_seconds: i64,
    pub accuracy_percent: f64,
    pub stars_earned: i32,
}

impl SessionSummary {
    /// Builds the summary from per-question `(correct, seconds)` outcomes.
    pub fn from_outcomes(outcomes: &[(bool, i64)]) -> Self {
        let total_questions = outcomes.len() as i32;
        let correct_answers = outcomes.iter().filter(|(correct, _)| *correct).count() as i32;
        let time_spent_seconds: i64 = outcomes.iter().map(|(_, seconds)| seconds).sum();
        let accuracy_percent = if total_questions > 0 {
            f64::from(correct_answers) / f64::from(total_questions) * 100.0
        } else {
            0.0
        };

        SessionSummary {
            total_questions,
            correct_answers,
            time_spent_seconds,
            accuracy_percent,
            stars_earned: stars_for_accuracy(accuracy_percent),
        }
    }
}

/// Service layer for completing practice sessions, decoupled from the
/// interactive loop.
pub struct SessionService<'a> {
    store: &'a Store,
}

impl<'a> SessionService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Records one finished session: creates the activity, applies the
    /// stars to the child, advances the child's level, upserts the
    /// skill mastery, and unlocks any levels the new star total covers.
    pub fn complete_session(
        &self,
        child_id: i64,
        level: &Level,
        outcomes: &[(bool, i64)],
    ) -> Result<SessionSummary> {
        let summary = SessionSummary::from_outcomes(outcomes);

        self.store.create_activity(&NewActivity {
            child_id,
            level_id: level.id,
            completed_at: None,
            stars_earned: summary.stars_earned,
            correct_answers: summary.correct_answers,
            total_questions: summary.total_questions,
            time_spent_seconds: summary.time_spent_seconds,
        })?;

        let mut child = self
            .store
            .get_child(child_id)?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        child.total_stars += summary.stars_earned;
        if level.order_index + 1 > child.current_level {
            child.current_level = level.order_index + 1;
        }
        self.store.update_child(&child)?;

        ProgressTracker::new(self.store).record_progress(
            child_id,
            level.subject,
            &level.kind,
            summary.accuracy_percent,
        )?;

        info!(
            "Session complete: child {} earned {} star(s) on level {} ({}/{} correct)",
            child_id,
            summary.stars_earned,
            level.id,
            summary.correct_answers,
            summary.total_questions
        );

        self.unlock_levels(child.total_stars);

        Ok(summary)
    }

    /// Opens every still-locked level the star total now covers.
    /// Unlocking is a best-effort pass: a store failure here degrades
    /// to a warning, the session itself is already recorded.
    fn unlock_levels(&self, total_stars: i32) {
        let levels = match self.store.get_levels() {
            Ok(levels) => levels,
            Err(e) => {
                warn!("Could not load levels for unlocking: {}", e);
                return;
            }
        };

        for level in levels
            .iter()
            .filter(|l| l.is_locked && l.required_stars <= total_stars)
        {
            match self.store.set_level_locked(level.id, false) {
                Ok(()) => info!("Unlocked level {} ({})", level.order_index, level.kind),
                Err(e) => warn!("Could not unlock level {}: {}", level.id, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Difficulty, Subject};

    fn create_test_store() -> Store {
        Store::open(":memory:").expect("Failed to create test store")
    }

    fn outcomes(correct: usize, incorrect: usize) -> Vec<(bool, i64)> {
        let mut all = vec![(true, 20i64); correct];
        all.extend(vec![(false, 30i64); incorrect]);
        all
    }

    fn seed_level(store: &Store, order_index: i32, locked: bool, required: i32) -> Level {
        let id = store
            .create_level(
                Subject::Math,
                Difficulty::Easy,
                "addition",
                order_index,
                locked,
                required,
            )
            .unwrap();
        store.get_level(id).unwrap().unwrap()
    }

    #[test]
    fn test_stars_for_accuracy_thresholds() {
        assert_eq!(stars_for_accuracy(100.0), 3);
        assert_eq!(stars_for_accuracy(90.0), 3);
        assert_eq!(stars_for_accuracy(89.9), 2);
        assert_eq!(stars_for_accuracy(70.0), 2);
        assert_eq!(stars_for_accuracy(50.0), 1);
        assert_eq!(stars_for_accuracy(49.9), 0);
        assert_eq!(stars_for_accuracy(0.0), 0);
    }

    #[test]
    fn test_summary_from_outcomes() {
        let summary = SessionSummary::from_outcomes(&outcomes(9, 1));

        assert_eq!(summary.total_questions, 10);
        assert_eq!(summary.correct_answers, 9);
        assert_eq!(summary.time_spent_seconds, 9 * 20 + 30);
        assert!((summary.accuracy_percent - 90.0).abs() < 0.001);
        assert_eq!(summary.stars_earned, 3);
    }

    #[test]
    fn test_summary_from_no_outcomes() {
        let summary = SessionSummary::from_outcomes(&[]);
        assert_eq!(summary.total_questions, 0);
        assert_eq!(summary.accuracy_percent, 0.0);
        assert_eq!(summary.stars_earned, 0);
    }

    #[test]
    fn test_complete_session_records_everything() {
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        let level = seed_level(&store, 1, false, 0);
        let service = SessionService::new(&store);

        let summary = service
            .complete_session(child_id, &level, &outcomes(9, 1))
            .unwrap();
        assert_eq!(summary.stars_earned, 3);

        let activities = store.activities_for_child(child_id).unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].stars_earned, 3);
        assert_eq!(activities[0].correct_answers, 9);

        let child = store.get_child(child_id).unwrap().unwrap();
        assert_eq!(child.total_stars, 3);
        assert_eq!(child.current_level, 2);

        let progress = store
            .find_progress(child_id, Subject::Math, "addition")
            .unwrap()
            .unwrap();
        assert_eq!(progress.practice_count, 1);
        assert!((progress.mastery_level - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_complete_session_unlocks_covered_levels() {
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        let level = seed_level(&store, 1, false, 0);
        let within_reach = seed_level(&store, 2, true, 3);
        let out_of_reach = seed_level(&store, 3, true, 12);
        let service = SessionService::new(&store);

        service
            .complete_session(child_id, &level, &outcomes(10, 0))
            .unwrap();

        assert!(!store.get_level(within_reach.id).unwrap().unwrap().is_locked);
        assert!(store.get_level(out_of_reach.id).unwrap().unwrap().is_locked);
    }

    #[test]
    fn test_replaying_lower_level_keeps_current_level() {
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        let first = seed_level(&store, 1, false, 0);
        let third = seed_level(&store, 3, false, 0);
        let service = SessionService::new(&store);

        service
            .complete_session(child_id, &third, &outcomes(10, 0))
            .unwrap();
        service
            .complete_session(child_id, &first, &outcomes(10, 0))
            .unwrap();

        let child = store.get_child(child_id).unwrap().unwrap();
        assert_eq!(child.current_level, 4);
        assert_eq!(child.total_stars, 6);
    }

    #[test]
    fn test_repeat_session_bumps_practice_count() {
        let store = create_test_store();
        let child_id = store.create_child("Mia", 7, "fox").unwrap();
        let level = seed_level(&store, 1, false, 0);
        let service = SessionService::new(&store);

        service
            .complete_session(child_id, &level, &outcomes(5, 5))
            .unwrap();
        service
            .complete_session(child_id, &level, &outcomes(8, 2))
            .unwrap();

        let progress = store
            .find_progress(child_id, Subject::Math, "addition")
            .unwrap()
            .unwrap();
        assert_eq!(progress.practice_count, 2);
        assert!((progress.mastery_level - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_unknown_child_is_an_error() {
        let store = create_test_store();
        let level = seed_level(&store, 1, false, 0);
        let service = SessionService::new(&store);

        assert!(service.complete_session(99, &level, &outcomes(5, 5)).is_err());
    }
}
