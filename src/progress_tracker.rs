use rusqlite::Result;

use crate::records::{Progress, Subject};
use crate::store::Store;

/// Applies the find-then-write mastery upsert. A hit overwrites the
/// mastery level and bumps the practice count; a miss creates the
/// record at `practice_count = 1`. The two steps are not atomic across
/// processes, but the store's UNIQUE key turns a doubled create into
/// an error instead of a duplicate row.
pub struct ProgressTracker<'a> {
    store: &'a Store,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn record_progress(
        &self,
        child_id: i64,
        subject: Subject,
        skill_area: &str,
        mastery_level: f64,
    ) -> Result<Progress> {
        match self.store.find_progress(child_id, subject, skill_area)? {
            Some(existing) => {
                self.store.update_progress(
                    existing.id,
                    mastery_level,
                    existing.practice_count + 1,
                )?;
            }
            None => {
                self.store
                    .create_progress(child_id, subject, skill_area, mastery_level)?;
            }
        }

        self.store
            .find_progress(child_id, subject, skill_area)?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> Store {
        Store::open(":memory:").expect("Failed to create test store")
    }

    #[test]
    fn test_first_record_creates_with_count_one() {
        let store = create_test_store();
        let tracker = ProgressTracker::new(&store);

        let record = tracker
            .record_progress(1, Subject::Math, "addition", 80.0)
            .unwrap();

        assert_eq!(record.practice_count, 1);
        assert_eq!(record.mastery_level, 80.0);
        assert_eq!(record.skill_area, "addition");
    }

    #[test]
    fn test_second_record_overwrites_and_increments() {
        let store = create_test_store();
        let tracker = ProgressTracker::new(&store);

        tracker
            .record_progress(1, Subject::Math, "addition", 80.0)
            .unwrap();
        let record = tracker
            .record_progress(1, Subject::Math, "addition", 55.0)
            .unwrap();

        // Overwrite, not an average
        assert_eq!(record.mastery_level, 55.0);
        assert_eq!(record.practice_count, 2);

        let rows = store.progress_for_child(1).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_distinct_keys_get_distinct_records() {
        let store = create_test_store();
        let tracker = ProgressTracker::new(&store);

        tracker
            .record_progress(1, Subject::Math, "addition", 80.0)
            .unwrap();
        tracker
            .record_progress(1, Subject::Math, "subtraction", 60.0)
            .unwrap();
        tracker
            .record_progress(1, Subject::Reading, "addition", 70.0)
            .unwrap();

        let rows = store.progress_for_child(1).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|p| p.practice_count == 1));
    }
}
