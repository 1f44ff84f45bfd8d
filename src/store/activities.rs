use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

use crate::records::{Activity, NewActivity};
use crate::row_factories::ActivityRowFactory;

const ACTIVITY_COLUMNS: &str = "id, child_id, level_id, completed_at, stars_earned, \
                                correct_answers, total_questions, time_spent_seconds";

pub struct ActivitiesRepository<'a> {
    conn: &'a Connection,
    get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
}

impl<'a> ActivitiesRepository<'a> {
    pub fn new(
        conn: &'a Connection,
        get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
    ) -> Self {
        ActivitiesRepository {
            conn,
            get_current_time,
        }
    }

    /// `completed_at` falls back to the repository clock when not given.
    pub fn create(&self, activity: &NewActivity) -> Result<i64> {
        let completed_at = activity
            .completed_at
            .unwrap_or_else(|| (self.get_current_time)())
            .to_rfc3339();
        self.conn.execute(
            "INSERT INTO activities (child_id, level_id, completed_at, stars_earned,
                                     correct_answers, total_questions, time_spent_seconds)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                activity.child_id,
                activity.level_id,
                completed_at,
                activity.stars_earned,
                activity.correct_answers,
                activity.total_questions,
                activity.time_spent_seconds
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, activity_id: i64) -> Result<Option<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?1"
        ))?;

        let mut rows = stmt.query([activity_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(ActivityRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_all(&self) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY id"
        ))?;

        let rows = stmt.query_map([], ActivityRowFactory::from_row)?;
        collect_activities(rows)
    }

    /// Most recent first, matching the dashboard's feed ordering.
    pub fn get_by_child(&self, child_id: i64) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities
             WHERE child_id = ?1
             ORDER BY completed_at DESC"
        ))?;

        let rows = stmt.query_map([child_id], ActivityRowFactory::from_row)?;
        collect_activities(rows)
    }

    pub fn get_by_level(&self, level_id: i64) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE level_id = ?1 ORDER BY id"
        ))?;

        let rows = stmt.query_map([level_id], ActivityRowFactory::from_row)?;
        collect_activities(rows)
    }

    pub fn update(&self, activity: &Activity) -> Result<()> {
        self.conn.execute(
            "UPDATE activities SET
                child_id = ?1,
                level_id = ?2,
                completed_at = ?3,
                stars_earned = ?4,
                correct_answers = ?5,
                total_questions = ?6,
                time_spent_seconds = ?7
             WHERE id = ?8",
            params![
                activity.child_id,
                activity.level_id,
                activity.completed_at.to_rfc3339(),
                activity.stars_earned,
                activity.correct_answers,
                activity.total_questions,
                activity.time_spent_seconds,
                activity.id
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, activity_id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1", [activity_id])?;
        Ok(deleted > 0)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn collect_activities(
    rows: impl Iterator<Item = rusqlite::Result<Activity>>,
) -> Result<Vec<Activity>> {
    let mut activities = Vec::new();
    for activity in rows {
        activities.push(activity?);
    }
    Ok(activities)
}
