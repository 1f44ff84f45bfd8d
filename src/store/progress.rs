use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

use crate::records::{Progress, Subject};
use crate::row_factories::ProgressRowFactory;

const PROGRESS_COLUMNS: &str =
    "id, child_id, subject, skill_area, mastery_level, practice_count, last_practiced_at";

pub struct ProgressRepository<'a> {
    conn: &'a Connection,
    get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
}

impl<'a> ProgressRepository<'a> {
    pub fn new(
        conn: &'a Connection,
        get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
    ) -> Self {
        ProgressRepository {
            conn,
            get_current_time,
        }
    }

    /// Fresh records start with `practice_count = 1`. The UNIQUE
    /// constraint on (child_id, subject, skill_area) rejects a second
    /// create for the same key.
    pub fn create(
        &self,
        child_id: i64,
        subject: Subject,
        skill_area: &str,
        mastery_level: f64,
    ) -> Result<i64> {
        let now = (self.get_current_time)().to_rfc3339();
        self.conn.execute(
            "INSERT INTO progress (child_id, subject, skill_area, mastery_level,
                                   practice_count, last_practiced_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            params![child_id, subject.as_str(), skill_area, mastery_level, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrites mastery and practice count, stamping the practice time.
    pub fn update(&self, progress_id: i64, mastery_level: f64, practice_count: i32) -> Result<()> {
        let now = (self.get_current_time)().to_rfc3339();
        self.conn.execute(
            "UPDATE progress SET
                mastery_level = ?1,
                practice_count = ?2,
                last_practiced_at = ?3
             WHERE id = ?4",
            params![mastery_level, practice_count, now, progress_id],
        )?;
        Ok(())
    }

    /// Lookup by the unique (child, subject, skill area) key.
    pub fn find(
        &self,
        child_id: i64,
        subject: Subject,
        skill_area: &str,
    ) -> Result<Option<Progress>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress
             WHERE child_id = ?1 AND subject = ?2 AND skill_area = ?3"
        ))?;

        let mut rows = stmt.query(params![child_id, subject.as_str(), skill_area])?;

        if let Some(row) = rows.next()? {
            Ok(Some(ProgressRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_all(&self) -> Result<Vec<Progress>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress ORDER BY id"
        ))?;

        let rows = stmt.query_map([], ProgressRowFactory::from_row)?;
        collect_progress(rows)
    }

    pub fn get_by_child(&self, child_id: i64) -> Result<Vec<Progress>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE child_id = ?1 ORDER BY id"
        ))?;

        let rows = stmt.query_map([child_id], ProgressRowFactory::from_row)?;
        collect_progress(rows)
    }

    pub fn get_by_child_and_subject(
        &self,
        child_id: i64,
        subject: Subject,
    ) -> Result<Vec<Progress>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress
             WHERE child_id = ?1 AND subject = ?2
             ORDER BY id"
        ))?;

        let rows = stmt.query_map(
            params![child_id, subject.as_str()],
            ProgressRowFactory::from_row,
        )?;
        collect_progress(rows)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM progress", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn collect_progress(
    rows: impl Iterator<Item = rusqlite::Result<Progress>>,
) -> Result<Vec<Progress>> {
    let mut records = Vec::new();
    for record in rows {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::connection::init_connection;

    fn create_test_db() -> Connection {
        init_connection(":memory:").expect("Failed to create test database")
    }

    fn create_repo(conn: &Connection) -> ProgressRepository {
        ProgressRepository::new(conn, Box::new(Utc::now))
    }

    #[test]
    fn test_create_starts_at_practice_count_one() {
        let conn = create_test_db();
        let repo = create_repo(&conn);

        repo.create(1, Subject::Math, "addition", 80.0).unwrap();

        let record = repo.find(1, Subject::Math, "addition").unwrap().unwrap();
        assert_eq!(record.practice_count, 1);
        assert_eq!(record.mastery_level, 80.0);
    }

    #[test]
    fn test_find_misses_other_keys() {
        let conn = create_test_db();
        let repo = create_repo(&conn);

        repo.create(1, Subject::Math, "addition", 80.0).unwrap();

        assert!(repo.find(1, Subject::Math, "subtraction").unwrap().is_none());
        assert!(repo.find(1, Subject::Reading, "addition").unwrap().is_none());
        assert!(repo.find(2, Subject::Math, "addition").unwrap().is_none());
    }

    #[test]
    fn test_update_overwrites_mastery() {
        let conn = create_test_db();
        let repo = create_repo(&conn);

        let id = repo.create(1, Subject::Math, "addition", 80.0).unwrap();
        repo.update(id, 55.0, 2).unwrap();

        let record = repo.find(1, Subject::Math, "addition").unwrap().unwrap();
        assert_eq!(record.mastery_level, 55.0);
        assert_eq!(record.practice_count, 2);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let conn = create_test_db();
        let repo = create_repo(&conn);

        repo.create(1, Subject::Math, "addition", 80.0).unwrap();
        let duplicate = repo.create(1, Subject::Math, "addition", 90.0);
        assert!(duplicate.is_err());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_get_by_child_and_subject() {
        let conn = create_test_db();
        let repo = create_repo(&conn);

        repo.create(1, Subject::Math, "addition", 80.0).unwrap();
        repo.create(1, Subject::Math, "subtraction", 60.0).unwrap();
        repo.create(1, Subject::Reading, "phonics", 70.0).unwrap();
        repo.create(2, Subject::Math, "addition", 40.0).unwrap();

        let math = repo.get_by_child_and_subject(1, Subject::Math).unwrap();
        assert_eq!(math.len(), 2);
        assert!(math.iter().all(|p| p.subject == Subject::Math && p.child_id == 1));

        let all_for_child = repo.get_by_child(1).unwrap();
        assert_eq!(all_for_child.len(), 3);
    }
}
