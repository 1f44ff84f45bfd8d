use rusqlite::{Connection, Result, params};

use crate::records::{Difficulty, Level, Subject};
use crate::row_factories::LevelRowFactory;

const LEVEL_COLUMNS: &str = "id, subject, difficulty, kind, order_index, is_locked, required_stars";

pub struct LevelsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LevelsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        LevelsRepository { conn }
    }

    pub fn create(
        &self,
        subject: Subject,
        difficulty: Difficulty,
        kind: &str,
        order_index: i32,
        is_locked: bool,
        required_stars: i32,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO levels (subject, difficulty, kind, order_index, is_locked, required_stars)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                subject.as_str(),
                difficulty.as_str(),
                kind,
                order_index,
                is_locked as i32,
                required_stars
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, level_id: i64) -> Result<Option<Level>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {LEVEL_COLUMNS} FROM levels WHERE id = ?1"))?;

        let mut rows = stmt.query([level_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(LevelRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// All levels in canonical sequence (order_index ascending).
    pub fn get_all(&self) -> Result<Vec<Level>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LEVEL_COLUMNS} FROM levels ORDER BY order_index ASC"
        ))?;

        let rows = stmt.query_map([], LevelRowFactory::from_row)?;

        let mut levels = Vec::new();
        for level in rows {
            levels.push(level?);
        }
        Ok(levels)
    }

    pub fn get_by_subject(&self, subject: Subject) -> Result<Vec<Level>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LEVEL_COLUMNS} FROM levels WHERE subject = ?1 ORDER BY order_index ASC"
        ))?;

        let rows = stmt.query_map([subject.as_str()], LevelRowFactory::from_row)?;

        let mut levels = Vec::new();
        for level in rows {
            levels.push(level?);
        }
        Ok(levels)
    }

    pub fn set_locked(&self, level_id: i64, is_locked: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE levels SET is_locked = ?1 WHERE id = ?2",
            params![is_locked as i32, level_id],
        )?;
        Ok(())
    }

    pub fn delete(&self, level_id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM levels WHERE id = ?1", [level_id])?;
        Ok(deleted > 0)
    }
}
