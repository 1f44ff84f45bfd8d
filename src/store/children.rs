use rusqlite::{Connection, Result, params};

use crate::records::Child;
use crate::row_factories::ChildRowFactory;

const CHILD_COLUMNS: &str = "id, name, age, avatar_id, current_level, total_stars";

pub struct ChildrenRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ChildrenRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        ChildrenRepository { conn }
    }

    /// New profiles start at level 1 with no stars.
    pub fn create(&self, name: &str, age: i32, avatar_id: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO children (name, age, avatar_id, current_level, total_stars)
             VALUES (?1, ?2, ?3, 1, 0)",
            params![name, age, avatar_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, child_id: i64) -> Result<Option<Child>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CHILD_COLUMNS} FROM children WHERE id = ?1"
        ))?;

        let mut rows = stmt.query([child_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(ChildRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_all(&self) -> Result<Vec<Child>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {CHILD_COLUMNS} FROM children ORDER BY id"))?;

        let rows = stmt.query_map([], ChildRowFactory::from_row)?;

        let mut children = Vec::new();
        for child in rows {
            children.push(child?);
        }
        Ok(children)
    }

    pub fn update(&self, child: &Child) -> Result<()> {
        self.conn.execute(
            "UPDATE children SET
                name = ?1,
                age = ?2,
                avatar_id = ?3,
                current_level = ?4,
                total_stars = ?5
             WHERE id = ?6",
            params![
                child.name,
                child.age,
                child.avatar_id,
                child.current_level,
                child.total_stars,
                child.id
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, child_id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM children WHERE id = ?1", [child_id])?;
        Ok(deleted > 0)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM children", [], |row| row.get(0))?;
        Ok(count)
    }
}
