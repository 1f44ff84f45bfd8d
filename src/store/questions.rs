use rusqlite::{Connection, Result, params};

use crate::records::{NewQuestion, Question, Subject};
use crate::row_factories::QuestionRowFactory;

const QUESTION_COLUMNS: &str =
    "id, level_id, subject, kind, prompt, correct_answer, description, image";

pub struct QuestionsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> QuestionsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        QuestionsRepository { conn }
    }

    /// Inserts the question row and its ordered option set.
    pub fn create(&self, question: &NewQuestion) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO questions (level_id, subject, kind, prompt, correct_answer, description, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                question.level_id,
                question.subject.as_str(),
                question.kind,
                question.prompt,
                question.correct_answer,
                question.description,
                question.image
            ],
        )?;
        let question_id = self.conn.last_insert_rowid();

        for (position, value) in question.options.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO question_options (question_id, position, value)
                 VALUES (?1, ?2, ?3)",
                params![question_id, position as i64, value],
            )?;
        }

        Ok(question_id)
    }

    pub fn get(&self, question_id: i64) -> Result<Option<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"
        ))?;

        let mut rows = stmt.query([question_id])?;

        if let Some(row) = rows.next()? {
            let mut question = QuestionRowFactory::from_row(row)?;
            question.options = self.options_for(question.id)?;
            Ok(Some(question))
        } else {
            Ok(None)
        }
    }

    pub fn get_by_level(&self, level_id: i64) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE level_id = ?1 ORDER BY id"
        ))?;

        let rows = stmt.query_map([level_id], QuestionRowFactory::from_row)?;
        self.with_options(rows)
    }

    pub fn get_by_subject(&self, subject: Subject) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE subject = ?1 ORDER BY id"
        ))?;

        let rows = stmt.query_map([subject.as_str()], QuestionRowFactory::from_row)?;
        self.with_options(rows)
    }

    pub fn delete(&self, question_id: i64) -> Result<bool> {
        self.conn.execute(
            "DELETE FROM question_options WHERE question_id = ?1",
            [question_id],
        )?;
        let deleted = self
            .conn
            .execute("DELETE FROM questions WHERE id = ?1", [question_id])?;
        Ok(deleted > 0)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count)
    }

    fn options_for(&self, question_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT value FROM question_options WHERE question_id = ?1 ORDER BY position",
        )?;

        let rows = stmt.query_map([question_id], |row| row.get(0))?;

        let mut options = Vec::new();
        for value in rows {
            options.push(value?);
        }
        Ok(options)
    }

    fn with_options(
        &self,
        rows: impl Iterator<Item = rusqlite::Result<Question>>,
    ) -> Result<Vec<Question>> {
        let mut questions = Vec::new();
        for question in rows {
            let mut question = question?;
            question.options = self.options_for(question.id)?;
            questions.push(question);
        }
        Ok(questions)
    }
}
