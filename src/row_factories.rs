use rusqlite::Row;

use crate::records::{Activity, Child, Difficulty, Level, Progress, Question, Subject};

/// Factory for creating Child objects from database rows
pub struct ChildRowFactory;

impl ChildRowFactory {
    /// Expected columns: id, name, age, avatar_id, current_level, total_stars
    pub fn from_row(row: &Row) -> rusqlite::Result<Child> {
        Ok(Child {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            avatar_id: row.get(3)?,
            current_level: row.get(4)?,
            total_stars: row.get(5)?,
        })
    }
}

/// Factory for creating Level objects from database rows
pub struct LevelRowFactory;

impl LevelRowFactory {
    /// Expected columns: id, subject, difficulty, kind, order_index,
    ///                   is_locked, required_stars
    pub fn from_row(row: &Row) -> rusqlite::Result<Level> {
        Ok(Level {
            id: row.get(0)?,
            subject: Subject::from_str(&row.get::<_, String>(1)?).unwrap_or(Subject::Math),
            difficulty: Difficulty::from_str(&row.get::<_, String>(2)?)
                .unwrap_or(Difficulty::Easy),
            kind: row.get(3)?,
            order_index: row.get(4)?,
            is_locked: row.get::<_, i32>(5)? != 0,
            required_stars: row.get(6)?,
        })
    }
}

/// Factory for creating Question objects from database rows.
/// Options live in their own table; the factory starts each question
/// with an empty set and the repository fills it in.
pub struct QuestionRowFactory;

impl QuestionRowFactory {
    /// Expected columns: id, level_id, subject, kind, prompt,
    ///                   correct_answer, description, image
    pub fn from_row(row: &Row) -> rusqlite::Result<Question> {
        Ok(Question {
            id: row.get(0)?,
            level_id: row.get(1)?,
            subject: Subject::from_str(&row.get::<_, String>(2)?).unwrap_or(Subject::Math),
            kind: row.get(3)?,
            prompt: row.get(4)?,
            correct_answer: row.get(5)?,
            description: row.get(6)?,
            image: row.get(7)?,
            options: Vec::new(),
        })
    }
}

/// Factory for creating Activity objects from database rows
pub struct ActivityRowFactory;

impl ActivityRowFactory {
    /// Expected columns: id, child_id, level_id, completed_at,
    ///                   stars_earned, correct_answers, total_questions,
    ///                   time_spent_seconds
    pub fn from_row(row: &Row) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: row.get(0)?,
            child_id: row.get(1)?,
            level_id: row.get(2)?,
            completed_at: row.get(3)?,
            stars_earned: row.get(4)?,
            correct_answers: row.get(5)?,
            total_questions: row.get(6)?,
            time_spent_seconds: row.get(7)?,
        })
    }
}

/// Factory for creating Progress objects from database rows
pub struct ProgressRowFactory;

impl ProgressRowFactory {
    /// Expected columns: id, child_id, subject, skill_area,
    ///                   mastery_level, practice_count, last_practiced_at
    pub fn from_row(row: &Row) -> rusqlite::Result<Progress> {
        Ok(Progress {
            id: row.get(0)?,
            child_id: row.get(1)?,
            subject: Subject::from_str(&row.get::<_, String>(2)?).unwrap_or(Subject::Math),
            skill_area: row.get(3)?,
            mastery_level: row.get(4)?,
            practice_count: row.get(5)?,
            last_practiced_at: row.get(6)?,
        })
    }
}
