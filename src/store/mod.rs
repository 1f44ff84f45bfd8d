pub mod activities;
pub mod children;
pub mod connection;
pub mod levels;
pub mod progress;
pub mod questions;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result};

use crate::clock::{Clock, SystemClock};
use crate::records::{
    Activity, Child, Difficulty, Level, NewActivity, NewQuestion, Progress, Question, Subject,
};

pub use activities::ActivitiesRepository;
pub use children::ChildrenRepository;
pub use levels::LevelsRepository;
pub use progress::ProgressRepository;
pub use questions::QuestionsRepository;

/// Main Store struct providing access to all record collections
pub struct Store {
    pub conn: Connection,
    clock: Arc<dyn Clock>,
}

impl Store {
    pub fn open(db_path: &str) -> Result<Self> {
        Self::init(db_path, Arc::new(SystemClock))
    }

    pub fn with_clock(db_path: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::init(db_path, clock)
    }

    fn init(db_path: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Store { conn, clock })
    }

    /// Helper method to get the current time (delegates to the clock)
    fn get_current_time(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ===== Children Repository Access =====

    pub fn create_child(&self, name: &str, age: i32, avatar_id: &str) -> Result<i64> {
        let repo = ChildrenRepository::new(&self.conn);
        repo.create(name, age, avatar_id)
    }

    pub fn get_child(&self, child_id: i64) -> Result<Option<Child>> {
        let repo = ChildrenRepository::new(&self.conn);
        repo.get(child_id)
    }

    pub fn get_children(&self) -> Result<Vec<Child>> {
        let repo = ChildrenRepository::new(&self.conn);
        repo.get_all()
    }

    pub fn update_child(&self, child: &Child) -> Result<()> {
        let repo = ChildrenRepository::new(&self.conn);
        repo.update(child)
    }

    pub fn delete_child(&self, child_id: i64) -> Result<bool> {
        let repo = ChildrenRepository::new(&self.conn);
        repo.delete(child_id)
    }

    pub fn count_children(&self) -> Result<i64> {
        let repo = ChildrenRepository::new(&self.conn);
        repo.count()
    }

    // ===== Levels Repository Access =====

    pub fn create_level(
        &self,
        subject: Subject,
        difficulty: Difficulty,
        kind: &str,
        order_index: i32,
        is_locked: bool,
        required_stars: i32,
    ) -> Result<i64> {
        let repo = LevelsRepository::new(&self.conn);
        repo.create(subject, difficulty, kind, order_index, is_locked, required_stars)
    }

    pub fn get_level(&self, level_id: i64) -> Result<Option<Level>> {
        let repo = LevelsRepository::new(&self.conn);
        repo.get(level_id)
    }

    pub fn get_levels(&self) -> Result<Vec<Level>> {
        let repo = LevelsRepository::new(&self.conn);
        repo.get_all()
    }

    pub fn levels_for_subject(&self, subject: Subject) -> Result<Vec<Level>> {
        let repo = LevelsRepository::new(&self.conn);
        repo.get_by_subject(subject)
    }

    pub fn set_level_locked(&self, level_id: i64, is_locked: bool) -> Result<()> {
        let repo = LevelsRepository::new(&self.conn);
        repo.set_locked(level_id, is_locked)
    }

    pub fn delete_level(&self, level_id: i64) -> Result<bool> {
        let repo = LevelsRepository::new(&self.conn);
        repo.delete(level_id)
    }

    // ===== Questions Repository Access =====

    pub fn create_question(&self, question: &NewQuestion) -> Result<i64> {
        let repo = QuestionsRepository::new(&self.conn);
        repo.create(question)
    }

    pub fn get_question(&self, question_id: i64) -> Result<Option<Question>> {
        let repo = QuestionsRepository::new(&self.conn);
        repo.get(question_id)
    }

    pub fn questions_for_level(&self, level_id: i64) -> Result<Vec<Question>> {
        let repo = QuestionsRepository::new(&self.conn);
        repo.get_by_level(level_id)
    }

    pub fn questions_for_subject(&self, subject: Subject) -> Result<Vec<Question>> {
        let repo = QuestionsRepository::new(&self.conn);
        repo.get_by_subject(subject)
    }

    pub fn delete_question(&self, question_id: i64) -> Result<bool> {
        let repo = QuestionsRepository::new(&self.conn);
        repo.delete(question_id)
    }

    pub fn count_questions(&self) -> Result<i64> {
        let repo = QuestionsRepository::new(&self.conn);
        repo.count()
    }

    // ===== Activities Repository Access =====

    pub fn create_activity(&self, activity: &NewActivity) -> Result<i64> {
        let current_time = self.get_current_time();
        let repo = ActivitiesRepository::new(&self.conn, Box::new(move || current_time));
        repo.create(activity)
    }

    pub fn get_activity(&self, activity_id: i64) -> Result<Option<Activity>> {
        let repo = ActivitiesRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.get(activity_id)
    }

    pub fn get_activities(&self) -> Result<Vec<Activity>> {
        let repo = ActivitiesRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.get_all()
    }

    pub fn activities_for_child(&self, child_id: i64) -> Result<Vec<Activity>> {
        let repo = ActivitiesRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.get_by_child(child_id)
    }

    pub fn activities_for_level(&self, level_id: i64) -> Result<Vec<Activity>> {
        let repo = ActivitiesRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.get_by_level(level_id)
    }

    pub fn update_activity(&self, activity: &Activity) -> Result<()> {
        let repo = ActivitiesRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.update(activity)
    }

    pub fn delete_activity(&self, activity_id: i64) -> Result<bool> {
        let repo = ActivitiesRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.delete(activity_id)
    }

    pub fn count_activities(&self) -> Result<i64> {
        let repo = ActivitiesRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.count()
    }

    // ===== Progress Repository Access =====

    pub fn create_progress(
        &self,
        child_id: i64,
        subject: Subject,
        skill_area: &str,
        mastery_level: f64,
    ) -> Result<i64> {
        let current_time = self.get_current_time();
        let repo = ProgressRepository::new(&self.conn, Box::new(move || current_time));
        repo.create(child_id, subject, skill_area, mastery_level)
    }

    pub fn update_progress(
        &self,
        progress_id: i64,
        mastery_level: f64,
        practice_count: i32,
    ) -> Result<()> {
        let current_time = self.get_current_time();
        let repo = ProgressRepository::new(&self.conn, Box::new(move || current_time));
        repo.update(progress_id, mastery_level, practice_count)
    }

    pub fn find_progress(
        &self,
        child_id: i64,
        subject: Subject,
        skill_area: &str,
    ) -> Result<Option<Progress>> {
        let repo = ProgressRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.find(child_id, subject, skill_area)
    }

    pub fn get_progress(&self) -> Result<Vec<Progress>> {
        let repo = ProgressRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.get_all()
    }

    pub fn progress_for_child(&self, child_id: i64) -> Result<Vec<Progress>> {
        let repo = ProgressRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.get_by_child(child_id)
    }

    pub fn progress_for_child_and_subject(
        &self,
        child_id: i64,
        subject: Subject,
    ) -> Result<Vec<Progress>> {
        let repo = ProgressRepository::new(&self.conn, Box::new(|| self.get_current_time()));
        repo.get_by_child_and_subject(child_id, subject)
    }
}
