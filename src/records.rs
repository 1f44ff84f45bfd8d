use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Math,
    Reading,
}

impl Subject {
    pub fn as_str(&self) -> &str {
        match self {
            Subject::Math => "math",
            Subject::Reading => "reading",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "math" => Some(Subject::Math),
            "reading" => Some(Subject::Reading),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// A child profile. `current_level` and `total_stars` are mutated as
/// sessions complete; the profile itself is managed from the parent CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub avatar_id: String,
    pub current_level: i32,
    pub total_stars: i32,
}

/// One practice level. `order_index` ascending is the canonical level
/// sequence; a locked level opens once the child has `required_stars`.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: i64,
    pub subject: Subject,
    pub difficulty: Difficulty,
    pub kind: String,
    pub order_index: i32,
    pub is_locked: bool,
    pub required_stars: i32,
}

/// A multiple-choice question. `options` is ordered and contains the
/// correct answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub level_id: i64,
    pub subject: Subject,
    pub kind: String,
    pub prompt: String,
    pub correct_answer: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub options: Vec<String>,
}

/// Fields for creating a question together with its option set.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub level_id: i64,
    pub subject: Subject,
    pub kind: String,
    pub prompt: String,
    pub correct_answer: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub options: Vec<String>,
}

/// One completed question-session attempt.
/// Invariant: `0 <= correct_answers <= total_questions`; an activity
/// with `total_questions == 0` carries no accuracy.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub child_id: i64,
    pub level_id: i64,
    pub completed_at: DateTime<Utc>,
    pub stars_earned: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub time_spent_seconds: i64,
}

/// Fields for creating an activity. `completed_at` defaults to the
/// store clock when `None`.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub child_id: i64,
    pub level_id: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub stars_earned: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub time_spent_seconds: i64,
}

/// A child's mastery of one skill area within one subject.
/// At most one record per `(child_id, subject, skill_area)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub id: i64,
    pub child_id: i64,
    pub subject: Subject,
    pub skill_area: String,
    pub mastery_level: f64,
    pub practice_count: i32,
    pub last_practiced_at: DateTime<Utc>,
}
