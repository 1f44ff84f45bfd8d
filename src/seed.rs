use chrono::Duration;
use rusqlite::Result;

use crate::clock::Clock;
use crate::records::{Difficulty, NewActivity, NewQuestion, Subject};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub children: usize,
    pub levels: usize,
    pub questions: usize,
    pub activities: usize,
}

/// Loads a small demo family: two children, six levels across both
/// subjects, a question pool per unlocked level, and a week of
/// backdated activity so the dashboard has something to chart.
pub fn load_demo_data(store: &Store, clock: &dyn Clock) -> Result<SeedCounts> {
    let mia = store.create_child("Mia", 7, "fox")?;
    let leo = store.create_child("Leo", 5, "owl")?;

    let addition = store.create_level(Subject::Math, Difficulty::Easy, "addition", 1, false, 0)?;
    let subtraction =
        store.create_level(Subject::Math, Difficulty::Medium, "subtraction", 2, true, 3)?;
    store.create_level(Subject::Math, Difficulty::Hard, "multiplication", 3, true, 9)?;
    let phonics = store.create_level(Subject::Reading, Difficulty::Easy, "phonics", 1, false, 0)?;
    store.create_level(Subject::Reading, Difficulty::Medium, "sight-words", 2, true, 3)?;
    store.create_level(Subject::Reading, Difficulty::Hard, "rhyming", 3, true, 9)?;

    let mut questions = 0usize;
    questions += seed_addition_questions(store, addition)?;
    questions += seed_subtraction_questions(store, subtraction)?;
    questions += seed_phonics_questions(store, phonics)?;

    // A believable week of practice: Mia on math most days, Leo dipping
    // into reading a couple of times.
    let now = clock.now();
    let history = [
        (mia, addition, 6, 2, 7, 10, 420),
        (mia, addition, 5, 3, 9, 10, 380),
        (mia, addition, 3, 1, 5, 10, 600),
        (mia, phonics, 2, 2, 8, 10, 450),
        (mia, addition, 0, 3, 10, 10, 300),
        (leo, phonics, 4, 2, 7, 10, 510),
        (leo, phonics, 1, 1, 6, 10, 540),
    ];
    for &(child_id, level_id, days_back, stars, correct, total, seconds) in &history {
        store.create_activity(&NewActivity {
            child_id,
            level_id,
            completed_at: Some(now - Duration::days(days_back)),
            stars_earned: stars,
            correct_answers: correct,
            total_questions: total,
            time_spent_seconds: seconds,
        })?;
    }

    store.create_progress(mia, Subject::Math, "addition", 84.0)?;
    store.create_progress(mia, Subject::Reading, "phonics", 80.0)?;
    store.create_progress(leo, Subject::Reading, "phonics", 65.0)?;

    let mut mia_child = store
        .get_child(mia)?
        .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
    mia_child.total_stars = 11;
    mia_child.current_level = 2;
    store.update_child(&mia_child)?;

    let mut leo_child = store
        .get_child(leo)?
        .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
    leo_child.total_stars = 3;
    leo_child.current_level = 2;
    store.update_child(&leo_child)?;

    Ok(SeedCounts {
        children: 2,
        levels: 6,
        questions,
        activities: history.len(),
    })
}

fn seed_addition_questions(store: &Store, level_id: i64) -> Result<usize> {
    let pairs = [
        (2, 3),
        (4, 5),
        (1, 7),
        (6, 2),
        (3, 3),
        (5, 5),
        (8, 1),
        (4, 4),
        (7, 2),
        (6, 3),
        (2, 9),
        (5, 3),
    ];
    for (a, b) in pairs {
        let answer = a + b;
        store.create_question(&NewQuestion {
            level_id,
            subject: Subject::Math,
            kind: "addition".to_string(),
            prompt: format!("{a} + {b} = ?"),
            correct_answer: answer.to_string(),
            description: None,
            image: None,
            options: vec![
                answer.to_string(),
                (answer + 1).to_string(),
                (answer - 1).to_string(),
                (answer + 2).to_string(),
            ],
        })?;
    }
    Ok(pairs.len())
}

fn seed_subtraction_questions(store: &Store, level_id: i64) -> Result<usize> {
    let pairs = [(9, 4), (8, 3), (7, 2), (10, 6), (6, 1), (9, 7), (5, 2), (8, 5), (7, 4), (10, 3)];
    for (a, b) in pairs {
        let answer = a - b;
        store.create_question(&NewQuestion {
            level_id,
            subject: Subject::Math,
            kind: "subtraction".to_string(),
            prompt: format!("{a} - {b} = ?"),
            correct_answer: answer.to_string(),
            description: None,
            image: None,
            options: vec![
                answer.to_string(),
                (answer + 1).to_string(),
                (answer + 2).to_string(),
                (answer.max(1) - 1).to_string(),
            ],
        })?;
    }
    Ok(pairs.len())
}

fn seed_phonics_questions(store: &Store, level_id: i64) -> Result<usize> {
    let items = [
        ("Which word starts with B?", "Ball", ["Ball", "Cat", "Dog", "Sun"]),
        ("Which word starts with S?", "Sun", ["Map", "Sun", "Hat", "Pig"]),
        ("Which word starts with C?", "Cat", ["Bed", "Fox", "Cat", "Ant"]),
        ("Which word starts with D?", "Dog", ["Egg", "Owl", "Bee", "Dog"]),
        ("Which word starts with M?", "Moon", ["Moon", "Star", "Tree", "Fish"]),
        ("Which word starts with T?", "Tree", ["Book", "Tree", "Lamp", "Door"]),
        ("Which word starts with F?", "Fish", ["Goat", "Hen", "Fish", "Cow"]),
        ("Which word starts with H?", "Hat", ["Cup", "Pen", "Bag", "Hat"]),
        ("Which word starts with P?", "Pig", ["Pig", "Duck", "Frog", "Bear"]),
        ("Which word starts with L?", "Lamp", ["Nest", "Lamp", "Ring", "Sock"]),
    ];
    for (prompt, answer, options) in items {
        store.create_question(&NewQuestion {
            level_id,
            subject: Subject::Reading,
            kind: "phonics".to_string(),
            prompt: prompt.to_string(),
            correct_answer: answer.to_string(),
            description: Some("Sound it out".to_string()),
            image: None,
            options: options.iter().map(|o| o.to_string()).collect(),
        })?;
    }
    Ok(items.len())
}
