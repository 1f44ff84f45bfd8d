use std::io::{self, BufRead, Write as IoWrite};
use std::time::Instant;

use colored::Colorize;
use log::info;

use crate::records::Question;
use crate::sampler::sample_questions;
use crate::session_service::{SessionService, SessionSummary};
use crate::store::Store;

#[derive(Debug, PartialEq)]
pub enum SessionState {
    AskingQuestions,
    ShowingResults,
}

/// State machine for one practice session, decoupled from terminal I/O
/// so the flow is testable.
pub struct PracticeSession {
    questions: Vec<Question>,
    current_index: usize,
    outcomes: Vec<(bool, i64)>,
    state: SessionState,
}

impl PracticeSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let state = if questions.is_empty() {
            SessionState::ShowingResults
        } else {
            SessionState::AskingQuestions
        };
        Self {
            questions,
            current_index: 0,
            outcomes: Vec::new(),
            state,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Accepts either the option number (1-based) or the answer text.
    /// Empty input is rejected and the question is not advanced.
    /// Returns whether the submitted answer was correct.
    pub fn submit_answer(&mut self, raw: &str, time_spent_seconds: i64) -> Option<bool> {
        let answer = raw.trim();
        if answer.is_empty() || self.state != SessionState::AskingQuestions {
            return None;
        }

        let question = &self.questions[self.current_index];
        let chosen = match answer.parse::<usize>() {
            Ok(n) if n >= 1 && n <= question.options.len() => question.options[n - 1].as_str(),
            _ => answer,
        };
        let is_correct = chosen.eq_ignore_ascii_case(question.correct_answer.trim());

        self.outcomes.push((is_correct, time_spent_seconds));
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.state = SessionState::ShowingResults;
        }

        Some(is_correct)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn outcomes(&self) -> &[(bool, i64)] {
        &self.outcomes
    }

    pub fn question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

/// Runs an interactive practice session on stdin/stdout and records it
/// through the session service.
pub fn run(
    store: &Store,
    child_id: i64,
    level_id: i64,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let child = store
        .get_child(child_id)?
        .ok_or_else(|| format!("No child with id {child_id}"))?;
    let level = store
        .get_level(level_id)?
        .ok_or_else(|| format!("No level with id {level_id}"))?;

    if level.is_locked {
        println!(
            "{}",
            format!(
                "Level {} is still locked. Earn {} star(s) to open it!",
                level.order_index, level.required_stars
            )
            .yellow()
        );
        return Ok(());
    }

    let pool = store.questions_for_level(level_id)?;
    let questions = sample_questions(&pool, limit);
    if questions.is_empty() {
        println!("No questions available for this level yet.");
        return Ok(());
    }

    info!(
        "Starting session: child {} on level {} with {} question(s)",
        child_id,
        level_id,
        questions.len()
    );
    println!(
        "{}",
        format!("Let's practice, {}! {} questions.", child.name, questions.len()).bold()
    );
    println!();

    let mut session = PracticeSession::new(questions);
    let stdin = io::stdin();

    while *session.state() == SessionState::AskingQuestions {
        let Some(question) = session.current_question() else {
            break;
        };

        println!(
            "{} {}",
            format!("Question {}/{}:", session.question_number(), session.total_questions())
                .bold(),
            question.prompt
        );
        if let Some(description) = &question.description {
            println!("  {}", description);
        }
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }
        let correct_answer = question.correct_answer.clone();
        print!("> ");
        io::stdout().flush()?;

        let started = Instant::now();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            println!("Session stopped early, nothing recorded.");
            return Ok(());
        }
        let elapsed = started.elapsed().as_secs() as i64;

        match session.submit_answer(&line, elapsed) {
            Some(true) => println!("{}", "Correct!".green().bold()),
            Some(false) => println!(
                "{} The correct answer was {}.",
                "Not quite right.".red(),
                correct_answer
            ),
            None => {
                println!("Please pick an option number or type the answer.");
                continue;
            }
        }
        println!();
    }

    let service = SessionService::new(store);
    let summary = service.complete_session(child_id, &level, session.outcomes())?;
    print_summary(&child.name, &summary);

    Ok(())
}

fn print_summary(name: &str, summary: &SessionSummary) {
    let stars = "*".repeat(summary.stars_earned as usize);
    println!("{}", format!("All done, {name}!").bold());
    println!(
        "  {}/{} correct ({:.0}%)",
        summary.correct_answers, summary.total_questions, summary.accuracy_percent
    );
    if summary.stars_earned > 0 {
        println!("  Stars earned: {}", stars.yellow().bold());
    } else {
        println!("  No stars this time. Keep practicing!");
    }
}
