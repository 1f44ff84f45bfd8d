use rand::Rng;
use rand::seq::SliceRandom;

use crate::records::Question;

/// Questions drawn per practice session.
pub const SESSION_QUESTION_LIMIT: usize = 10;

/// Draws a uniformly random subset of `min(limit, len)` questions.
/// The shuffle is a full Fisher-Yates permutation, so no position in
/// the input is favored. The input is not mutated.
pub fn sample_questions(questions: &[Question], limit: usize) -> Vec<Question> {
    sample_questions_with_rng(questions, limit, &mut rand::thread_rng())
}

pub fn sample_questions_with_rng<R: Rng + ?Sized>(
    questions: &[Question],
    limit: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut drawn = questions.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(limit);
    drawn
}
