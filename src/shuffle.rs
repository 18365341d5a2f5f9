//! Pseudo-random reordering used when a play-through starts.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{Question, QuizConfig};

/// Randomly reorders `items` in place.
///
/// This is a uniform shuffle; no caller depends on a particular distribution
/// or on the resulting order.
pub fn randomize_order<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns the question list for a new play-through, reordered as `config` asks.
///
/// Option shuffling is per question. The correct answer is matched by text,
/// so it survives any reordering.
pub fn prepare_questions<R: Rng + ?Sized>(
    questions: &[Question],
    config: &QuizConfig,
    rng: &mut R,
) -> Vec<Question> {
    let mut prepared = questions.to_vec();

    if config.shuffle_questions {
        randomize_order(&mut prepared, rng);
    }

    if config.shuffle_options {
        for question in &mut prepared {
            randomize_order(&mut question.options, rng);
        }
    }

    prepared
}
