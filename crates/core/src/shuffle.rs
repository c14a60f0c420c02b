use rand::rng;
use rand::seq::SliceRandom;

use crate::model::{Choice, Question};

/// Returns a copy of `items` in a uniformly random order.
///
/// Fisher–Yates on the copy via `rand`; the input is left untouched and every
/// call draws fresh randomness. Empty and singleton inputs come back unchanged.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    let mut rng = rng();
    out.as_mut_slice().shuffle(&mut rng);
    out
}

/// A question with its choices in per-session random order.
///
/// Built once per question at quiz start and immutable afterwards.
/// `original_to_shuffled[i]` is the shuffled position of original choice `i`,
/// so `shuffled_choices[original_to_shuffled[i]] == question.choices()[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledQuestion {
    question: Question,
    shuffled_choices: Vec<Choice>,
    original_to_shuffled: Vec<usize>,
}

impl ShuffledQuestion {
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn shuffled_choices(&self) -> &[Choice] {
        &self.shuffled_choices
    }

    #[must_use]
    pub fn original_to_shuffled(&self) -> &[usize] {
        &self.original_to_shuffled
    }

    /// Choice at the given shuffled position, if in range.
    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.shuffled_choices.get(index)
    }
}

/// Randomizes the order of a question's choices, recording where each original
/// index landed.
///
/// Pure: the input question is not modified.
#[must_use]
pub fn shuffle_choices(question: &Question) -> ShuffledQuestion {
    let count = question.choices().len();
    let order: Vec<usize> = shuffle(&(0..count).collect::<Vec<_>>());

    let shuffled_choices: Vec<Choice> = order
        .iter()
        .map(|&original| question.choices()[original].clone())
        .collect();

    let mut original_to_shuffled = vec![0; count];
    for (position, &original) in order.iter().enumerate() {
        original_to_shuffled[original] = position;
    }

    ShuffledQuestion {
        question: question.clone(),
        shuffled_choices,
        original_to_shuffled,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
