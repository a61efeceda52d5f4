// src/services/scoring.rs

use std::collections::HashMap;

use crate::models::question::{OptionLabel, Question};

/// Participant answers keyed by question id.
pub type AnswerMap = HashMap<String, OptionLabel>;

/// Counts the questions whose recorded answer equals the correct option.
///
/// Unanswered questions and answers for unknown ids never count.
pub fn score(questions: &[Question], answers: &AnswerMap) -> u32 {
    questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_option))
        .count() as u32
}
