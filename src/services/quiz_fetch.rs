// src/services/quiz_fetch.rs

use thiserror::Error;

use crate::{
    models::question::{ParseOptionError, Question},
    services::store::{QuizStore, StoreError},
};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No quizzes found in the database")]
    EmptyResult,

    #[error("Failed to load quizzes: {0}")]
    Transport(#[from] StoreError),

    #[error("Quiz {id} is malformed: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: ParseOptionError,
    },
}

/// Fetches one batch of questions for a session. Single attempt, backend order kept.
pub async fn fetch_questions(store: &dyn QuizStore, limit: usize) -> Result<Vec<Question>, FetchError> {
    let mut records = store.fetch_quizzes(limit).await?;
    if records.is_empty() {
        return Err(FetchError::EmptyResult);
    }
    records.truncate(limit);

    records
        .into_iter()
        .map(|record| {
            let id = record.id.clone();
            Question::try_from(record).map_err(|source| FetchError::InvalidRecord { id, source })
        })
        .collect()
}
