// src/services/store/mod.rs

//! Access to the backend data store holding the `quizzes` and `participants` tables.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{participant::ParticipantSubmission, question::QuizRecord};

pub mod postgres;
pub mod rest;

pub use postgres::PgQuizStore;
pub use rest::RestQuizStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Reads up to `limit` rows from `quizzes`, in whatever order the backend returns them.
    async fn fetch_quizzes(&self, limit: usize) -> Result<Vec<QuizRecord>, StoreError>;

    /// Inserts one row into `participants`.
    async fn insert_participant(&self, submission: &ParticipantSubmission) -> Result<(), StoreError>;
}
