// src/services/store/postgres.rs

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use super::{QuizStore, StoreError};
use crate::models::{participant::ParticipantSubmission, question::QuizRecord};

/// Talks to the Postgres database behind the backend directly.
#[derive(Debug, Clone)]
pub struct PgQuizStore {
    pool: PgPool,
}

impl PgQuizStore {
    pub fn new(pool: PgPool) -> Self {
        PgQuizStore { pool }
    }

    /// Connects with a handful of retries, for databases that start alongside the client.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let mut retry_count = 0;
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(2)
                .acquire_timeout(Duration::from_secs(3))
                .connect(database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) => {
                    retry_count += 1;
                    if retry_count > 5 {
                        return Err(e.into());
                    }
                    tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        };
        tracing::info!("Database connected...");
        Ok(PgQuizStore { pool })
    }
}

#[async_trait]
impl QuizStore for PgQuizStore {
    async fn fetch_quizzes(&self, limit: usize) -> Result<Vec<QuizRecord>, StoreError> {
        let records = sqlx::query_as::<_, QuizRecord>(
            r#"
            SELECT
                id::TEXT AS id,
                question,
                option_a,
                option_b,
                option_c,
                option_d,
                correct_option
            FROM quizzes
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert_participant(&self, submission: &ParticipantSubmission) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO participants (name, correct_count) VALUES ($1, $2)")
            .bind(&submission.name)
            .bind(submission.correct_count)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
