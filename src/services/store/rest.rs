// src/services/store/rest.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use super::{QuizStore, StoreError};
use crate::models::{participant::ParticipantSubmission, question::QuizRecord};

/// Upper bound on a whole request, so a stalled backend ends in an error screen.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// PostgREST (Supabase) client for the two quiz tables.
#[derive(Debug, Clone)]
pub struct RestQuizStore {
    client: Client,
    base: Url,
    api_key: String,
}

impl RestQuizStore {
    /// `base_url` is the project root, e.g. `https://xyz.supabase.co`.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut base = Url::parse(base_url)?;
        // Without a trailing slash `join` would replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(RestQuizStore {
            client: Client::builder().timeout(timeout).build()?,
            base: base.join("rest/v1/")?,
            api_key: api_key.into(),
        })
    }

    fn table(&self, name: &str) -> Result<Url, StoreError> {
        Ok(self.base.join(name)?)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key).bearer_auth(&self.api_key)
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl QuizStore for RestQuizStore {
    async fn fetch_quizzes(&self, limit: usize) -> Result<Vec<QuizRecord>, StoreError> {
        let mut url = self.table("quizzes")?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("limit", &limit.to_string());

        let response = self.authorized(self.client.get(url)).send().await?;
        let records = check_status(response).await?.json::<Vec<QuizRecord>>().await?;
        Ok(records)
    }

    async fn insert_participant(&self, submission: &ParticipantSubmission) -> Result<(), StoreError> {
        let url = self.table("participants")?;
        let response = self
            .authorized(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(&[submission])
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
