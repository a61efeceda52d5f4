// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use dotenvy::dotenv;
use thiserror::Error;

use crate::services::session::SessionSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no backend configured: set SUPABASE_URL and SUPABASE_ANON_KEY, or DATABASE_URL")]
    MissingBackend,

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Where quiz content comes from and participant rows go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Rest { url: String, api_key: String },
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub bind_addr: SocketAddr,
    pub gate_file: PathBuf,
    pub question_limit: usize,
    pub quiz_duration_secs: u64,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match (
            lookup("SUPABASE_URL"),
            lookup("SUPABASE_ANON_KEY"),
            lookup("DATABASE_URL"),
        ) {
            (Some(url), Some(api_key), _) => BackendConfig::Rest { url, api_key },
            (_, _, Some(database_url)) => BackendConfig::Postgres { database_url },
            _ => return Err(ConfigError::MissingBackend),
        };

        let question_limit = parse_or(&lookup, "QUIZ_QUESTION_LIMIT", 5usize)?;
        let quiz_duration_secs = parse_or(&lookup, "QUIZ_DURATION_SECS", 300u64)?;
        if question_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "QUIZ_QUESTION_LIMIT",
                value: "0".to_string(),
            });
        }
        if quiz_duration_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "QUIZ_DURATION_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            backend,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            gate_file: lookup("QUIZ_GATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".quiz_participation.json")),
            question_limit,
            quiz_duration_secs,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            question_limit: self.question_limit,
            quiz_duration_secs: self.quiz_duration_secs,
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
