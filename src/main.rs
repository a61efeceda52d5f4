// src/main.rs

use std::sync::Arc;

use daily_quiz::config::{BackendConfig, Config};
use daily_quiz::routes;
use daily_quiz::services::gate::{DailyGate, LocalStorage, SystemClock};
use daily_quiz::services::session::SessionController;
use daily_quiz::services::store::{PgQuizStore, QuizStore, RestQuizStore};
use daily_quiz::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "quiz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let store: Arc<dyn QuizStore> = match &config.backend {
        BackendConfig::Rest { url, api_key } => {
            tracing::info!("Using REST backend at {}", url);
            Arc::new(RestQuizStore::new(url, api_key.clone())?)
        }
        BackendConfig::Postgres { database_url } => {
            tracing::info!("Using Postgres backend");
            Arc::new(PgQuizStore::connect(database_url).await?)
        }
    };

    let gate = DailyGate::new(LocalStorage::new(&config.gate_file), Arc::new(SystemClock));
    if !gate.is_eligible() {
        tracing::info!("Daily quiz already taken on this device today");
    }

    let state = AppState {
        controller: SessionController::new(store, gate, config.session_settings()),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Quiz open at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
