// tests/common/mod.rs

#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;
use daily_quiz::{
    models::{participant::ParticipantSubmission, question::QuizRecord},
    routes,
    services::{
        gate::{DailyGate, FixedClock, LocalStorage},
        session::{SessionController, SessionSettings},
        store::{QuizStore, StoreError},
    },
    state::AppState,
};
use parking_lot::Mutex;

/// In-memory stand-in for the backend tables.
#[derive(Default)]
pub struct MemoryStore {
    pub quizzes: Mutex<Vec<QuizRecord>>,
    pub participants: Mutex<Vec<ParticipantSubmission>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn with_quizzes(quizzes: Vec<QuizRecord>) -> Arc<Self> {
        Arc::new(MemoryStore {
            quizzes: Mutex::new(quizzes),
            ..Default::default()
        })
    }

    pub fn saved(&self) -> Vec<ParticipantSubmission> {
        self.participants.lock().clone()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn fetch_quizzes(&self, limit: usize) -> Result<Vec<QuizRecord>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.quizzes.lock().iter().take(limit).cloned().collect())
    }

    async fn insert_participant(&self, submission: &ParticipantSubmission) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 500,
                body: "insert failed".to_string(),
            });
        }
        self.participants.lock().push(submission.clone());
        Ok(())
    }
}

/// Five questions whose correct options are A, B, C, D, A.
pub fn five_quizzes() -> Vec<QuizRecord> {
    ["A", "B", "C", "D", "A"]
        .iter()
        .enumerate()
        .map(|(i, correct)| QuizRecord {
            id: format!("q{}", i + 1),
            question: format!("Question number {}", i + 1),
            option_a: format!("alpha{}", i + 1),
            option_b: format!("beta{}", i + 1),
            option_c: format!("gamma{}", i + 1),
            option_d: format!("delta{}", i + 1),
            correct_option: correct.to_string(),
        })
        .collect()
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn temp_gate_file() -> PathBuf {
    std::env::temp_dir().join(format!("daily_quiz_{}.json", uuid::Uuid::new_v4()))
}

pub struct TestSession {
    pub controller: SessionController,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub gate: DailyGate,
    pub gate_file: PathBuf,
}

impl Drop for TestSession {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.gate_file);
    }
}

pub fn session_with(store: Arc<MemoryStore>, quiz_duration_secs: u64) -> TestSession {
    let gate_file = temp_gate_file();
    let clock = Arc::new(FixedClock::new(today()));
    let gate = DailyGate::new(LocalStorage::new(&gate_file), clock.clone());
    let controller = SessionController::new(
        store.clone(),
        gate.clone(),
        SessionSettings {
            question_limit: 5,
            quiz_duration_secs,
        },
    );
    TestSession {
        controller,
        store,
        clock,
        gate,
        gate_file,
    }
}

/// Spawns the app on a random port and returns its base URL.
pub async fn spawn_app(session: &TestSession) -> String {
    let state = AppState {
        controller: session.controller.clone(),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}
