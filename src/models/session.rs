// src/models/session.rs

//! Read-only views of the session handed to the presentation layer.

use serde::Serialize;

use crate::{
    models::question::{OptionLabel, PublicQuestion, Question},
    services::{quiz_fetch::FetchError, scoring::AnswerMap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitTrigger {
    Manual,
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    GateDenied,
    EmptyResult,
    Transport,
    InvalidRecord,
}

/// A user-visible error that replaces the current screen.
#[derive(Debug, Clone, Serialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn gate_denied() -> Self {
        SessionError {
            kind: ErrorKind::GateDenied,
            message: "You have already participated in the quiz today. Please come back tomorrow!"
                .to_string(),
        }
    }

    pub fn from_fetch(err: &FetchError) -> Self {
        let kind = match err {
            FetchError::EmptyResult => ErrorKind::EmptyResult,
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::InvalidRecord { .. } => ErrorKind::InvalidRecord,
        };
        SessionError {
            kind,
            message: err.to_string(),
        }
    }

    /// Caption of the single button on the error screen.
    pub fn acknowledge_label(&self) -> &'static str {
        match self.kind {
            ErrorKind::GateDenied => "Come Back Tomorrow",
            _ => "Try Again",
        }
    }
}

/// Final state of a submitted quiz.
#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub participant: String,
    pub score: u32,
    pub total: usize,
    pub questions: Vec<Question>,
    pub answers: AnswerMap,
    pub ended_by: SubmitTrigger,
}

impl QuizOutcome {
    pub fn is_perfect(&self) -> bool {
        self.score as usize == self.total
    }
}

/// Everything the quiz screen needs; never carries correct options.
#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub participant: String,
    pub question: PublicQuestion,
    pub selected: Option<OptionLabel>,
    /// Zero-based position of the displayed question.
    pub index: usize,
    pub total: usize,
    pub answered: usize,
    pub time_left: u64,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub is_last: bool,
    pub can_submit: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum SessionView {
    NameEntry,
    Loading { participant: String },
    Quiz(QuizView),
    Results(QuizOutcome),
    Error(SessionError),
}
