// src/services/session.rs

//! Session flow controller.
//!
//! Drives one participant through `NameEntry -> Loading -> Quiz -> Results`,
//! with `Error` reachable before the quiz starts. The screen lives behind a
//! mutex that is never held across an `.await`; leaving `Quiz` happens under
//! that lock, so a timer expiry and a manual submit cannot both submit.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use thiserror::Error;

use crate::{
    models::{
        participant::ParticipantSubmission,
        question::{OptionLabel, PublicQuestion, Question},
        session::{ErrorKind, QuizOutcome, QuizView, SessionError, SessionView, SubmitTrigger},
    },
    services::{
        gate::DailyGate,
        quiz_fetch::fetch_questions,
        scoring::{AnswerMap, score},
        store::QuizStore,
        timer::{Countdown, TickControl},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Please enter your name to begin")]
    InvalidName,

    #[error("'{action}' is not available on the {screen} screen")]
    NotAvailable {
        action: &'static str,
        screen: &'static str,
    },

    #[error("Select an answer before moving on")]
    Unanswered,

    #[error("Already at the first question")]
    AtFirstQuestion,

    #[error("Already at the last question")]
    AtLastQuestion,

    #[error("Answer every question before submitting ({answered} of {total} answered)")]
    Incomplete { answered: usize, total: usize },

    #[error("The quiz can only be submitted from the last question")]
    NotOnLastQuestion,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub question_limit: usize,
    pub quiz_duration_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            question_limit: 5,
            quiz_duration_secs: 300,
        }
    }
}

/// In-progress quiz: fetched questions, the answer map and the navigation index.
#[derive(Debug, Clone)]
pub struct QuizProgress {
    participant: String,
    questions: Vec<Question>,
    answers: AnswerMap,
    current: usize,
    time_left: u64,
}

impl QuizProgress {
    /// `questions` must be non-empty.
    pub fn new(participant: String, questions: Vec<Question>, time_left: u64) -> Self {
        QuizProgress {
            participant,
            questions,
            answers: AnswerMap::new(),
            current: 0,
            time_left,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_answer(&self) -> Option<OptionLabel> {
        self.answers.get(&self.current_question().id).copied()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Records (or replaces) the answer to the displayed question.
    pub fn select(&mut self, label: OptionLabel) {
        let id = self.current_question().id.clone();
        self.answers.insert(id, label);
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_last() && self.current_answer().is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    pub fn go_next(&mut self) -> Result<(), FlowError> {
        if self.is_last() {
            return Err(FlowError::AtLastQuestion);
        }
        if self.current_answer().is_none() {
            return Err(FlowError::Unanswered);
        }
        self.current += 1;
        Ok(())
    }

    pub fn go_previous(&mut self) -> Result<(), FlowError> {
        if !self.can_go_previous() {
            return Err(FlowError::AtFirstQuestion);
        }
        self.current -= 1;
        Ok(())
    }

    fn view(&self) -> QuizView {
        QuizView {
            participant: self.participant.clone(),
            question: PublicQuestion::from(self.current_question()),
            selected: self.current_answer(),
            index: self.current,
            total: self.questions.len(),
            answered: self.answers.len(),
            time_left: self.time_left,
            can_go_previous: self.can_go_previous(),
            can_go_next: self.can_go_next(),
            is_last: self.is_last(),
            can_submit: self.can_submit(),
        }
    }

    fn into_outcome(self, ended_by: SubmitTrigger) -> QuizOutcome {
        QuizOutcome {
            score: score(&self.questions, &self.answers),
            total: self.questions.len(),
            participant: self.participant,
            questions: self.questions,
            answers: self.answers,
            ended_by,
        }
    }
}

#[derive(Debug)]
enum Screen {
    NameEntry,
    Loading { participant: String },
    Quiz(QuizProgress),
    Results(QuizOutcome),
    Error(SessionError),
}

impl Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::NameEntry => "name entry",
            Screen::Loading { .. } => "loading",
            Screen::Quiz(_) => "quiz",
            Screen::Results(_) => "results",
            Screen::Error(_) => "error",
        }
    }

    fn take_quiz(&mut self) -> Option<QuizProgress> {
        match std::mem::replace(self, Screen::NameEntry) {
            Screen::Quiz(progress) => Some(progress),
            other => {
                *self = other;
                None
            }
        }
    }
}

fn not_available(action: &'static str, screen: &Screen) -> FlowError {
    FlowError::NotAvailable {
        action,
        screen: screen.name(),
    }
}

/// Result of submitting the name entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    Loading,
    GateDenied,
}

struct Inner {
    screen: Mutex<Screen>,
    countdown: Mutex<Option<Countdown>>,
    store: Arc<dyn QuizStore>,
    gate: DailyGate,
    settings: SessionSettings,
}

/// Cheaply clonable handle on the single session of this process.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

impl SessionController {
    pub fn new(store: Arc<dyn QuizStore>, gate: DailyGate, settings: SessionSettings) -> Self {
        SessionController {
            inner: Arc::new(Inner {
                screen: Mutex::new(Screen::NameEntry),
                countdown: Mutex::new(None),
                store,
                gate,
                settings,
            }),
        }
    }

    pub fn settings(&self) -> SessionSettings {
        self.inner.settings
    }

    pub fn snapshot(&self) -> SessionView {
        match &*self.inner.screen.lock() {
            Screen::NameEntry => SessionView::NameEntry,
            Screen::Loading { participant } => SessionView::Loading {
                participant: participant.clone(),
            },
            Screen::Quiz(progress) => SessionView::Quiz(progress.view()),
            Screen::Results(outcome) => SessionView::Results(outcome.clone()),
            Screen::Error(err) => SessionView::Error(err.clone()),
        }
    }

    /// Validates the name and checks the daily gate. On success the session is `Loading`
    /// and [`load`](Self::load) must follow.
    pub fn begin(&self, name: &str) -> Result<BeginOutcome, FlowError> {
        let mut screen = self.inner.screen.lock();
        if !matches!(*screen, Screen::NameEntry) {
            return Err(not_available("start", &screen));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(FlowError::InvalidName);
        }

        if !self.inner.gate.is_eligible() {
            tracing::info!("Participant {:?} turned away by the daily gate", name);
            *screen = Screen::Error(SessionError::gate_denied());
            return Ok(BeginOutcome::GateDenied);
        }

        tracing::info!("Starting quiz for {:?}", name);
        *screen = Screen::Loading {
            participant: name.to_string(),
        };
        Ok(BeginOutcome::Loading)
    }

    /// Fetches the question batch and enters `Quiz`, or `Error` when the fetch fails.
    pub async fn load(&self) -> Result<(), FlowError> {
        let participant = match &*self.inner.screen.lock() {
            Screen::Loading { participant } => participant.clone(),
            other => return Err(not_available("load", other)),
        };

        let fetched = fetch_questions(self.inner.store.as_ref(), self.inner.settings.question_limit).await;

        let mut screen = self.inner.screen.lock();
        if !matches!(*screen, Screen::Loading { .. }) {
            return Err(not_available("load", &screen));
        }
        match fetched {
            Ok(questions) => {
                tracing::info!("Loaded {} questions", questions.len());
                *screen = Screen::Quiz(QuizProgress::new(
                    participant,
                    questions,
                    self.inner.settings.quiz_duration_secs,
                ));
                self.start_countdown();
            }
            Err(e) => {
                tracing::error!("Error fetching quizzes: {}", e);
                *screen = Screen::Error(SessionError::from_fetch(&e));
            }
        }
        Ok(())
    }

    /// [`begin`](Self::begin) followed by [`load`](Self::load) when the gate lets the participant in.
    pub async fn start(&self, name: &str) -> Result<BeginOutcome, FlowError> {
        let outcome = self.begin(name)?;
        if outcome == BeginOutcome::Loading {
            self.load().await?;
        }
        Ok(outcome)
    }

    pub fn select_option(&self, label: OptionLabel) -> Result<(), FlowError> {
        self.with_quiz("select", |progress| {
            progress.select(label);
            Ok(())
        })
    }

    pub fn go_next(&self) -> Result<(), FlowError> {
        self.with_quiz("next", QuizProgress::go_next)
    }

    pub fn go_previous(&self) -> Result<(), FlowError> {
        self.with_quiz("previous", QuizProgress::go_previous)
    }

    /// Manual submission from the last question once every question is answered. Returns the score.
    pub async fn submit(&self) -> Result<u32, FlowError> {
        self.finish(SubmitTrigger::Manual).await
    }

    /// Leaves the error screen. A gate denial only clears once the gate opens again.
    pub fn dismiss(&self) -> Result<(), FlowError> {
        let mut screen = self.inner.screen.lock();
        let Screen::Error(err) = &*screen else {
            return Err(not_available("dismiss", &screen));
        };

        if err.kind == ErrorKind::GateDenied && !self.inner.gate.is_eligible() {
            tracing::debug!("Still gated, staying on the error screen");
            return Ok(());
        }
        *screen = Screen::NameEntry;
        Ok(())
    }

    fn with_quiz<T>(
        &self,
        action: &'static str,
        f: impl FnOnce(&mut QuizProgress) -> Result<T, FlowError>,
    ) -> Result<T, FlowError> {
        let mut screen = self.inner.screen.lock();
        match &mut *screen {
            Screen::Quiz(progress) => f(progress),
            other => Err(not_available(action, other)),
        }
    }

    /// Called with the screen lock held.
    fn start_countdown(&self) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let countdown = Countdown::start(self.inner.settings.quiz_duration_secs, move |left| {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => SessionController { inner }.on_tick(left).await,
                    None => TickControl::Stop,
                }
            }
        });
        *self.inner.countdown.lock() = Some(countdown);
    }

    async fn on_tick(&self, left: u64) -> TickControl {
        {
            let mut screen = self.inner.screen.lock();
            match &mut *screen {
                Screen::Quiz(progress) => progress.time_left = left,
                _ => return TickControl::Stop,
            }
        }
        if left > 0 {
            return TickControl::Continue;
        }

        tracing::info!("Time is up, submitting the quiz");
        if let Err(e) = self.finish(SubmitTrigger::TimeExpired).await {
            tracing::debug!("Timer expiry ignored: {}", e);
        }
        TickControl::Stop
    }

    async fn finish(&self, trigger: SubmitTrigger) -> Result<u32, FlowError> {
        let outcome = {
            let mut screen = self.inner.screen.lock();
            if let Screen::Quiz(progress) = &*screen {
                if trigger == SubmitTrigger::Manual {
                    if !progress.can_submit() {
                        return Err(FlowError::Incomplete {
                            answered: progress.answers.len(),
                            total: progress.questions.len(),
                        });
                    }
                    if !progress.is_last() {
                        return Err(FlowError::NotOnLastQuestion);
                    }
                }
            }
            let Some(progress) = screen.take_quiz() else {
                return Err(not_available("submit", &screen));
            };

            let outcome = progress.into_outcome(trigger);
            *screen = Screen::Results(outcome.clone());

            // On expiry this runs inside the countdown task, which ends by itself.
            if let Some(countdown) = self.inner.countdown.lock().take() {
                if trigger == SubmitTrigger::Manual {
                    countdown.stop();
                }
            }
            outcome
        };

        tracing::info!(
            "{} scored {} out of {} ({:?})",
            outcome.participant,
            outcome.score,
            outcome.total,
            trigger
        );

        let submission = ParticipantSubmission {
            name: outcome.participant.clone(),
            correct_count: outcome.score as i32,
        };
        match self.inner.store.insert_participant(&submission).await {
            Ok(()) => {
                if let Err(e) = self.inner.gate.mark_participated() {
                    tracing::warn!("Failed to record daily participation: {}", e);
                }
            }
            // The participant may try again today since nothing was recorded.
            Err(e) => tracing::error!("Error saving participant: {}", e),
        }

        Ok(outcome.score)
    }
}
