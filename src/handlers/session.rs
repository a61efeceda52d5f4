// src/handlers/session.rs

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::{participant::StartRequest, question::OptionLabel, session::SessionView},
    services::session::{BeginOutcome, FlowError, SessionController},
    views,
};

/// Form body of an option button on the quiz screen.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub option: String,
}

/// Renders the current screen.
pub async fn show_screen(State(controller): State<SessionController>) -> Html<String> {
    Html(views::render(&controller.snapshot()))
}

/// JSON view of the current screen.
pub async fn session_state(State(controller): State<SessionController>) -> Json<SessionView> {
    Json(controller.snapshot())
}

/// Handles the name entry form.
///
/// * Blank names re-render the form with a notice and leave the session untouched.
/// * A gate denial switches to the error screen.
/// * Otherwise the question fetch runs in the background behind the loading screen.
pub async fn start(
    State(controller): State<SessionController>,
    Form(req): Form<StartRequest>,
) -> Result<Response, AppError> {
    let outcome = match req.validate() {
        Ok(()) => controller.begin(req.display_name()),
        Err(_) => Err(FlowError::InvalidName),
    };

    match outcome {
        Ok(BeginOutcome::Loading) => {
            let loader = controller.clone();
            tokio::spawn(async move {
                if let Err(e) = loader.load().await {
                    tracing::warn!("Question load abandoned: {}", e);
                }
            });
        }
        Ok(BeginOutcome::GateDenied) => {}
        Err(FlowError::InvalidName) => {
            let notice = FlowError::InvalidName.to_string();
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(views::name_entry::render(Some(&notice))),
            )
                .into_response());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to("/").into_response())
}

pub async fn select_option(
    State(controller): State<SessionController>,
    Form(req): Form<AnswerRequest>,
) -> Result<Redirect, AppError> {
    let label = req
        .option
        .parse::<OptionLabel>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    controller.select_option(label)?;
    Ok(Redirect::to("/"))
}

pub async fn go_next(State(controller): State<SessionController>) -> Result<Redirect, AppError> {
    controller.go_next()?;
    Ok(Redirect::to("/"))
}

pub async fn go_previous(State(controller): State<SessionController>) -> Result<Redirect, AppError> {
    controller.go_previous()?;
    Ok(Redirect::to("/"))
}

/// Manual submission. Scoring, the participant write and the gate update all
/// happen before the redirect to the results screen.
pub async fn submit(State(controller): State<SessionController>) -> Result<Redirect, AppError> {
    controller.submit().await?;
    Ok(Redirect::to("/"))
}

pub async fn dismiss(State(controller): State<SessionController>) -> Result<Redirect, AppError> {
    controller.dismiss()?;
    Ok(Redirect::to("/"))
}
