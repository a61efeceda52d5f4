// src/state.rs

use crate::services::session::SessionController;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub controller: SessionController,
}

impl FromRef<AppState> for SessionController {
    fn from_ref(state: &AppState) -> Self {
        state.controller.clone()
    }
}
