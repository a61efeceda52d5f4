// src/models/participant.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents a row written to the 'participants' table once a session is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSubmission {
    pub name: String,
    pub correct_count: i32,
}

/// Form body of the name entry screen.
#[derive(Debug, Deserialize, Validate)]
pub struct StartRequest {
    // A missing field is treated like a blank one.
    #[serde(default)]
    #[validate(custom(function = validate_display_name))]
    pub name: String,
}

impl StartRequest {
    /// Name as it is stored and displayed.
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }
}

fn validate_display_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("name_cannot_be_blank"));
    }
    Ok(())
}
