// src/views/error.rs

use super::{button, page};
use crate::{models::session::SessionError, utils::html::escape};

pub fn render(err: &SessionError) -> String {
    page(
        "Something went wrong",
        None,
        &format!(
            r#"<main class="error" role="alert">
  <h2>Oops! Something went wrong</h2>
  <p>{message}</p>
  {action}
</main>"#,
            message = escape(&err.message),
            action = button("/dismiss", err.acknowledge_label(), true),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::ErrorKind;

    #[test]
    fn gate_denial_says_come_back_tomorrow() {
        let html = render(&SessionError::gate_denied());
        assert!(html.contains("Come Back Tomorrow"));
        assert!(html.contains(r#"action="/dismiss""#));
    }

    #[test]
    fn fetch_failures_offer_a_retry() {
        let html = render(&SessionError {
            kind: ErrorKind::EmptyResult,
            message: "No quizzes found".to_string(),
        });
        assert!(html.contains("Try Again"));
        assert!(html.contains("No&#32;quizzes&#32;found"));
    }
}
