// src/views/mod.rs

//! Server-rendered screens. Each one renders from a [`SessionView`] snapshot
//! and only emits form posts back to the intent routes.

use crate::models::session::SessionView;

pub mod error;
pub mod name_entry;
pub mod quiz;
pub mod results;

/// Renders whichever screen the snapshot describes.
pub fn render(view: &SessionView) -> String {
    match view {
        SessionView::NameEntry => name_entry::render(None),
        SessionView::Loading { .. } => loading(),
        SessionView::Quiz(progress) => quiz::render(progress),
        SessionView::Results(outcome) => results::render(outcome),
        SessionView::Error(err) => error::render(err),
    }
}

fn loading() -> String {
    page(
        "Loading Quiz...",
        Some(1),
        r#"<main class="loading">
  <h2>Loading Quiz...</h2>
  <p>Preparing your questions</p>
</main>"#,
    )
}

/// Wraps a body in the shared document shell. `refresh_secs` makes the browser
/// re-request `/` periodically, which keeps the countdown and loading screens current.
pub(crate) fn page(title: &str, refresh_secs: Option<u32>, body: &str) -> String {
    let refresh = refresh_secs
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{secs}; url=/">"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// A single-button form posting to `action`.
pub(crate) fn button(action: &str, label: &str, enabled: bool) -> String {
    let disabled = if enabled { "" } else { " disabled" };
    format!(r#"<form method="post" action="{action}"><button type="submit"{disabled}>{label}</button></form>"#)
}
