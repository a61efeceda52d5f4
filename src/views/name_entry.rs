// src/views/name_entry.rs

use super::page;
use crate::utils::html::escape;

/// Name entry form. `notice` is shown above the field after a rejected attempt.
pub fn render(notice: Option<&str>) -> String {
    let notice = notice
        .map(|msg| format!(r#"<p class="notice" role="alert">{}</p>"#, escape(msg)))
        .unwrap_or_default();

    page(
        "Quiz Challenge",
        None,
        &format!(
            r#"<main class="name-entry">
  <h1>Quiz Challenge</h1>
  <p>Test your knowledge with our interactive quiz!</p>
  {notice}
  <form method="post" action="/start">
    <label for="name">Enter your name to begin</label>
    <input id="name" name="name" type="text" placeholder="Your name here..." required>
    <button type="submit">Start Quiz</button>
  </form>
</main>"#
        ),
    )
}
