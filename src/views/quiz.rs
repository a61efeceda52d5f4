// src/views/quiz.rs

use std::fmt::Write;

use super::{button, page};
use crate::{models::session::QuizView, services::timer::format_clock, utils::html::escape};

pub fn render(view: &QuizView) -> String {
    let position = view.index + 1;
    let progress = position * 100 / view.total.max(1);

    let mut options = String::new();
    for option in &view.question.options {
        let selected = view.selected == Some(option.label);
        let _ = write!(
            options,
            r#"    <form method="post" action="/answer"><input type="hidden" name="option" value="{label}"><button type="submit" class="option{class}" aria-pressed="{selected}">{label}. {text}</button></form>
"#,
            label = option.label,
            class = if selected { " selected" } else { "" },
            text = escape(&option.text),
        );
    }

    let forward = if view.is_last {
        button("/submit", "Submit Quiz", view.can_submit)
    } else {
        button("/next", "Next", view.can_go_next)
    };

    page(
        "Quiz Challenge",
        Some(1),
        &format!(
            r#"<main class="quiz">
  <header>
    <h1>Quiz Challenge</h1>
    <span class="timer">{clock}</span>
    <progress max="100" value="{progress}">{progress}%</progress>
    <p>Question {position} of {total}</p>
  </header>
  <section>
    <h2>{question}</h2>
{options}  </section>
  <nav>
    {previous}
    {forward}
  </nav>
</main>"#,
            clock = format_clock(view.time_left),
            total = view.total,
            question = escape(&view.question.text),
            previous = button("/previous", "Previous", view.can_go_previous),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{OptionLabel, PublicOption, PublicQuestion};

    fn view(index: usize, total: usize, selected: Option<OptionLabel>) -> QuizView {
        QuizView {
            participant: "Ada".to_string(),
            question: PublicQuestion {
                id: "q".to_string(),
                text: "Which is <largest>?".to_string(),
                options: OptionLabel::ALL
                    .iter()
                    .map(|&label| PublicOption {
                        label,
                        text: format!("choice-{label}"),
                    })
                    .collect(),
            },
            selected,
            index,
            total,
            answered: index + usize::from(selected.is_some()),
            time_left: 125,
            can_go_previous: index > 0,
            can_go_next: index + 1 < total && selected.is_some(),
            is_last: index + 1 == total,
            can_submit: false,
        }
    }

    #[test]
    fn shows_clock_progress_and_options() {
        let html = render(&view(1, 5, None));
        assert!(html.contains("2:05"));
        assert!(html.contains("Question 2 of 5"));
        assert!(html.contains(r#"value="40""#));
        for label in ["A", "B", "C", "D"] {
            assert!(html.contains(&format!("choice-{label}")));
        }
        assert!(html.contains("&lt;largest&gt;"));
    }

    #[test]
    fn next_waits_for_an_answer() {
        let html = render(&view(0, 5, None));
        assert!(html.contains(r#"<button type="submit" disabled>Next</button>"#));
        assert!(html.contains(r#"<button type="submit" disabled>Previous</button>"#));

        let html = render(&view(0, 5, Some(OptionLabel::C)));
        assert!(html.contains(r#"<button type="submit">Next</button>"#));
        assert!(html.contains(r#"class="option selected" aria-pressed="true">C."#));
    }

    #[test]
    fn last_question_offers_submit_instead_of_next() {
        let html = render(&view(4, 5, Some(OptionLabel::A)));
        assert!(!html.contains(">Next<"));
        assert!(html.contains(r#"<button type="submit" disabled>Submit Quiz</button>"#));

        let mut ready = view(4, 5, Some(OptionLabel::A));
        ready.can_submit = true;
        assert!(render(&ready).contains(r#"<button type="submit">Submit Quiz</button>"#));
    }
}
