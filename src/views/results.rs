// src/views/results.rs

use std::fmt::Write;

use super::page;
use crate::{
    models::{question::OptionLabel, session::QuizOutcome},
    utils::html::escape,
};

/// Per-question breakdown line of the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFeedback<'a> {
    pub number: usize,
    pub question: &'a str,
    pub chosen: Option<(OptionLabel, &'a str)>,
    pub correct: (OptionLabel, &'a str),
    pub is_correct: bool,
}

/// Re-derives correctness of each answer for display; the score itself comes from the outcome.
pub fn feedback(outcome: &QuizOutcome) -> Vec<QuestionFeedback<'_>> {
    outcome
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let chosen = outcome.answers.get(&q.id).copied();
            QuestionFeedback {
                number: i + 1,
                question: &q.text,
                chosen: chosen.map(|label| (label, q.option_text(label))),
                correct: (q.correct_option, q.option_text(q.correct_option)),
                is_correct: chosen == Some(q.correct_option),
            }
        })
        .collect()
}

pub fn render(outcome: &QuizOutcome) -> String {
    let (headline, closing) = if outcome.is_perfect() {
        ("Congratulations!", "Perfect score! You're amazing!")
    } else {
        ("Thank You!", "Thanks for participating in our quiz!")
    };

    let mut items = String::new();
    for item in feedback(outcome) {
        let answer = match item.chosen {
            Some((label, text)) => format!("{} - {}", label, escape(text)),
            None => "Not answered".to_string(),
        };
        let correction = if item.is_correct {
            String::new()
        } else {
            format!(
                r#"<p class="correct-answer">Correct Answer: {} - {}</p>"#,
                item.correct.0,
                escape(item.correct.1)
            )
        };
        let _ = writeln!(
            items,
            r#"    <li class="{class}"><h3>Question {number}: {question}</h3><p class="your-answer">Your Answer: {answer}</p>{correction}</li>"#,
            class = if item.is_correct { "correct" } else { "incorrect" },
            number = item.number,
            question = escape(item.question),
        );
    }

    page(
        "Quiz Results",
        None,
        &format!(
            r#"<main class="results">
  <h1>{headline}</h1>
  <p class="score">{name}, you scored {score} out of {total}</p>
  <p>{closing}</p>
  <ol>
{items}  </ol>
</main>"#,
            name = escape(&outcome.participant),
            score = outcome.score,
            total = outcome.total,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{question::Question, session::SubmitTrigger},
        services::scoring::{AnswerMap, score},
    };

    fn outcome(answers: &[(&str, OptionLabel)]) -> QuizOutcome {
        let questions: Vec<Question> = ["A", "B", "C", "D", "A"]
            .iter()
            .enumerate()
            .map(|(i, correct)| Question {
                id: format!("q{i}"),
                text: format!("Question text {i}"),
                options: ["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
                correct_option: correct.parse().unwrap(),
            })
            .collect();
        let answers: AnswerMap = answers.iter().map(|(id, l)| (id.to_string(), *l)).collect();
        QuizOutcome {
            participant: "Ada".to_string(),
            score: score(&questions, &answers),
            total: questions.len(),
            questions,
            answers,
            ended_by: SubmitTrigger::Manual,
        }
    }

    #[test]
    fn three_of_five_breakdown() {
        let outcome = outcome(&[
            ("q0", OptionLabel::A),
            ("q1", OptionLabel::B),
            ("q2", OptionLabel::C),
            ("q3", OptionLabel::A),
            ("q4", OptionLabel::B),
        ]);
        let items = feedback(&outcome);
        assert_eq!(items.iter().filter(|i| i.is_correct).count(), 3);
        assert_eq!(items.iter().filter(|i| !i.is_correct).count(), 2);
        assert_eq!(items[3].chosen, Some((OptionLabel::A, "alpha")));
        assert_eq!(items[3].correct, (OptionLabel::D, "delta"));

        let html = render(&outcome);
        assert!(html.contains("Ada, you scored 3 out of 5"));
        assert!(html.contains("Thank You!"));
        assert_eq!(html.matches(r#"<li class="correct">"#).count(), 3);
        assert_eq!(html.matches(r#"<li class="incorrect">"#).count(), 2);
        assert!(html.contains("Correct Answer: D - delta"));
    }

    #[test]
    fn unanswered_questions_are_incorrect() {
        let outcome = outcome(&[("q0", OptionLabel::A)]);
        let items = feedback(&outcome);
        assert!(items[0].is_correct);
        assert!(items[1..].iter().all(|i| !i.is_correct && i.chosen.is_none()));
        assert!(render(&outcome).contains("Your Answer: Not answered"));
    }

    #[test]
    fn perfect_score_congratulates() {
        let outcome = outcome(&[
            ("q0", OptionLabel::A),
            ("q1", OptionLabel::B),
            ("q2", OptionLabel::C),
            ("q3", OptionLabel::D),
            ("q4", OptionLabel::A),
        ]);
        let html = render(&outcome);
        assert!(html.contains("Congratulations!"));
        assert!(html.contains("5 out of 5"));
        assert!(!html.contains("correct-answer"));
    }
}
