// src/models/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::prelude::FromRow;
use thiserror::Error;

/// One of the four answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }

    fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not an option label (expected A, B, C or D)")]
pub struct ParseOptionError(pub String);

impl FromStr for OptionLabel {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            _ => Err(ParseOptionError(s.to_string())),
        }
    }
}

/// Represents a row of the backend 'quizzes' table as it travels over the wire.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizRecord {
    /// Backends hand out either uuid strings or integer keys.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// One of "A".."D".
    pub correct_option: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// A fetched quiz question. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Option texts in A, B, C, D order.
    pub options: [String; 4],
    pub correct_option: OptionLabel,
}

impl Question {
    pub fn option_text(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct_option == label
    }
}

impl TryFrom<QuizRecord> for Question {
    type Error = ParseOptionError;

    fn try_from(record: QuizRecord) -> Result<Self, Self::Error> {
        let correct_option = record.correct_option.parse()?;
        Ok(Question {
            id: record.id,
            text: record.question,
            options: [record.option_a, record.option_b, record.option_c, record.option_d],
            correct_option,
        })
    }
}

/// DTO for exposing a question while the quiz is running (excludes the correct option).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<PublicOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicOption {
    pub label: OptionLabel,
    pub text: String,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        PublicQuestion {
            id: q.id.clone(),
            text: q.text.clone(),
            options: OptionLabel::ALL
                .iter()
                .map(|&label| PublicOption {
                    label,
                    text: q.option_text(label).to_string(),
                })
                .collect(),
        }
    }
}
