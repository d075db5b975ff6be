use serde::Deserialize;
use std::convert::TryFrom;

use crate::error::{QuizError, Result};

pub const OPTION_COUNT: usize = 4;

/// A question as it appears in a JSON question source.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: i64,
    pub topic: String,
    #[serde(default)]
    pub explanation: String,
}

/// A question as it appears in a CSV question source, one column per option.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawCsvQuestion {
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_index: i64,
    pub topic: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl From<RawCsvQuestion> for RawQuestion {
    fn from(raw: RawCsvQuestion) -> Self {
        RawQuestion {
            text: raw.text,
            options: vec![raw.option_a, raw.option_b, raw.option_c, raw.option_d],
            correct_index: raw.correct_index,
            topic: raw.topic,
            explanation: raw.explanation.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    text: String,
    options: [String; OPTION_COUNT],
    correct_index: usize,
    topic: String,
    explanation: String,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: i64,
        topic: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Question> {
        let text = text.into();
        let topic = topic.into();

        if text.trim().is_empty() {
            return Err(QuizError::DataFormat("question text is empty".to_owned()));
        }
        if topic.trim().is_empty() {
            return Err(QuizError::DataFormat(format!(
                "question \"{}\" has an empty topic",
                text
            )));
        }

        let option_count = options.len();
        let options = <[String; OPTION_COUNT]>::try_from(options).map_err(|_| {
            QuizError::DataFormat(format!(
                "question \"{}\" has {} options, expected {}",
                text, option_count, OPTION_COUNT
            ))
        })?;

        let correct_index = match usize::try_from(correct_index) {
            Ok(index) if index < OPTION_COUNT => index,
            _ => {
                return Err(QuizError::DataFormat(format!(
                    "question \"{}\" has correct_index {}, expected 0 to {}",
                    text,
                    correct_index,
                    OPTION_COUNT - 1
                )))
            }
        };

        Ok(Question {
            text,
            options,
            correct_index,
            topic,
            explanation: explanation.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_correct(&self, answer_index: usize) -> bool {
        answer_index == self.correct_index
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuizError;

    fn try_from(raw: RawQuestion) -> Result<Self> {
        Question::new(
            raw.text,
            raw.options,
            raw.correct_index,
            raw.topic,
            raw.explanation,
        )
    }
}
