use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Could not read questions file: {}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed question data: {0}")]
    DataFormat(String),

    #[error("Requested {requested} questions however, only {available} available for {}", topic_label(.topic))]
    InsufficientQuestions {
        topic: Option<String>,
        requested: usize,
        available: usize,
    },

    #[error("{0}")]
    Validation(ValidationFailure),

    #[error("Couldn't write result to {}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Couldn't read results from {}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("The quiz is already complete")]
    SessionCompleted,

    #[error("The quiz is not complete yet")]
    SessionInProgress,

    #[error("This question was already answered")]
    AlreadyAnswered,
}

fn topic_label(topic: &Option<String>) -> String {
    match topic {
        Some(topic) => format!("topic {}", topic),
        None => "all topics".to_owned(),
    }
}

/// Reasons a quiz could not be started from user input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationFailure {
    InvalidName,
    UnknownTopic(String),
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::InvalidName => {
                write!(f, "Please enter a valid name (1-60 characters).")
            }
            ValidationFailure::UnknownTopic(topic) => {
                write!(f, "Unknown topic: {}", topic)
            }
        }
    }
}

impl From<ValidationFailure> for QuizError {
    fn from(failure: ValidationFailure) -> Self {
        QuizError::Validation(failure)
    }
}
