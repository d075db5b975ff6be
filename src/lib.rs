pub mod error;
pub mod quiz;
pub mod results;
pub mod settings;
pub mod validate;

pub use crate::error::{QuizError, Result, ValidationFailure};
pub use crate::quiz::definition::{Question, QuestionBank};
pub use crate::quiz::{QuizSession, Rating, SessionState, Submission, Summary};
pub use crate::results::{ResultEntry, ResultLog};
pub use crate::settings::Settings;
