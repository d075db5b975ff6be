use itertools::Itertools;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::error::{QuizError, Result};

pub mod question;

pub use question::{Question, RawCsvQuestion, RawQuestion, OPTION_COUNT};


/// Every question known to the application. Read-only once loaded.
#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Loads a bank from a `.json` or `.csv` question file.
    pub fn open(source: &Path) -> Result<QuestionBank> {
        let file = File::open(source).map_err(|e| unreadable(source, e))?;

        let is_csv = source
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
        let raw_questions = if is_csv {
            read_csv(source, file)?
        } else {
            read_json(source, file)?
        };

        let mut questions = Vec::with_capacity(raw_questions.len());
        for (position, raw_question) in raw_questions.into_iter().enumerate() {
            let question = Question::try_from(raw_question).map_err(|e| match e {
                QuizError::DataFormat(reason) => {
                    QuizError::DataFormat(format!("question #{}: {}", position + 1, reason))
                }
                e => e,
            })?;
            questions.push(question);
        }

        let bank = QuestionBank::from_questions(questions);
        info!(
            "Loaded {} questions across {} topics from {}",
            bank.len(),
            bank.topics().len(),
            source.display()
        );
        Ok(bank)
    }

    pub fn from_questions(questions: Vec<Question>) -> QuestionBank {
        QuestionBank { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn topics(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.topic())
            .unique()
            .sorted()
            .map(str::to_owned)
            .collect()
    }

    pub fn select_questions(&self, topic: Option<&str>, count: usize) -> Result<Vec<&Question>> {
        self.select_questions_with(&mut rand::thread_rng(), topic, count)
    }

    /// Picks `count` distinct questions uniformly at random from the pool
    /// matching `topic`, or from every question when no topic is given.
    pub fn select_questions_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        topic: Option<&str>,
        count: usize,
    ) -> Result<Vec<&Question>> {
        let pool: Vec<&Question> = match topic {
            Some(topic) => self.questions.iter().filter(|q| q.topic() == topic).collect(),
            None => self.questions.iter().collect(),
        };

        if count > pool.len() {
            return Err(QuizError::InsufficientQuestions {
                topic: topic.map(str::to_owned),
                requested: count,
                available: pool.len(),
            });
        }

        debug!(
            "Selecting {} of {} questions (topic: {:?})",
            count,
            pool.len(),
            topic
        );
        Ok(pool.choose_multiple(rng, count).copied().collect())
    }
}

fn unreadable(source: &Path, e: io::Error) -> QuizError {
    QuizError::SourceNotFound {
        path: source.to_owned(),
        source: e,
    }
}

fn read_json(source: &Path, file: File) -> Result<Vec<RawQuestion>> {
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            unreadable(source, e.into())
        } else {
            QuizError::DataFormat(format!("invalid JSON question source: {}", e))
        }
    })
}

fn read_csv(source: &Path, file: File) -> Result<Vec<RawQuestion>> {
    let mut csv_reader = csv::Reader::from_reader(file);
    let mut raw_questions = Vec::new();
    for (position, question) in csv_reader.deserialize().enumerate() {
        let raw_question: RawCsvQuestion = question.map_err(|e| {
            if e.is_io_error() {
                unreadable(source, e.into())
            } else {
                QuizError::DataFormat(format!("question #{}: {}", position + 1, e))
            }
        })?;
        raw_questions.push(raw_question.into());
    }
    Ok(raw_questions)
}
