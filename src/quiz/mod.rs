use log::debug;
use rand::Rng;

use self::definition::*;
use crate::error::{QuizError, Result, ValidationFailure};
use crate::results::{ResultEntry, ResultLog};
use crate::validate::{validate_name, validate_topic};

pub mod definition;
mod summary;

pub use self::summary::{Rating, Summary};

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    InProgress,
    Completed,
}

/// Feedback for the answer given to the current question.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Submission<'a> {
    pub is_correct: bool,
    pub correct_option: &'a str,
    pub explanation: &'a str,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Answer<'a> {
    pub question: &'a Question,
    pub chosen: usize,
    pub is_correct: bool,
}

/// One participant's run through a fixed selection of questions.
#[derive(Debug)]
pub struct QuizSession<'a> {
    participant_name: String,
    topic: String,
    questions: Vec<&'a Question>,
    current_index: usize,
    score: u32,
    state: SessionState,
    last_submission: Option<Submission<'a>>,
    answers: Vec<Answer<'a>>,
}

impl<'a> QuizSession<'a> {
    pub fn start(
        name: &str,
        topic: &str,
        bank: &'a QuestionBank,
        count: usize,
    ) -> Result<QuizSession<'a>> {
        QuizSession::start_with(&mut rand::thread_rng(), name, topic, bank, count)
    }

    pub fn start_with<R: Rng + ?Sized>(
        rng: &mut R,
        name: &str,
        topic: &str,
        bank: &'a QuestionBank,
        count: usize,
    ) -> Result<QuizSession<'a>> {
        if !validate_name(name) {
            return Err(ValidationFailure::InvalidName.into());
        }
        if !validate_topic(topic, &bank.topics()) {
            return Err(ValidationFailure::UnknownTopic(topic.to_owned()).into());
        }

        let questions = bank.select_questions_with(rng, Some(topic), count)?;
        let state = if questions.is_empty() {
            SessionState::Completed
        } else {
            SessionState::InProgress
        };

        debug!(
            "Starting {} question quiz on {} for {}",
            questions.len(),
            topic,
            name.trim()
        );
        Ok(QuizSession {
            participant_name: name.trim().to_owned(),
            topic: topic.to_owned(),
            questions,
            current_index: 0,
            score: 0,
            state,
            last_submission: None,
            answers: Vec::new(),
        })
    }

    pub fn participant_name(&self) -> &str {
        &self.participant_name
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn last_submission(&self) -> Option<&Submission<'a>> {
        self.last_submission.as_ref()
    }

    pub fn answers(&self) -> &[Answer<'a>] {
        &self.answers
    }

    pub fn missed(&self) -> impl Iterator<Item = &Answer<'a>> + '_ {
        self.answers.iter().filter(|a| !a.is_correct)
    }

    pub fn current_question(&self) -> Result<&'a Question> {
        match self.state {
            SessionState::InProgress => Ok(self.questions[self.current_index]),
            SessionState::Completed => Err(QuizError::SessionCompleted),
        }
    }

    /// Checks an answer against the current question. Each question accepts
    /// a single submission; the session stays on the question until `advance`.
    pub fn submit_answer(&mut self, answer_index: usize) -> Result<Submission<'a>> {
        let question = self.current_question()?;
        if self.last_submission.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }

        let is_correct = question.is_correct(answer_index);
        if is_correct {
            self.score += 1;
        }

        let submission = Submission {
            is_correct,
            correct_option: question.correct_option(),
            explanation: question.explanation(),
        };
        self.last_submission = Some(submission);
        self.answers.push(Answer {
            question,
            chosen: answer_index,
            is_correct,
        });
        Ok(submission)
    }

    pub fn advance(&mut self) -> Result<()> {
        if self.is_complete() {
            return Err(QuizError::SessionCompleted);
        }

        self.current_index += 1;
        if self.current_index == self.questions.len() {
            debug!(
                "{} completed the {} quiz with {}/{}",
                self.participant_name,
                self.topic,
                self.score,
                self.questions.len()
            );
            self.state = SessionState::Completed;
        } else {
            self.last_submission = None;
        }
        Ok(())
    }

    pub fn summary(&self) -> Result<Summary> {
        match self.state {
            SessionState::Completed => Ok(Summary::new(self.score, self.questions.len() as u32)),
            SessionState::InProgress => Err(QuizError::SessionInProgress),
        }
    }

    /// Archives a completed session in the result log.
    pub fn record(&self, log: &ResultLog) -> Result<ResultEntry> {
        let summary = self.summary()?;
        log.append(
            &self.participant_name,
            &self.topic,
            summary.score,
            summary.total,
        )
    }
}
