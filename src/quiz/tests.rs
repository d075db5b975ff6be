use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use super::*;

struct BankBuilder {
    questions: Vec<Question>,
}

impl BankBuilder {
    fn new() -> Self {
        BankBuilder {
            questions: Vec::new(),
        }
    }

    fn topic(mut self, topic: &str, count: usize) -> Self {
        for i in 0..count {
            let question = Question::new(
                format!("{} question {}", topic, i),
                vec!["A".to_owned(), "B".to_owned(), "C".to_owned(), "D".to_owned()],
                (i % OPTION_COUNT) as i64,
                topic.to_owned(),
                format!("Explanation {}", i),
            )
            .unwrap();
            self.questions.push(question);
        }
        self
    }

    fn build(self) -> QuestionBank {
        QuestionBank::from_questions(self.questions)
    }
}

fn default_bank() -> QuestionBank {
    BankBuilder::new()
        .topic("GDP", 6)
        .topic("Real vs Nominal", 5)
        .build()
}

fn answer_all(session: &mut QuizSession, correct_answers: usize) {
    let mut remaining_correct = correct_answers;
    while !session.is_complete() {
        let question = session.current_question().unwrap();
        let answer = if remaining_correct > 0 {
            remaining_correct -= 1;
            question.correct_index()
        } else {
            (question.correct_index() + 1) % OPTION_COUNT
        };
        session.submit_answer(answer).unwrap();
        session.advance().unwrap();
    }
}

#[test]
fn starts_in_progress() {
    let bank = default_bank();
    let session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    assert_eq!(session.state(), SessionState::InProgress);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.total(), 5);
    assert!(session.last_submission().is_none());
}

#[test]
fn selected_questions_match_topic() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "Real vs Nominal", &bank, 5).unwrap();
    while !session.is_complete() {
        assert_eq!(session.current_question().unwrap().topic(), "Real vs Nominal");
        session.advance().unwrap();
    }
}

#[test]
fn stores_trimmed_name() {
    let bank = default_bank();
    let session = QuizSession::start("  Jane Doe ", "GDP", &bank, 1).unwrap();
    assert_eq!(session.participant_name(), "Jane Doe");
    assert_eq!(session.topic(), "GDP");
}

#[test]
fn rejects_invalid_name() {
    let bank = default_bank();
    match QuizSession::start("   ", "GDP", &bank, 5) {
        Err(QuizError::Validation(ValidationFailure::InvalidName)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn rejects_unknown_topic() {
    let bank = default_bank();
    match QuizSession::start("Jane Doe", "Unknown", &bank, 5) {
        Err(QuizError::Validation(ValidationFailure::UnknownTopic(topic))) => {
            assert_eq!(topic, "Unknown")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn reports_insufficient_questions() {
    let bank = default_bank();
    match QuizSession::start("Jane Doe", "Real vs Nominal", &bank, 6) {
        Err(QuizError::InsufficientQuestions {
            requested,
            available,
            ..
        }) => {
            assert_eq!(requested, 6);
            assert_eq!(available, 5);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn correct_answer_increments_score() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    let question = session.current_question().unwrap();

    let submission = session.submit_answer(question.correct_index()).unwrap();
    assert!(submission.is_correct);
    assert_eq!(submission.correct_option, question.correct_option());
    assert_eq!(submission.explanation, question.explanation());
    assert_eq!(session.score(), 1);
    assert_eq!(session.current_index(), 0);
}

#[test]
fn wrong_answer_leaves_score_unchanged() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    let question = session.current_question().unwrap();
    let wrong = (question.correct_index() + 1) % OPTION_COUNT;

    let submission = session.submit_answer(wrong).unwrap();
    assert!(!submission.is_correct);
    assert_eq!(submission.correct_option, question.correct_option());
    assert_eq!(session.score(), 0);
}

#[test]
fn out_of_range_answer_is_incorrect() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    assert!(!session.submit_answer(17).unwrap().is_correct);
    assert_eq!(session.score(), 0);
}

#[test]
fn cannot_answer_twice() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    let correct = session.current_question().unwrap().correct_index();
    session.submit_answer(correct).unwrap();
    assert!(matches!(
        session.submit_answer(correct),
        Err(QuizError::AlreadyAnswered)
    ));
    assert_eq!(session.score(), 1);
    assert_eq!(session.answers().len(), 1);
}

#[test]
fn advance_clears_last_submission() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    session.submit_answer(0).unwrap();
    assert!(session.last_submission().is_some());
    session.advance().unwrap();
    assert!(session.last_submission().is_none());
    assert_eq!(session.current_index(), 1);
    assert!(session.submit_answer(0).is_ok());
}

#[test]
fn completes_after_advancing_through_every_question() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    for _ in 0..4 {
        session.advance().unwrap();
        assert!(!session.is_complete());
    }
    session.advance().unwrap();
    assert!(session.is_complete());
    assert_eq!(session.state(), SessionState::Completed);
}

#[test]
fn completed_session_rejects_further_play() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 2).unwrap();
    answer_all(&mut session, 2);
    assert!(matches!(
        session.current_question(),
        Err(QuizError::SessionCompleted)
    ));
    assert!(matches!(
        session.submit_answer(0),
        Err(QuizError::SessionCompleted)
    ));
    assert!(matches!(session.advance(), Err(QuizError::SessionCompleted)));
    assert_eq!(session.score(), 2);
}

#[test]
fn summary_requires_completion() {
    let bank = default_bank();
    let session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    assert!(matches!(
        session.summary(),
        Err(QuizError::SessionInProgress)
    ));
}

#[test]
fn summary_ratings() {
    let bank = default_bank();
    let cases = [
        (5, 100, Rating::Excellent),
        (4, 80, Rating::Excellent),
        (3, 60, Rating::Good),
        (2, 40, Rating::NeedsPractice),
        (0, 0, Rating::NeedsPractice),
    ];
    for (correct, percentage, rating) in cases.iter() {
        let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
        answer_all(&mut session, *correct);
        let summary = session.summary().unwrap();
        assert_eq!(summary.score, *correct as u32);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.percentage, *percentage);
        assert_eq!(summary.rating, *rating);
    }
}

#[test]
fn summary_rounds_percentage() {
    assert_eq!(Summary::new(2, 3).percentage, 67);
    assert_eq!(Summary::new(1, 3).percentage, 33);
    assert_eq!(Summary::new(1, 3).rating, Rating::NeedsPractice);
}

#[test]
fn summary_rounds_ties_to_even() {
    assert_eq!(Summary::new(5, 8).percentage, 62);
    assert_eq!(Summary::new(1, 8).percentage, 12);
    assert_eq!(Summary::new(3, 8).percentage, 38);
    assert_eq!(Summary::new(7, 8).percentage, 88);
    assert_eq!(Summary::new(1, 40).percentage, 2);
    assert_eq!(Summary::new(5, 8).rating, Rating::Good);
}

#[test]
fn rating_labels() {
    assert_eq!(Rating::from_percentage(80).to_string(), "excellent");
    assert_eq!(Rating::from_percentage(79).to_string(), "good");
    assert_eq!(Rating::from_percentage(59).to_string(), "needs practice");
    assert_eq!(Summary::new(4, 5).to_string(), "You scored 4 out of 5 (80%)");
}

#[test]
fn empty_selection_is_already_complete() {
    let bank = default_bank();
    let session = QuizSession::start("Jane Doe", "GDP", &bank, 0).unwrap();
    assert!(session.is_complete());
    let summary = session.summary().unwrap();
    assert_eq!((summary.score, summary.total, summary.percentage), (0, 0, 0));
}

#[test]
fn missed_lists_wrong_answers() {
    let bank = default_bank();
    let mut session = QuizSession::start("Jane Doe", "GDP", &bank, 5).unwrap();
    answer_all(&mut session, 3);
    let missed: Vec<&Answer> = session.missed().collect();
    assert_eq!(missed.len(), 2);
    assert!(missed
        .iter()
        .all(|a| a.chosen != a.question.correct_index() && !a.is_correct));
}

#[test]
fn seeded_sessions_select_same_questions() {
    let bank = default_bank();
    let first =
        QuizSession::start_with(&mut StdRng::seed_from_u64(3), "Jane", "GDP", &bank, 3).unwrap();
    let second =
        QuizSession::start_with(&mut StdRng::seed_from_u64(3), "Jane", "GDP", &bank, 3).unwrap();
    assert_eq!(
        first.current_question().unwrap(),
        second.current_question().unwrap()
    );
}

#[test]
fn records_completed_session() {
    let dir = TempDir::new().unwrap();
    let log = ResultLog::open(&dir.path().join("results.csv")).unwrap();
    let bank = default_bank();
    let mut session = QuizSession::start("Jen", "GDP", &bank, 5).unwrap();

    assert!(matches!(
        session.record(&log),
        Err(QuizError::SessionInProgress)
    ));
    answer_all(&mut session, 4);
    let entry = session.record(&log).unwrap();

    assert_eq!(entry.name, "Jen");
    assert_eq!(entry.topic, "GDP");
    assert_eq!((entry.score, entry.total), (4, 5));
    assert_eq!(log.load_all().unwrap(), vec![entry]);
}
