use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use std::env;
use std::io::{self, BufRead, Write};

use macro_quiz::{QuestionBank, QuizError, QuizSession, ResultLog, Settings};

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Returns `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_owned()))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    match env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(LevelFilter::Warn),
    };
    builder.init();
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Settings::from_env()?;
    let bank = QuestionBank::open(&settings.questions_path)
        .context("Could not load the question bank")?;
    if bank.is_empty() {
        return Err(anyhow!(
            "No questions found in {}",
            settings.questions_path.display()
        ));
    }

    let result_log = match ResultLog::open(&settings.results_path) {
        Ok(log) => Some(log),
        Err(e) => {
            eprintln!("{:#}", anyhow::Error::new(e));
            eprintln!("Results will not be saved during this run.");
            None
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console {
        input: stdin.lock(),
        output: stdout.lock(),
    };

    console.say("Macroeconomic knowledge quiz")?;
    loop {
        let session = match start_session(&mut console, &bank, settings.question_count)? {
            Some(session) => session,
            None => return Ok(()),
        };
        let session = match play(&mut console, session)? {
            Some(session) => session,
            None => return Ok(()),
        };

        let summary = session.summary()?;
        console.say(&format!("\nQuiz complete! {}", summary))?;
        console.say(summary.rating.message())?;

        if let Some(result_log) = &result_log {
            if let Err(e) = session.record(result_log) {
                console.say(&format!("{:#}", anyhow::Error::new(e)))?;
            }
            show_history(&mut console, result_log)?;
        }

        match console.ask("\nTake another quiz? [y/N] ")? {
            Some(reply) if reply.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

fn start_session<'a, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: &'a QuestionBank,
    count: usize,
) -> Result<Option<QuizSession<'a>>> {
    let topics = bank.topics();
    loop {
        let name = match console.ask("\nYour name: ")? {
            Some(name) => name,
            None => return Ok(None),
        };

        console.say("Topics:")?;
        for (i, topic) in topics.iter().enumerate() {
            console.say(&format!("  {}. {}", i + 1, topic))?;
        }
        let choice = match console.ask("Select topic: ")? {
            Some(choice) => choice,
            None => return Ok(None),
        };
        let topic = match choice.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= topics.len() => topics[n - 1].clone(),
            _ => choice,
        };

        match QuizSession::start(&name, &topic, bank, count) {
            Ok(session) => return Ok(Some(session)),
            Err(e @ QuizError::Validation(_)) | Err(e @ QuizError::InsufficientQuestions { .. }) => {
                console.say(&e.to_string())?
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn play<'a, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    mut session: QuizSession<'a>,
) -> Result<Option<QuizSession<'a>>> {
    while !session.is_complete() {
        let question = session.current_question()?;
        console.say(&format!(
            "\nQuestion {} of {}  |  Topic: {}",
            session.current_index() + 1,
            session.total(),
            question.topic()
        ))?;
        console.say(question.text())?;
        for (i, option) in question.options().iter().enumerate() {
            console.say(&format!("  {}. {}", i + 1, option))?;
        }

        let answer = loop {
            let reply = match console.ask("Your answer: ")? {
                Some(reply) => reply,
                None => return Ok(None),
            };
            match reply.trim().parse::<usize>() {
                Ok(n) if n >= 1 && n <= question.options().len() => break n - 1,
                _ => console.say("Please select an answer first.")?,
            }
        };

        let submission = session.submit_answer(answer)?;
        if submission.is_correct {
            console.say("Correct!")?;
        } else {
            console.say(&format!(
                "Incorrect. The correct answer was: {}",
                submission.correct_option
            ))?;
        }
        if !submission.explanation.is_empty() {
            console.say(submission.explanation)?;
        }

        session.advance()?;
    }
    Ok(Some(session))
}

fn show_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result_log: &ResultLog,
) -> Result<()> {
    let entries = result_log.load_all_or_empty();
    console.say("\nAll quiz results")?;
    if entries.is_empty() {
        return console.say("No results yet.");
    }
    for entry in entries {
        console.say(&format!(
            "{}  |  {}  |  {}  |  {}/{}",
            entry.date, entry.name, entry.topic, entry.score, entry.total
        ))?;
    }
    Ok(())
}
