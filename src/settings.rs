use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::env;
use std::path::PathBuf;

pub const QUESTIONS_PATH_VAR: &str = "MACRO_QUIZ_QUESTIONS";
pub const RESULTS_PATH_VAR: &str = "MACRO_QUIZ_RESULTS";
pub const QUESTION_COUNT_VAR: &str = "MACRO_QUIZ_COUNT";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub questions_path: PathBuf,
    pub results_path: PathBuf,
    pub question_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            questions_path: PathBuf::from("questions.json"),
            results_path: default_results_path(),
            question_count: 5,
        }
    }
}

impl Settings {
    /// Default settings, overridden by any of the `MACRO_QUIZ_*` environment variables.
    pub fn from_env() -> Result<Settings> {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(path) = lookup(QUESTIONS_PATH_VAR) {
            settings.questions_path = path.into();
        }
        if let Some(path) = lookup(RESULTS_PATH_VAR) {
            settings.results_path = path.into();
        }
        if let Some(count) = lookup(QUESTION_COUNT_VAR) {
            settings.question_count = count
                .trim()
                .parse::<usize>()
                .with_context(|| {
                    format!(
                        "{} must be a whole number, got {:?}",
                        QUESTION_COUNT_VAR, count
                    )
                })?;
        }
        Ok(settings)
    }
}

fn default_results_path() -> PathBuf {
    match BaseDirs::new() {
        Some(dirs) => {
            let mut path = dirs.data_dir().to_path_buf();
            path.push("macro-quiz");
            path.push("results.csv");
            path
        }
        None => PathBuf::from("results.csv"),
    }
}
