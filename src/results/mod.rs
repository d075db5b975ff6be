use chrono::{Local, NaiveDate};
use log::{info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{QuizError, Result};


pub const HEADERS: [&str; 5] = ["name", "date", "topic", "score", "total"];

/// One finished quiz, as stored in the results file.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResultEntry {
    pub name: String,
    pub date: NaiveDate,
    pub topic: String,
    pub score: u32,
    pub total: u32,
}

/// Append-only CSV log of finished quizzes.
#[derive(Debug)]
pub struct ResultLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ResultLog {
    /// Binds the log to `path`, creating the file and its header row if needed.
    pub fn open(path: &Path) -> Result<ResultLog> {
        let log = ResultLog {
            path: path.to_owned(),
            write_lock: Mutex::new(()),
        };
        if !path.exists() {
            log.create().map_err(|e| log.write_error(e))?;
            info!("Created results file at {}", path.display());
        }
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create(&self) -> csv::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_writer(File::create(&self.path)?);
        writer.write_record(&HEADERS)?;
        writer.flush()?;
        Ok(())
    }

    pub fn append(&self, name: &str, topic: &str, score: u32, total: u32) -> Result<ResultEntry> {
        let entry = ResultEntry {
            name: name.to_owned(),
            date: Local::now().date_naive(),
            topic: topic.to_owned(),
            score,
            total,
        };
        self.append_entry(&entry)?;
        Ok(entry)
    }

    pub fn append_entry(&self, entry: &ResultEntry) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.write_entry(entry).map_err(|e| self.write_error(e))?;
        info!(
            "Recorded {}/{} on {} for {}",
            entry.score, entry.total, entry.topic, entry.name
        );
        Ok(())
    }

    fn write_entry(&self, entry: &ResultEntry) -> csv::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(&HEADERS)?;
        }
        writer.serialize(entry)?;
        writer.flush()?;
        Ok(())
    }

    /// Every recorded entry, oldest first. Any row that does not parse as
    /// an entry fails the whole read with `StorageRead`.
    pub fn load_all(&self) -> Result<Vec<ResultEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let read = || -> csv::Result<Vec<ResultEntry>> {
            let mut reader = csv::Reader::from_path(&self.path)?;
            reader.deserialize::<ResultEntry>().collect()
        };
        read().map_err(|e| self.read_error(e))
    }

    /// Like `load_all`, but never fails: rows that do not parse are logged
    /// and skipped, and unreadable history is logged and treated as empty.
    pub fn load_all_or_empty(&self) -> Vec<ResultEntry> {
        if !self.path.exists() {
            return Vec::new();
        }

        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(e) => {
                log_read_error(&self.read_error(e));
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for (position, row) in reader.deserialize::<ResultEntry>().enumerate() {
            match row {
                Ok(entry) => entries.push(entry),
                Err(e) if e.is_io_error() => {
                    log_read_error(&self.read_error(e));
                    break;
                }
                Err(e) => warn!(
                    "Skipping result #{} in {}: {}",
                    position + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        entries
    }

    fn read_error(&self, source: csv::Error) -> QuizError {
        QuizError::StorageRead {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: csv::Error) -> QuizError {
        QuizError::StorageWrite {
            path: self.path.clone(),
            source,
        }
    }
}

fn log_read_error(e: &QuizError) {
    match e.source() {
        Some(cause) => warn!("{}: {}", e, cause),
        None => warn!("{}", e),
    }
}
