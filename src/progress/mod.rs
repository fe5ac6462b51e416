// src/progress/mod.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::{
    fmt,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

/// Timestamp layout of the progress log, e.g. `2023-Sep-02-18:53:26`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Points in a run at which progress is announced, in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preliminaries,
    Extract,
    Transform,
    LoadCsv,
    Connect,
    LoadDb,
    Query,
    Close,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Preliminaries,
        Stage::Extract,
        Stage::Transform,
        Stage::LoadCsv,
        Stage::Connect,
        Stage::LoadDb,
        Stage::Query,
        Stage::Close,
    ];

    /// Line written to the progress log once the stage has finished.
    pub fn message(self) -> &'static str {
        match self {
            Stage::Preliminaries => "Preliminaries complete. Initiating ETL process",
            Stage::Extract => "Data extraction complete. Initiating Transformation process",
            Stage::Transform => "Data transformation complete. Initiating Loading process",
            Stage::LoadCsv => "Data saved to CSV file",
            Stage::Connect => "SQL Connection initiated",
            Stage::LoadDb => "Data loaded to Database as a table, Executing queries",
            Stage::Query => "Process Complete",
            Stage::Close => "Server Connection closed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives stage transitions from the pipeline.
pub trait ProgressSink {
    fn log_progress(&self, message: &str) -> Result<()>;

    fn stage_complete(&self, stage: Stage) -> Result<()> {
        info!(?stage, "{}", stage);
        self.log_progress(stage.message())
    }
}

/// Appends `<timestamp>: <message>` lines to a text file.
///
/// The file is opened and closed on every call.
#[derive(Debug, Clone)]
pub struct FileProgressLog {
    path: PathBuf,
}

impl FileProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressSink for FileProgressLog {
    fn log_progress(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening progress log {:?}", self.path))?;
        writeln!(file, "{}", format_line(Local::now(), message))
            .with_context(|| format!("writing progress log {:?}", self.path))?;
        Ok(())
    }
}

pub fn format_line(at: DateTime<Local>, message: &str) -> String {
    format!("{}: {}", at.format(TIMESTAMP_FORMAT), message)
}
