//! Session context linking a job analysis to a later cover-letter generation.
//!
//! The pipeline never owns this state: callers pass `&mut SessionState` into
//! `analyze_job` / `generate_cover_letter`. The HTTP layer keeps one instance
//! behind a mutex in `AppState`.

use std::path::{Path, PathBuf};

/// The most recently analyzed job. All three parts are present together or the
/// whole record is absent, so a failed fetch can never leave stale text paired
/// with a new URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedJob {
    pub job_text: String,
    pub company_text: String,
    pub job_url: String,
}

#[derive(Debug, Default)]
pub struct SessionState {
    analyzed_job: Option<AnalyzedJob>,
    last_document: Option<PathBuf>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyzed_job(&self) -> Option<&AnalyzedJob> {
        self.analyzed_job.as_ref()
    }

    /// Replaces the analyzed job wholesale.
    pub fn record_analysis(&mut self, job: AnalyzedJob) {
        self.analyzed_job = Some(job);
    }

    /// Clears the analyzed job after a failed acquisition.
    pub fn reset_analysis(&mut self) {
        self.analyzed_job = None;
    }

    pub fn last_document(&self) -> Option<&Path> {
        self.last_document.as_deref()
    }

    pub fn record_document(&mut self, path: PathBuf) {
        self.last_document = Some(path);
    }
}
