//! Cover-letter generation from the most recently analyzed job.

pub mod generator;
pub mod handlers;
pub mod hints;
pub mod metadata;
pub mod prompts;

use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::profile::ProfileError;
use crate::render::RenderError;

pub use generator::generate_cover_letter;

/// Outcome of a failed generation. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum CoverLetterError {
    #[error("❌ Profile not found. Please upload a resume first.")]
    ProfileMissing,

    #[error("❌ Could not read the stored profile: {0}")]
    Profile(#[from] ProfileError),

    #[error("❌ No job has been analyzed yet. Please analyze a job first.")]
    NoAnalyzedJob,

    #[error("Error from the language model: {0}")]
    Llm(#[from] LlmError),

    #[error("❌ Could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("❌ Could not render the cover letter: {0}")]
    Render(#[from] RenderError),

    #[error("❌ Cover letter rendering was interrupted: {0}")]
    RenderTask(String),
}
