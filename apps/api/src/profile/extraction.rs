//! Resume upload → Profile. One PDF text pass, one model call, one overwrite.

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::profile::prompts::build_resume_extraction_prompt;
use crate::profile::{Profile, ProfileError, ProfileStore};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read text from the uploaded PDF: {0}")]
    Pdf(String),

    #[error("the uploaded resume contains no extractable text")]
    EmptyResume,

    #[error("failed to generate user information from the resume: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] ProfileError),
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Builds a profile from resume text via the model and overwrites the stored profile.
///
/// Returns the stored profile and the length of the text the model saw.
pub async fn import_resume_text(
    resume_text: &str,
    llm: &dyn LanguageModel,
    store: &ProfileStore,
) -> Result<(Profile, usize), ExtractionError> {
    if resume_text.trim().is_empty() {
        return Err(ExtractionError::EmptyResume);
    }

    let prompt = build_resume_extraction_prompt(resume_text);
    let profile: Profile = complete_json(llm, &prompt).await.map_err(|e| {
        warn!("Resume extraction failed: {}", e);
        e
    })?;

    store.save(&profile).await?;
    info!(
        "Profile replaced from resume ({} characters of text)",
        resume_text.len()
    );

    Ok((profile, resume_text.len()))
}
