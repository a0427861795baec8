//! Generate-cover-letter pipeline.
//!
//! Flow: check profile → check session → derive hints → one model call →
//!       parse metadata line → render document → record it in the session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cover_letter::hints::{company_from_url, extract_position_title};
use crate::cover_letter::metadata::CoverLetterDraft;
use crate::cover_letter::prompts::{build_cover_letter_prompt, CoverLetterContext};
use crate::cover_letter::CoverLetterError;
use crate::llm_client::LanguageModel;
use crate::profile::ProfileStore;
use crate::render::DocumentRenderer;
use crate::session::SessionState;

/// Date format used in the letter's date line.
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// A rendered cover letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLetter {
    pub path: PathBuf,
    /// Letter text as rendered, without the metadata line.
    pub body: String,
}

impl CoverLetter {
    /// Success message shown to the user.
    pub fn message(&self) -> String {
        format!(
            "✅ Cover letter saved as PDF: {}\n\n{}",
            self.path.display(),
            self.body
        )
    }
}

/// Drafts a cover letter for the session's analyzed job and renders it into `output_dir`.
///
/// Fails before any model call when the profile is missing or no job has been
/// analyzed, checked in that order. The profile is only parsed once both hold, so
/// an unreadable profile never masks a missing analysis. An existing file with
/// the same name is overwritten.
pub async fn generate_cover_letter(
    profiles: &ProfileStore,
    llm: &dyn LanguageModel,
    renderer: Arc<dyn DocumentRenderer>,
    output_dir: &Path,
    session: &mut SessionState,
    today: NaiveDate,
) -> Result<CoverLetter, CoverLetterError> {
    if !profiles.exists().await {
        return Err(CoverLetterError::ProfileMissing);
    }
    let job = session
        .analyzed_job()
        .cloned()
        .ok_or(CoverLetterError::NoAnalyzedJob)?;
    let profile = profiles
        .load()
        .await?
        .ok_or(CoverLetterError::ProfileMissing)?;

    let likely_company = company_from_url(&job.job_url);
    let likely_position = extract_position_title(&job.job_text);
    let today = today.format(DATE_FORMAT).to_string();

    let prompt = build_cover_letter_prompt(&CoverLetterContext {
        profile: &profile,
        job: &job,
        today: &today,
        likely_company: &likely_company,
        likely_position: &likely_position,
    });
    let raw = llm.complete(&prompt).await.map_err(|e| {
        warn!("Cover letter model call failed: {}", e);
        e
    })?;

    let draft = CoverLetterDraft::parse(&raw);
    if draft.name.is_none() {
        warn!("Draft has no usable metadata line, using the generic file name");
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| CoverLetterError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
    let path = output_dir.join(draft.file_name(renderer.extension()));

    let render_path = path.clone();
    let body = draft.body;
    let render_body = body.clone();
    tokio::task::spawn_blocking(move || renderer.render_to_file(&render_body, &render_path))
        .await
        .map_err(|e| CoverLetterError::RenderTask(e.to_string()))??;

    session.record_document(path.clone());
    info!("Cover letter written to {}", path.display());

    Ok(CoverLetter { path, body })
}
