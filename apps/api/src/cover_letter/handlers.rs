use std::path::PathBuf;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::cover_letter::generate_cover_letter;
use crate::errors::AppError;
use crate::state::AppState;

const NO_DOCUMENT: &str = "Cover letter PDF not found. Please generate a cover letter first.";

#[derive(Debug, Serialize)]
pub struct GenerateCoverLetterResponse {
    pub result: String,
    pub success: bool,
}

/// POST /api/generate-cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
) -> Json<GenerateCoverLetterResponse> {
    let today = chrono::Local::now().date_naive();

    let mut session = state.session.lock().await;
    let outcome = generate_cover_letter(
        &state.profiles,
        &state.gateway,
        state.renderer.clone(),
        &state.config.cover_letters_dir,
        &mut session,
        today,
    )
    .await;

    Json(match outcome {
        Ok(letter) => GenerateCoverLetterResponse {
            result: letter.message(),
            success: true,
        },
        Err(e) => {
            warn!("Cover letter generation failed: {}", e);
            GenerateCoverLetterResponse {
                result: e.to_string(),
                success: false,
            }
        }
    })
}

/// GET /api/download-cover-letter
pub async fn handle_download_cover_letter(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let path: Option<PathBuf> = state
        .session
        .lock()
        .await
        .last_document()
        .map(|p| p.to_path_buf());
    let path = path.ok_or_else(|| AppError::NotFound(NO_DOCUMENT.to_string()))?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(NO_DOCUMENT.to_string()))
        }
        Err(e) => {
            return Err(AppError::Internal(
                anyhow::Error::new(e).context(format!("reading {}", path.display())),
            ))
        }
    };

    let file_name = path
        .file_name()
        .map(|n| header_safe(&n.to_string_lossy()))
        .unwrap_or_else(|| "cover_letter.pdf".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Restricts a file name to characters allowed inside a quoted header parameter.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
