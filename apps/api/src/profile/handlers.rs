use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::profile::extraction::{extract_pdf_text, import_resume_text, ExtractionError};
use crate::profile::{Profile, ProfileUpdate};
use crate::state::AppState;

/// Multipart field carrying the resume PDF.
const RESUME_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub updated_data: Profile,
}

/// POST /api/upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some(RESUME_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("could not read upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }
    let bytes = upload.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{RESUME_FIELD}' is required"))
    })?;
    info!("Resume upload received ({} bytes)", bytes.len());

    let outcome = match tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
    {
        Ok(text) => import_resume_text(&text, &state.gateway, &state.profiles).await,
        Err(e) => Err(e),
    };

    let response = match outcome {
        Ok((_, text_len)) => UploadResumeResponse {
            message: format!(
                "Resume processed and user info updated. Extracted text length: {text_len}"
            ),
            success: true,
        },
        Err(ExtractionError::Store(e)) => return Err(e.into()),
        Err(e @ ExtractionError::Llm(_)) => {
            warn!("Resume import failed: {}", e);
            UploadResumeResponse {
                message: "❌ Failed to generate user information from the resume.".to_string(),
                success: false,
            }
        }
        Err(e) => {
            warn!("Resume import failed: {}", e);
            UploadResumeResponse {
                message: format!("❌ {e}"),
                success: false,
            }
        }
    };
    Ok(Json(response))
}

/// GET /api/user-profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    state.profiles.load().await?.map(Json).ok_or_else(|| {
        AppError::NotFound("User profile not found. Please upload a resume first.".to_string())
    })
}

/// POST /api/user-profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    let updated = state.profiles.merge(update).await?;
    Ok(Json(UpdateProfileResponse {
        message: "User profile updated successfully.".to_string(),
        updated_data: updated,
    }))
}
