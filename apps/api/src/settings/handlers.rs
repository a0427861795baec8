use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::settings::Settings;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApiKeyPayload {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Masked; only the last four characters are visible.
    pub api_key: String,
    pub api_key_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyConfiguredResponse {
    pub api_key_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyValidResponse {
    pub valid: bool,
}

/// GET /api/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = state.settings.load().await?;
    Ok(Json(SettingsResponse {
        api_key: settings.masked_api_key(),
        api_key_configured: settings.is_configured(),
    }))
}

/// POST /api/settings
/// Persists the key, then points the gateway at a client built with it.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Json(payload): Json<ApiKeyPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let api_key = payload.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::Validation("api_key must not be empty".to_string()));
    }

    let client = state
        .llm_client_for(api_key)
        .map_err(|e| AppError::Internal(e.into()))?;

    state
        .settings
        .save(&Settings {
            api_key: api_key.to_string(),
        })
        .await?;
    state.gateway.replace(Arc::new(client));
    info!("API key updated");

    Ok(Json(MessageResponse {
        message: "Settings updated successfully.".to_string(),
    }))
}

/// GET /api/check-api-key
pub async fn handle_check_api_key(
    State(state): State<AppState>,
) -> Result<Json<ApiKeyConfiguredResponse>, AppError> {
    let settings = state.settings.load().await?;
    Ok(Json(ApiKeyConfiguredResponse {
        api_key_configured: settings.is_configured(),
    }))
}

/// POST /api/verify-api-key
/// Any failure to reach the model service counts as an invalid key.
pub async fn handle_verify_api_key(
    State(state): State<AppState>,
    Json(payload): Json<ApiKeyPayload>,
) -> Json<ApiKeyValidResponse> {
    let valid = match state.llm_client_for(payload.api_key.trim()) {
        Ok(client) => client.verify_api_key().await.unwrap_or_else(|e| {
            warn!("API key verification failed: {}", e);
            false
        }),
        Err(e) => {
            warn!("Could not build client for verification: {}", e);
            false
        }
    };
    Json(ApiKeyValidResponse { valid })
}
