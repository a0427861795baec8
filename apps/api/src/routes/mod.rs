pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::analysis::handlers as analysis;
use crate::cover_letter::handlers as cover_letter;
use crate::profile::handlers as profile;
use crate::settings::handlers as settings;
use crate::state::AppState;

/// Resume PDFs regularly exceed axum's 2 MB default.
const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pipeline
        .route("/api/analyze-job", post(analysis::handle_analyze_job))
        .route(
            "/api/generate-cover-letter",
            post(cover_letter::handle_generate_cover_letter),
        )
        .route(
            "/api/download-cover-letter",
            get(cover_letter::handle_download_cover_letter),
        )
        // Profile
        .route(
            "/api/upload-resume",
            post(profile::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_RESUME_BYTES)),
        )
        .route(
            "/api/user-profile",
            get(profile::handle_get_profile).post(profile::handle_update_profile),
        )
        // Settings
        .route(
            "/api/settings",
            get(settings::handle_get_settings).post(settings::handle_update_settings),
        )
        .route("/api/check-api-key", get(settings::handle_check_api_key))
        .route("/api/verify-api-key", post(settings::handle_verify_api_key))
        .with_state(state)
}

/// CORS for the configured browser origins. Unparseable origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
