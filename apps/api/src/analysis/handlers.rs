use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::{analyze_job, extract_section, AnalysisSection};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJobResponse {
    /// Raw tagged analysis on success, the user-facing failure message otherwise.
    pub analysis: String,
    pub success: bool,
    /// Answers found between their markers, keyed by tag. Empty on failure.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<&'static str, String>,
}

fn collect_sections(analysis: &str) -> BTreeMap<&'static str, String> {
    AnalysisSection::ALL
        .iter()
        .filter_map(|&section| {
            extract_section(analysis, section).map(|answer| (section.tag(), answer.to_string()))
        })
        .collect()
}

/// POST /api/analyze-job
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalyzeJobResponse>, AppError> {
    let job_url = req.job_url.trim();
    if job_url.is_empty() {
        return Err(AppError::Validation("job_url must not be empty".to_string()));
    }

    let mut session = state.session.lock().await;
    let outcome = analyze_job(
        job_url,
        &state.profiles,
        state.fetcher.as_ref(),
        &state.gateway,
        &mut session,
    )
    .await;

    let response = match outcome {
        Ok(analysis) => AnalyzeJobResponse {
            sections: collect_sections(&analysis),
            analysis,
            success: true,
        },
        Err(e) => {
            warn!("Job analysis failed: {}", e);
            AnalyzeJobResponse {
                analysis: e.to_string(),
                success: false,
                sections: BTreeMap::new(),
            }
        }
    };
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_sections_skips_missing_answers() {
        let sections = collect_sections(
            "<JobDescription>Build APIs</JobDescription>\n<FitPercentile> 80% </FitPercentile>",
        );
        assert_eq!(sections.len(), 2);
        assert_eq!(sections["JobDescription"], "Build APIs");
        assert_eq!(sections["FitPercentile"], "80%");
    }
}
