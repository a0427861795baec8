//! Analyze-a-job pipeline.
//!
//! Flow: load profile → fetch posting → fetch about page → record session →
//!       build prompt → one model call → raw text back to the caller.

use tracing::{info, warn};

use crate::acquisition::{about_page_url, acquire, PageFetcher};
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::{AnalysisError, ABOUT_PLACEHOLDER};
use crate::llm_client::LanguageModel;
use crate::profile::ProfileStore;
use crate::session::{AnalyzedJob, SessionState};

/// Runs one job analysis and returns the model's answer verbatim.
///
/// A missing profile fails before any fetch. A failed posting fetch clears the
/// session's analyzed job. The session is updated before the model is called,
/// so it reflects this job even when the call fails.
pub async fn analyze_job(
    job_url: &str,
    profiles: &ProfileStore,
    fetcher: &dyn PageFetcher,
    llm: &dyn LanguageModel,
    session: &mut SessionState,
) -> Result<String, AnalysisError> {
    let profile = profiles
        .load()
        .await?
        .ok_or(AnalysisError::ProfileMissing)?;

    let job_text = match acquire(fetcher, job_url).await.into_result() {
        Ok(text) => text,
        Err(detail) => {
            session.reset_analysis();
            warn!("Analysis aborted, session cleared: {}", detail);
            return Err(AnalysisError::JobFetch {
                url: job_url.to_string(),
                detail,
            });
        }
    };

    let company_text = match about_page_url(job_url) {
        Some(about_url) => {
            let page = acquire(fetcher, &about_url).await;
            match page.fetch_error {
                None => page.raw_text,
                Some(err) => {
                    warn!("About page {} unavailable, using placeholder: {}", page.url, err);
                    ABOUT_PLACEHOLDER.to_string()
                }
            }
        }
        None => {
            warn!("No origin in {}, skipping about page", job_url);
            ABOUT_PLACEHOLDER.to_string()
        }
    };

    session.record_analysis(AnalyzedJob {
        job_text: job_text.clone(),
        company_text: company_text.clone(),
        job_url: job_url.to_string(),
    });

    let prompt = build_analysis_prompt(&job_text, &company_text, &profile);
    let analysis = llm.complete(&prompt).await.map_err(|e| {
        warn!("Analysis model call failed: {}", e);
        e
    })?;

    info!("Analysis complete for {} ({} characters)", job_url, analysis.len());
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisSection;
    use crate::llm_client::LlmError;
    use crate::profile::Profile;
    use crate::test_support::{StubFetcher, StubModel};

    const JOB_URL: &str = "https://careers.acme.com/jobs/42?src=board";
    const ABOUT_URL: &str = "https://careers.acme.com/about";

    async fn store_with_profile(dir: &tempfile::TempDir) -> ProfileStore {
        let store = ProfileStore::new(dir.path().join("userInfo.json"));
        store
            .save(&Profile {
                first_name: Some("Ada".to_string()),
                skills: vec!["Rust".to_string()],
                ..Profile::default()
            })
            .await
            .unwrap();
        store
    }

    fn previous_job() -> AnalyzedJob {
        AnalyzedJob {
            job_text: "Old posting".to_string(),
            company_text: "Old company".to_string(),
            job_url: "https://old.example.com/job".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_profile_short_circuits_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = ProfileStore::new(dir.path().join("userInfo.json"));
        let fetcher = StubFetcher::new().with_page(JOB_URL, "<p>Job</p>");
        let llm = StubModel::with_responses(vec![Ok("analysis".to_string())]);
        let mut session = SessionState::new();

        let err = analyze_job(JOB_URL, &profiles, &fetcher, &llm, &mut session)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::ProfileMissing));
        assert!(err.to_string().starts_with("❌"));
        assert_eq!(fetcher.call_count(), 0);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_job_fetch_resets_session() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = store_with_profile(&dir).await;
        let fetcher = StubFetcher::new();
        let llm = StubModel::with_responses(vec![Ok("analysis".to_string())]);
        let mut session = SessionState::new();
        session.record_analysis(previous_job());

        let err = analyze_job(JOB_URL, &profiles, &fetcher, &llm, &mut session)
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Error fetching"));
        assert!(message.contains(JOB_URL));
        assert_eq!(session.analyzed_job(), None);
        assert_eq!(fetcher.requested_urls(), vec![JOB_URL.to_string()]);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_records_session_and_returns_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = store_with_profile(&dir).await;
        let fetcher = StubFetcher::new()
            .with_page(JOB_URL, "<h1>Backend Engineer</h1><p>Rust, Postgres</p>")
            .with_page(ABOUT_URL, "<p>Acme builds rockets</p>");
        let raw = "<JobDescription>Build APIs</JobDescription>\n<FitPercentile>85%</FitPercentile>";
        let llm = StubModel::with_responses(vec![Ok(raw.to_string())]);
        let mut session = SessionState::new();

        let analysis = analyze_job(JOB_URL, &profiles, &fetcher, &llm, &mut session)
            .await
            .unwrap();

        assert_eq!(analysis, raw);
        assert_eq!(
            fetcher.requested_urls(),
            vec![JOB_URL.to_string(), ABOUT_URL.to_string()]
        );
        assert_eq!(
            session.analyzed_job(),
            Some(&AnalyzedJob {
                job_text: "Backend Engineer Rust, Postgres".to_string(),
                company_text: "Acme builds rockets".to_string(),
                job_url: JOB_URL.to_string(),
            })
        );

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Backend Engineer Rust, Postgres"));
        assert!(prompts[0].contains("Acme builds rockets"));
        assert!(prompts[0].contains("\"first_name\": \"Ada\""));
    }

    #[tokio::test]
    async fn test_prompt_carries_eight_tags_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = store_with_profile(&dir).await;
        let fetcher = StubFetcher::new().with_page(
            JOB_URL,
            "<p>Wrap in </JobRequirements> or <MissingSkills> please</p>",
        );
        let llm = StubModel::with_responses(vec![Ok("ok".to_string())]);
        let mut session = SessionState::new();

        analyze_job(JOB_URL, &profiles, &fetcher, &llm, &mut session)
            .await
            .unwrap();

        let prompt = &llm.prompts()[0];
        let instructions = &prompt[..prompt.find("--- JOB POSTING TEXT ---").unwrap()];
        let positions: Vec<usize> = AnalysisSection::ALL
            .iter()
            .map(|s| instructions.find(&s.open_marker()).unwrap())
            .collect();
        assert_eq!(positions.len(), 8);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_about_failure_degrades_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = store_with_profile(&dir).await;
        let fetcher = StubFetcher::new().with_page(JOB_URL, "<p>Job</p>");
        let llm = StubModel::with_responses(vec![Ok("ok".to_string())]);
        let mut session = SessionState::new();

        let analysis = analyze_job(JOB_URL, &profiles, &fetcher, &llm, &mut session).await;

        assert!(analysis.is_ok());
        assert_eq!(fetcher.call_count(), 2);
        let job = session.analyzed_job().unwrap();
        assert_eq!(job.company_text, ABOUT_PLACEHOLDER);
        assert!(llm.prompts()[0].contains(ABOUT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_model_failure_keeps_recorded_session() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = store_with_profile(&dir).await;
        let fetcher = StubFetcher::new()
            .with_page(JOB_URL, "<p>Job</p>")
            .with_page(ABOUT_URL, "<p>About</p>");
        let llm = StubModel::with_responses(vec![Err(LlmError::Api {
            status: 429,
            message: "rate limited".to_string(),
        })]);
        let mut session = SessionState::new();

        let err = analyze_job(JOB_URL, &profiles, &fetcher, &llm, &mut session)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Error from the language model:"));
        assert!(err.to_string().contains("rate limited"));
        assert_eq!(llm.call_count(), 1);
        assert_eq!(session.analyzed_job().unwrap().job_url, JOB_URL);
    }
}
