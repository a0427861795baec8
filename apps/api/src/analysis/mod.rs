//! Job analysis: compares a posting (plus the company's about page) against the
//! stored profile and returns the model's tagged answer verbatim.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::profile::ProfileError;

pub use orchestrator::analyze_job;

/// Substituted for the company text when the about page cannot be fetched.
pub const ABOUT_PLACEHOLDER: &str = "Could not retrieve company about page (browser error).";

/// Outcome of a failed analysis. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("❌ Profile not found. Please upload a resume first.")]
    ProfileMissing,

    #[error("❌ Could not read the stored profile: {0}")]
    Profile(#[from] ProfileError),

    #[error("❌ Could not fetch the content for {url}\n{detail}")]
    JobFetch { url: String, detail: String },

    #[error("Error from the language model: {0}")]
    Llm(#[from] LlmError),
}

/// The eight answer sections of an analysis, in the order the model is asked for them.
/// Each answer is wrapped in `<Name>` … `</Name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisSection {
    JobDescription,
    FitPercentile,
    MatchingSkills,
    MissingSkills,
    InterviewTips,
    ImprovementAdvice,
    EssentialKnowledge,
    JobRequirements,
}

impl AnalysisSection {
    pub const ALL: [AnalysisSection; 8] = [
        AnalysisSection::JobDescription,
        AnalysisSection::FitPercentile,
        AnalysisSection::MatchingSkills,
        AnalysisSection::MissingSkills,
        AnalysisSection::InterviewTips,
        AnalysisSection::ImprovementAdvice,
        AnalysisSection::EssentialKnowledge,
        AnalysisSection::JobRequirements,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            AnalysisSection::JobDescription => "JobDescription",
            AnalysisSection::FitPercentile => "FitPercentile",
            AnalysisSection::MatchingSkills => "MatchingSkills",
            AnalysisSection::MissingSkills => "MissingSkills",
            AnalysisSection::InterviewTips => "InterviewTips",
            AnalysisSection::ImprovementAdvice => "ImprovementAdvice",
            AnalysisSection::EssentialKnowledge => "EssentialKnowledge",
            AnalysisSection::JobRequirements => "JobRequirements",
        }
    }

    /// The question this section answers, phrased from the user's point of view.
    pub fn question(self) -> &'static str {
        match self {
            AnalysisSection::JobDescription => "What is this job about?",
            AnalysisSection::FitPercentile => {
                "If you have to put a percentile of how much I fit this job, what would it be and why? Explain."
            }
            AnalysisSection::MatchingSkills => "What are the skills in my resume that fit this job?",
            AnalysisSection::MissingSkills => {
                "What skills are mentioned in the job posting that are missing from my resume?"
            }
            AnalysisSection::InterviewTips => {
                "What should I talk about in an interview to make a good impression?"
            }
            AnalysisSection::ImprovementAdvice => {
                "What should I study or improve to better fit this role?"
            }
            AnalysisSection::EssentialKnowledge => "What do I need to know?",
            AnalysisSection::JobRequirements => "What are the job requirements?",
        }
    }

    pub fn open_marker(self) -> String {
        format!("<{}>", self.tag())
    }

    pub fn close_marker(self) -> String {
        format!("</{}>", self.tag())
    }
}

/// Returns the trimmed answer between a section's markers, if the model produced them.
pub fn extract_section(analysis: &str, section: AnalysisSection) -> Option<&str> {
    let open = section.open_marker();
    let close = section.close_marker();
    let start = analysis.find(&open)? + open.len();
    let end = analysis[start..].find(&close)? + start;
    Some(analysis[start..end].trim())
}
