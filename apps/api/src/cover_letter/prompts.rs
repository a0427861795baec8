// Prompt for cover-letter drafting.

use crate::cover_letter::metadata::METADATA_LABEL;
use crate::llm_client::prompts::{labeled_block, pretty_json};
use crate::profile::Profile;
use crate::session::AnalyzedJob;

/// Everything the cover-letter prompt is built from.
pub struct CoverLetterContext<'a> {
    pub profile: &'a Profile,
    pub job: &'a AnalyzedJob,
    /// Human-readable date, e.g. "October 17, 2026".
    pub today: &'a str,
    pub likely_company: &'a str,
    pub likely_position: &'a str,
}

pub fn build_cover_letter_prompt(ctx: &CoverLetterContext<'_>) -> String {
    let sign_off = match ctx.profile.full_name() {
        Some(name) => format!("Sign off with the user's full name, {name}."),
        None => "Sign off with the user's full name.".to_string(),
    };
    format!(
        r#"You are an AI that writes professional cover letters for job applications.

Write a polished, natural-sounding cover letter with this format:
- A date line (e.g., "{today}")
- If recipient name and title are unknown, skip them.
- Include company name if known.
- Do not use placeholder text like [Recipient Name] or [Company Name].
- Make sure the letter flows smoothly without gaps.

The company is probably "{company}" and the position is probably "{position}". Prefer what the job posting itself says.

Also return a line at the top with this format:
{label}: <Company>, <Position>

{user}

{job}

{company_info}

Write the letter in a warm, confident tone. Start with a greeting and introduction, follow with two detailed paragraphs highlighting relevant experience and skills, and close with enthusiasm and gratitude. {sign_off}
"#,
        today = ctx.today,
        company = ctx.likely_company,
        position = ctx.likely_position,
        label = METADATA_LABEL,
        user = labeled_block("User Info", &pretty_json(ctx.profile)),
        job = labeled_block("Job Posting Text", &ctx.job.job_text),
        company_info = labeled_block("Company Info", &ctx.job.company_text),
    )
}
