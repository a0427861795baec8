// Prompt for job analysis.

use crate::analysis::AnalysisSection;
use crate::llm_client::prompts::{labeled_block, pretty_json};
use crate::profile::Profile;

const ANALYSIS_PREAMBLE: &str = "You're a job assistant AI.
Please analyze the following information and provide detailed, structured advice.
Wrap your answer for each question in its own custom HTML tag as follows:";

const ANALYSIS_CLOSING: &str =
    "Be detailed, helpful, and structured. Clearly highlight any skill gaps.";

/// Builds the analysis prompt. The tag list and question list are generated from
/// `AnalysisSection::ALL`, so their names and order cannot drift apart.
pub fn build_analysis_prompt(job_text: &str, company_text: &str, profile: &Profile) -> String {
    let tag_lines: Vec<String> = AnalysisSection::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| {
            format!(
                "- For question {}, use {} ... {}",
                i + 1,
                section.open_marker(),
                section.close_marker()
            )
        })
        .collect();

    let questions: Vec<String> = AnalysisSection::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| format!("{}. {}", i + 1, section.question()))
        .collect();

    format!(
        "{preamble}\n{tags}\n\n{job}\n\n{company}\n\n{resume}\n\nBased on the above:\n{questions}\n\n{closing}\n",
        preamble = ANALYSIS_PREAMBLE,
        tags = tag_lines.join("\n"),
        job = labeled_block("Job Posting Text", job_text),
        company = labeled_block("About Company Text", company_text),
        resume = labeled_block("User Resume Data", &pretty_json(profile)),
        questions = questions.join("\n"),
        closing = ANALYSIS_CLOSING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_positions(prompt: &str) -> Vec<usize> {
        AnalysisSection::ALL
            .iter()
            .map(|s| prompt.find(&s.open_marker()).expect("tag present"))
            .collect()
    }

    #[test]
    fn test_prompt_lists_all_tags_in_order() {
        let prompt = build_analysis_prompt("Job", "About", &Profile::default());
        let positions = tag_positions(&prompt);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for section in AnalysisSection::ALL {
            assert!(prompt.contains(&section.close_marker()));
        }
    }

    #[test]
    fn test_prompt_embeds_sources_in_labeled_blocks() {
        let profile = Profile {
            first_name: Some("Ada".to_string()),
            ..Profile::default()
        };
        let prompt = build_analysis_prompt("Rust backend role", "Acme builds rockets", &profile);

        assert!(prompt.contains("--- JOB POSTING TEXT ---\nRust backend role"));
        assert!(prompt.contains("--- ABOUT COMPANY TEXT ---\nAcme builds rockets"));
        assert!(prompt.contains("--- USER RESUME DATA ---\n{"));
        assert!(prompt.contains("\"first_name\": \"Ada\""));
        assert!(prompt.contains("8. What are the job requirements?"));
        assert!(prompt.trim_end().ends_with(ANALYSIS_CLOSING));
    }

    #[test]
    fn test_tag_order_survives_hostile_job_text() {
        // A posting that mentions tags out of order must not change the instruction block.
        let job_text = "<JobRequirements> first! <JobDescription>";
        let prompt = build_analysis_prompt(job_text, "", &Profile::default());
        let instructions = &prompt[..prompt.find("--- JOB POSTING TEXT ---").unwrap()];
        let positions = tag_positions(instructions);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
