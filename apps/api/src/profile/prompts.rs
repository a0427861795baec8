// Prompt for turning resume text into a Profile.

/// Resume extraction prompt template. Replace `{json_only}` and `{resume_text}` before sending.
pub const RESUME_EXTRACTION_PROMPT_TEMPLATE: &str = r#"You're an AI that extracts structured user data from resumes.
Parse the resume text below and return JSON using this schema:
{
  "first_name": "...",
  "middle_name": "...",
  "last_name": "...",
  "phone": "...",
  "email": "...",
  "country": "...",
  "city": "...",
  "address": "...",
  "zip_code": "...",
  "linkedin": "...",
  "personal_site": "...",
  "github": "...",
  "skills": ["...", "..."],
  "languages": ["...", "..."],
  "years_of_experience": "...",
  "summary": "...",
  "personal_note": "..."
}

Instructions:
- Fill in as many fields as possible from the resume text.
- "skills" should include technical and professional skills, including programming languages like Python, Java, etc.
- "languages" should include only spoken (natural) languages, such as English, Hebrew, Spanish, etc.
- Do not confuse programming languages with spoken languages.
- If spoken languages are not mentioned explicitly, infer the language from the resume's writing (e.g., if the resume is in English, assume "English" is a spoken language).
- Use empty strings ("") or null for missing or unknown fields.
- Do not add fields that are not part of the schema.
- {json_only}

Resume Text:
{resume_text}"#;

pub fn build_resume_extraction_prompt(resume_text: &str) -> String {
    RESUME_EXTRACTION_PROMPT_TEMPLATE
        .replace("{json_only}", crate::llm_client::prompts::JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", resume_text)
}
