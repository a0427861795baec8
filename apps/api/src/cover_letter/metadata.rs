//! The leading `COVER LETTER FILE NAME: <Company>, <Position>` line of a draft.

use std::sync::LazyLock;

use regex::Regex;

pub const METADATA_LABEL: &str = "COVER LETTER FILE NAME";

/// File stem used when the draft carries no usable metadata line.
pub const GENERIC_FILE_STEM: &str = "Generated_Cover_Letter";

static METADATA_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!("{METADATA_LABEL}: (.+), (.+)")).ok());

static METADATA_STRIP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"{METADATA_LABEL}: .+, .+\n?")).ok());

/// Company and position the model named for the letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentName {
    pub company: String,
    pub position: String,
}

impl DocumentName {
    /// `"{company}, {position} cover letter.{extension}"`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}, {} cover letter.{}", self.company, self.position, extension)
    }
}

/// A model draft split into its naming metadata and the letter body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLetterDraft {
    pub name: Option<DocumentName>,
    pub body: String,
}

impl CoverLetterDraft {
    /// Parses raw model output. Without a metadata line the body is the output unchanged.
    pub fn parse(raw: &str) -> Self {
        let (Some(line), Some(strip)) = (METADATA_LINE.as_ref(), METADATA_STRIP.as_ref()) else {
            return Self::unnamed(raw);
        };
        let Some(captures) = line.captures(raw) else {
            return Self::unnamed(raw);
        };

        let company = sanitize_component(captures.get(1).map_or("", |m| m.as_str()));
        let position = sanitize_component(captures.get(2).map_or("", |m| m.as_str()));
        let name = (!company.is_empty() && !position.is_empty())
            .then_some(DocumentName { company, position });

        Self {
            name,
            body: strip.replace_all(raw, "").trim().to_string(),
        }
    }

    fn unnamed(raw: &str) -> Self {
        Self {
            name: None,
            body: raw.to_string(),
        }
    }

    pub fn file_name(&self, extension: &str) -> String {
        match &self.name {
            Some(name) => name.file_name(extension),
            None => format!("{GENERIC_FILE_STEM}.{extension}"),
        }
    }
}

/// Trims a filename component and replaces characters that would escape the output directory.
fn sanitize_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect::<String>()
        .trim_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}
