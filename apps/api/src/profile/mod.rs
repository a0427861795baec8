//! User profile: the resume-derived record every prompt is built from.

pub mod extraction;
pub mod handlers;
pub mod prompts;
pub mod store;

use serde::{Deserialize, Deserializer, Serialize};

pub use store::{ProfileError, ProfileStore};

/// Structured resume-derived attributes of the single user.
///
/// Every field is always serialized: unknown scalars as `null`, unknown lists as `[]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub linkedin: Option<String>,
    pub personal_site: Option<String>,
    pub github: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub skills: Vec<String>,
    /// Spoken languages only, never programming languages.
    #[serde(deserialize_with = "nullable_list")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub years_of_experience: Option<String>,
    pub summary: Option<String>,
    pub personal_note: Option<String>,
}

impl Profile {
    /// First, middle and last name joined, skipping blanks.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Partial profile edit. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub linkedin: Option<String>,
    pub personal_site: Option<String>,
    pub github: Option<String>,
    pub skills: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub years_of_experience: Option<String>,
    pub summary: Option<String>,
    pub personal_note: Option<String>,
}

impl ProfileUpdate {
    pub fn apply_to(self, profile: &mut Profile) {
        macro_rules! merge {
            ($update:ident => $target:ident: $($field:ident),* $(,)?) => {
                $(if let Some(value) = $update.$field {
                    $target.$field = value.into();
                })*
            };
        }
        let update = self;
        merge!(
            update => profile:
            first_name,
            middle_name,
            last_name,
            phone,
            email,
            country,
            city,
            address,
            zip_code,
            linkedin,
            personal_site,
            github,
            skills,
            languages,
            years_of_experience,
            summary,
            personal_note,
        );
    }
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `"5"`, `5`, `5.5` or `null`. Model output is inconsistent about this field.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
