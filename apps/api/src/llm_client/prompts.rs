// Shared prompt fragments and prompt-building utilities.
// Each pipeline that talks to the model defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

use serde::Serialize;

/// Instruction appended to prompts whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Formats a labeled block of source material: `--- LABEL ---` followed by the body.
pub fn labeled_block(label: &str, body: &str) -> String {
    format!("--- {} ---\n{}", label.to_uppercase(), body)
}

/// Serializes a value as indented JSON for embedding in a prompt.
///
/// Serialization of plain data structs cannot fail; an empty object is used if it ever does.
pub fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
