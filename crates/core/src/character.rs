//! Character attributes submitted by clients and fed into the prompt builder.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Maximum length of the `name` and `work` columns.
pub const MAX_SHORT_TEXT_LEN: u64 = 100;

/// The attributes of a fictional character.
///
/// Lengths match the `characters` table so a validated profile can always be
/// inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CharacterProfile {
    #[validate(length(min = 1, max = 100), custom(function = "non_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom(function = "non_blank"))]
    pub work: String,
    #[validate(length(min = 1), custom(function = "non_blank"))]
    pub traits: String,
    #[serde(default)]
    pub quotes: Option<String>,
}

impl CharacterProfile {
    /// Quotes with surrounding whitespace removed, or `None` when blank.
    pub fn quotes(&self) -> Option<&str> {
        self.quotes
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten validator output into a single human-readable line.
pub fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| e.code.as_ref()).collect();
            format!("{field}: {}", codes.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}
