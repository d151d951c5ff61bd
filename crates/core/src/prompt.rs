//! Instruction templates for the generation backend.
//!
//! [`build_instruction`] turns a generation request into the condition text;
//! [`wrap_instruction`] adds the poet preamble and trailing cue that the
//! inference client sends as the model input.

use crate::character::CharacterProfile;
use crate::poem::PoemSource;

/// Role-setting preamble placed before every instruction.
pub const POET_PREAMBLE: &str =
    "You are a poet. Given the following condition, produce a beautiful poem.";

/// Cue placed after the instruction so the model continues with the poem.
pub const POEM_CUE: &str = "Poem:";

/// Rendered in place of absent quotes.
pub const NO_QUOTES_MARKER: &str = "none";

const IMAGE_INSTRUCTION: &str =
    "Write a lyrical poem that expresses the atmosphere and emotions conveyed by the image.";

const GENERIC_CHARACTER_INSTRUCTION: &str =
    "Write a poem that brings out the character's traits and expresses the world they live in.";

/// Languages offered by the client's language selector.
const LANGUAGES: &[(&str, &str)] = &[
    ("ja", "Japanese"),
    ("en", "English"),
    ("zh", "Chinese"),
    ("ko", "Korean"),
];

/// Everything the prompt builder looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptRequest<'a> {
    /// Raw source discriminator as sent by the client.
    pub source: &'a str,
    pub character: Option<&'a CharacterProfile>,
    /// Optional language code (`ja`, `en`, `zh`, `ko`).
    pub language: Option<&'a str>,
}

/// Build the condition text for a generation request.
///
/// Unrecognised sources fall back to the generic character instruction.
pub fn build_instruction(request: &PromptRequest<'_>) -> String {
    let mut instruction = match (PoemSource::from_name(request.source), request.character) {
        (Some(PoemSource::Image), _) => IMAGE_INSTRUCTION.to_string(),
        (Some(PoemSource::Character), Some(character)) => character_instruction(character),
        _ => GENERIC_CHARACTER_INSTRUCTION.to_string(),
    };

    if let Some(language) = request.language.and_then(language_name) {
        instruction.push_str(&format!("\nWrite the poem in {language}."));
    }

    instruction
}

/// Wrap an instruction into the full model input.
pub fn wrap_instruction(instruction: &str) -> String {
    format!("{POET_PREAMBLE}\n\nCondition: {instruction}\n\n{POEM_CUE}")
}

fn character_instruction(character: &CharacterProfile) -> String {
    format!(
        "Write a poem that captures the personality and world of the following character.\n\
         Name: {}\n\
         Work: {}\n\
         Traits: {}\n\
         Quotes: {}",
        character.name,
        character.work,
        character.traits,
        character.quotes().unwrap_or(NO_QUOTES_MARKER),
    )
}

fn language_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
