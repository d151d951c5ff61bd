//! Character entity model and DTOs.

use lyric_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub work: String,
    pub traits: String,
    pub quotes: Option<String>,
    pub created_at: Timestamp,
}

/// Insert DTO: the validated profile a client submitted.
pub type CreateCharacter = lyric_core::character::CharacterProfile;

impl From<Character> for lyric_core::character::CharacterProfile {
    fn from(row: Character) -> Self {
        Self {
            name: row.name,
            work: row.work,
            traits: row.traits,
            quotes: row.quotes,
        }
    }
}
