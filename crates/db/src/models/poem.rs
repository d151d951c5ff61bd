//! Poem entity model and DTOs.

use lyric_core::poem::PoemSource;
use lyric_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `poems` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Poem {
    pub id: DbId,
    pub content: String,
    /// `image` or `character`.
    pub source: String,
    /// Only set when `source` is `character`.
    pub character_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting a generated poem.
#[derive(Debug, Clone)]
pub struct CreatePoem {
    pub content: String,
    pub source: PoemSource,
    pub character_id: Option<DbId>,
}

impl CreatePoem {
    /// The character reference as stored: dropped for image poems.
    pub fn stored_character_id(&self) -> Option<DbId> {
        match self.source {
            PoemSource::Character => self.character_id,
            PoemSource::Image => None,
        }
    }
}
